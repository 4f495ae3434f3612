//! # Verify Subcommand
//!
//! Re-checks a proof bundle offline. Each record's leaf must match its
//! inputs and its proof must fold to the bundle root. With `--root`, or a
//! config file carrying `root`, the bundle root must also equal that value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use claimdrop_commitment::ProofBundle;
use claimdrop_core::{Address, Digest32};

use crate::config::LedgerConfig;

/// Arguments for `claimdrop verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Proof bundle file.
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// Expected commitment root. Overrides the config file's `root`.
    #[arg(long)]
    pub root: Option<Digest32>,

    /// Only check the record for this account.
    #[arg(long)]
    pub account: Option<Address>,
}

/// Execute `claimdrop verify`.
pub fn run_verify(args: &VerifyArgs, config: Option<&Path>) -> Result<u8> {
    let expected_root = match (args.root, config) {
        (Some(root), _) => Some(root),
        (None, Some(path)) => LedgerConfig::load(path)?.root,
        (None, None) => None,
    };
    cmd_verify(&args.bundle, expected_root, args.account.as_ref())
}

fn cmd_verify(
    bundle_path: &Path,
    expected_root: Option<Digest32>,
    account: Option<&Address>,
) -> Result<u8> {
    let bundle = ProofBundle::load(bundle_path)
        .with_context(|| format!("failed to read proof bundle: {}", bundle_path.display()))?;

    let root = match account {
        Some(account) => {
            let Some(record) = bundle.find(account) else {
                println!("FAIL: {account} is not in the bundle");
                return Ok(1);
            };
            if let Err(reason) = record.check() {
                println!("FAIL: record for {account}: {reason}");
                return Ok(1);
            }
            record.root
        }
        None => match bundle.verify_all() {
            Ok(root) => root,
            Err(e) => {
                println!("FAIL: {e}");
                return Ok(1);
            }
        },
    };

    if let Some(expected) = expected_root {
        if root != expected {
            println!("FAIL: bundle root {root} does not match expected root {expected}");
            return Ok(1);
        }
    }

    match account {
        Some(account) => println!("OK: record for {account} verifies against {root}"),
        None => println!("OK: {} records verify against {root}", bundle.len()),
    }
    Ok(0)
}
