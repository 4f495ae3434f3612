//! # Build Subcommand
//!
//! Reads an entitlement source, builds the Merkle commitment and writes the
//! proof bundle.
//!
//! ```bash
//! claimdrop build input.json --output proofs.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use claimdrop_commitment::{Commitment, EntitlementSource};

/// Arguments for `claimdrop build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Entitlement source file (`{types, count, values}` JSON).
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Where to write the proof bundle. Defaults to `proofs.json` next to
    /// the source.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute `claimdrop build`.
pub fn run_build(args: &BuildArgs) -> Result<u8> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.source));
    cmd_build(&args.source, &output)
}

fn default_output(source: &Path) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("proofs.json")
}

fn cmd_build(source_path: &Path, output_path: &Path) -> Result<u8> {
    let source = EntitlementSource::load(source_path)
        .with_context(|| format!("failed to read entitlement source: {}", source_path.display()))?;
    let commitment = Commitment::from_source(&source)
        .with_context(|| format!("invalid entitlement source: {}", source_path.display()))?;
    let bundle = commitment.bundle().context("failed to extract proofs")?;
    bundle
        .save(output_path)
        .with_context(|| format!("failed to write proof bundle: {}", output_path.display()))?;

    println!("OK: committed {} entitlements", commitment.entries().len());
    println!("  Root:   {}", commitment.root());
    println!("  Depth:  {}", commitment.tree().depth());
    println!("  Output: {}", output_path.display());
    Ok(0)
}
