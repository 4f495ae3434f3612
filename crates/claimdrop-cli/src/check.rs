//! # Check Subcommand
//!
//! Validates a ledger configuration by opening a ledger from it, so that
//! every construction rule (non-zero addresses, non-zero root, deadline not
//! in the past, domain bound to the ledger address) is applied exactly as
//! the ledger applies it.

use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::Args;

use claimdrop_core::Timestamp;
use claimdrop_state::{ClaimLedger, InMemoryToken};

use crate::config::LedgerConfig;

/// Arguments for `claimdrop check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Evaluate the deadline as of this RFC 3339 instant instead of now.
    #[arg(long)]
    pub at: Option<String>,
}

/// Execute `claimdrop check`.
pub fn run_check(args: &CheckArgs, config: Option<&Path>) -> Result<u8> {
    let Some(path) = config else {
        bail!("check needs a ledger configuration; pass --config <FILE>");
    };
    let now = match &args.at {
        Some(at) => Timestamp::parse_rfc3339(at).with_context(|| format!("invalid --at {at:?}"))?,
        None => Timestamp::now(),
    };
    cmd_check(&LedgerConfig::load(path)?, now)
}

fn cmd_check(config: &LedgerConfig, now: Timestamp) -> Result<u8> {
    let params = config.to_params()?;
    let ledger = match ClaimLedger::new(params, Rc::new(InMemoryToken::new()), now) {
        Ok(ledger) => ledger,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(1);
        }
    };

    println!("OK: ledger configuration is valid");
    println!("  Ledger:           {}", ledger.address());
    println!("  Owner:            {}", ledger.owner());
    println!("  Token:            {}", ledger.token());
    println!("  Root:             {}", ledger.root());
    println!("  Deadline:         {}", ledger.deadline());
    println!("  Domain separator: {}", ledger.domain_separator());
    Ok(0)
}
