//! # claimdrop-cli: Operator CLI
//!
//! Provides the `claimdrop` command-line interface over the commitment
//! builder, the signing primitives and the ledger configuration.
//!
//! ## Subcommands
//!
//! - `claimdrop build`: Entitlement source → proof bundle.
//! - `claimdrop verify`: Offline proof bundle re-verification.
//! - `claimdrop digest`: The claim digest a claimant must sign.
//! - `claimdrop sign`: Sign a claim with a key file.
//! - `claimdrop recover`: Recover and check a claim signer.
//! - `claimdrop keygen`: Generate a secp256k1 key.
//! - `claimdrop check`: Validate a ledger configuration.
//!
//! ```bash
//! claimdrop build input.json --output proofs.json
//! claimdrop --config ledger.yaml verify proofs.json
//! claimdrop --config ledger.yaml sign --key alice.key --amount 25000000000000000000
//! ```
//!
//! Handlers return `Ok(0)` on success, `Ok(1)` when a check fails, and
//! `Err` when the command could not run at all.

pub mod build;
pub mod check;
pub mod config;
pub mod signing;
pub mod verify;
