//! # claimdrop CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use claimdrop_cli::build::{run_build, BuildArgs};
use claimdrop_cli::check::{run_check, CheckArgs};
use claimdrop_cli::signing::{
    run_digest, run_keygen, run_recover, run_sign, DigestArgs, KeygenArgs, RecoverArgs, SignArgs,
};
use claimdrop_cli::verify::{run_verify, VerifyArgs};

/// claimdrop: one-shot reward claims against a Merkle commitment.
///
/// Builds entitlement commitments and proof bundles, computes and signs
/// EIP-712 claim digests, and validates ledger configurations.
#[derive(Parser, Debug)]
#[command(name = "claimdrop", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to the ledger configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a commitment and proof bundle from an entitlement source.
    Build(BuildArgs),

    /// Re-verify a proof bundle.
    Verify(VerifyArgs),

    /// Print the claim digest for an account and amount.
    Digest(DigestArgs),

    /// Sign a claim with a private key file.
    Sign(SignArgs),

    /// Recover the signer of a claim signature.
    Recover(RecoverArgs),

    /// Generate a secp256k1 key.
    Keygen(KeygenArgs),

    /// Validate a ledger configuration.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "claimdrop CLI starting");

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Verify(args) => run_verify(args, config),
        Commands::Digest(args) => run_digest(args, config),
        Commands::Sign(args) => run_sign(args, config),
        Commands::Recover(args) => run_recover(args, config),
        Commands::Keygen(args) => run_keygen(args),
        Commands::Check(args) => run_check(args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
