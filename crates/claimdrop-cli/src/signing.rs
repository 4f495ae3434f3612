//! # Signing Subcommands
//!
//! secp256k1 key generation, claim digest computation, claim signing and
//! signer recovery.
//!
//! ```bash
//! claimdrop keygen --output keys --prefix alice
//! claimdrop --config ledger.yaml digest --account 0x… --amount 25000000000000000000
//! claimdrop --config ledger.yaml sign --key keys/alice.key --amount 25000000000000000000
//! claimdrop --config ledger.yaml recover --account 0x… --amount … --signature 0x…
//! ```
//!
//! ## Security Invariant
//!
//! Every digest is bound to the domain in the config file. A signature made
//! for one ledger does not recover to the claimant under another.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use claimdrop_core::{Address, Amount};
use claimdrop_crypto::{
    recover_signer, sign_claim, verify_authorization, EcdsaSignature, SigningKey,
};

use crate::config::LedgerConfig;

/// Arguments for `claimdrop keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output directory for the key files.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
    /// Prefix for the key filenames.
    #[arg(long, default_value = "claimdrop")]
    pub prefix: String,
}

/// Arguments for `claimdrop digest`.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// The claiming account.
    #[arg(long)]
    pub account: Address,
    /// The entitled amount, in base units.
    #[arg(long)]
    pub amount: Amount,
}

/// Arguments for `claimdrop sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Private key file (hex-encoded 32-byte secret).
    #[arg(long)]
    pub key: PathBuf,
    /// The claiming account. Defaults to the key's own address.
    #[arg(long)]
    pub account: Option<Address>,
    /// The entitled amount, in base units.
    #[arg(long)]
    pub amount: Amount,
}

/// Arguments for `claimdrop recover`.
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// The claiming account.
    #[arg(long)]
    pub account: Address,
    /// The entitled amount, in base units.
    #[arg(long)]
    pub amount: Amount,
    /// The 65-byte `r ‖ s ‖ v` signature, hex-encoded.
    #[arg(long)]
    pub signature: String,
    /// Exit non-zero unless the signer equals this address. Defaults to
    /// `--account`.
    #[arg(long)]
    pub expect: Option<Address>,
}

fn require_config(config: Option<&Path>) -> Result<LedgerConfig> {
    match config {
        Some(path) => LedgerConfig::load(path),
        None => bail!("this command needs the signing domain; pass --config <FILE>"),
    }
}

/// Execute `claimdrop keygen`.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    cmd_keygen(&args.output, &args.prefix)
}

/// Execute `claimdrop digest`.
pub fn run_digest(args: &DigestArgs, config: Option<&Path>) -> Result<u8> {
    let separator = require_config(config)?.domain().separator();
    let digest = claimdrop_crypto::claim_digest(&separator, &args.account, &args.amount);
    println!("{digest}");
    Ok(0)
}

/// Execute `claimdrop sign`.
pub fn run_sign(args: &SignArgs, config: Option<&Path>) -> Result<u8> {
    let config = require_config(config)?;
    let key = read_key(&args.key)?;
    let account = args.account.unwrap_or_else(|| key.address());
    if account != key.address() {
        tracing::warn!(
            %account,
            signer = %key.address(),
            "signing for an account other than the key's own; the ledger will reject it"
        );
    }
    let signature = sign_claim(&key, &config.domain().separator(), &account, &args.amount);
    println!("{signature}");
    Ok(0)
}

/// Execute `claimdrop recover`.
pub fn run_recover(args: &RecoverArgs, config: Option<&Path>) -> Result<u8> {
    let separator = require_config(config)?.domain().separator();
    let signature = EcdsaSignature::from_hex(args.signature.trim())
        .map_err(|e| anyhow!("invalid signature: {e}"))?;
    let expected = args.expect.unwrap_or(args.account);

    let digest = claimdrop_crypto::claim_digest(&separator, &args.account, &args.amount);
    match recover_signer(&digest, &signature) {
        Ok(signer) => println!("Signer: {signer}"),
        Err(e) => {
            println!("FAIL: signature does not recover: {e}");
            return Ok(1);
        }
    }

    if verify_authorization(&args.account, &args.amount, &signature, &expected, &separator) {
        println!("OK: signature is from {expected}");
        Ok(0)
    } else {
        println!("FAIL: signature is not from {expected}");
        Ok(1)
    }
}

/// Generate a key and write `<prefix>.key` (secret) and `<prefix>.addr`.
fn cmd_keygen(output_dir: &Path, prefix: &str) -> Result<u8> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let key = SigningKey::generate();
    let address = key.address();
    let secret_hex = claimdrop_core::hex::encode_prefixed(&key.to_bytes());

    let key_path = output_dir.join(format!("{prefix}.key"));
    let addr_path = output_dir.join(format!("{prefix}.addr"));
    std::fs::write(&key_path, &secret_hex)
        .with_context(|| format!("failed to write private key: {}", key_path.display()))?;
    std::fs::write(&addr_path, address.to_hex())
        .with_context(|| format!("failed to write address: {}", addr_path.display()))?;

    println!("OK: generated secp256k1 key");
    println!("  Private key: {}", key_path.display());
    println!("  Address:     {address}");
    Ok(0)
}

fn read_key(path: &Path) -> Result<SigningKey> {
    if !path.exists() {
        bail!("private key file not found: {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read private key: {}", path.display()))?;
    SigningKey::from_hex(content.trim()).map_err(|e| anyhow!("invalid private key: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "name: RewardsLedger\nversion: \"1\"\nchain_id: 31337\naddress: \"0x1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d\"\n";

    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("ledger.yaml");
        std::fs::write(&path, CONFIG).unwrap();
        path
    }

    #[test]
    fn keygen_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cmd_keygen(dir.path(), "test").unwrap(), 0);

        let key = std::fs::read_to_string(dir.path().join("test.key")).unwrap();
        assert_eq!(key.len(), 66);
        let addr = std::fs::read_to_string(dir.path().join("test.addr")).unwrap();
        let parsed = read_key(&dir.path().join("test.key")).unwrap();
        assert_eq!(parsed.address().to_hex(), addr);
    }

    #[test]
    fn signed_claim_recovers_to_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        cmd_keygen(dir.path(), "alice").unwrap();
        let key = read_key(&dir.path().join("alice.key")).unwrap();
        let amount = Amount::scaled(25, 18).unwrap();

        let separator = LedgerConfig::load(&config).unwrap().domain().separator();
        let signature = sign_claim(&key, &separator, &key.address(), &amount);

        let args = RecoverArgs {
            account: key.address(),
            amount,
            signature: signature.to_hex(),
            expect: None,
        };
        assert_eq!(run_recover(&args, Some(&config)).unwrap(), 0);

        let wrong = RecoverArgs {
            expect: Some(Address::from_bytes([5; 20])),
            ..args
        };
        assert_eq!(run_recover(&wrong, Some(&config)).unwrap(), 1);
    }

    #[test]
    fn malformed_signature_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let args = RecoverArgs {
            account: Address::from_bytes([1; 20]),
            amount: Amount::from(1u64),
            signature: "0x1234".into(),
            expect: None,
        };
        assert!(run_recover(&args, Some(&config)).is_err());
    }

    #[test]
    fn digest_needs_config() {
        let args = DigestArgs {
            account: Address::from_bytes([1; 20]),
            amount: Amount::from(1u64),
        };
        assert!(run_digest(&args, None).is_err());
    }

    #[test]
    fn missing_key_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_key(&dir.path().join("absent.key")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
