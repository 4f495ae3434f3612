//! # Build → Verify Through the Command Handlers
//!
//! Drives `build`, then `verify` against a config file whose `root` is the
//! freshly built root, then against a stale root.

use std::path::Path;

use claimdrop_cli::build::{run_build, BuildArgs};
use claimdrop_cli::check::{run_check, CheckArgs};
use claimdrop_cli::verify::{run_verify, VerifyArgs};
use claimdrop_commitment::ProofBundle;

const SOURCE: &str = r#"{
    "types": ["address", "uint"],
    "count": 4,
    "values": {
        "0": {"0": "0x6CA6d1e2D5347Bfab1d91e883F1915560e09129D", "1": "25000000000000000000"},
        "1": {"0": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "1": "25000000000000000000"},
        "2": {"0": "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC", "1": "25000000000000000000"},
        "3": {"0": "0x90F79bf6EB2c4f870365E785982E1f101E93b906", "1": "25000000000000000000"}
    }
}"#;

fn write_config(dir: &Path, root: &str) -> std::path::PathBuf {
    let path = dir.join("ledger.yaml");
    let yaml = format!(
        "name: RewardsLedger\nversion: \"1\"\nchain_id: 1\n\
         address: \"0x1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d\"\n\
         owner: \"0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a\"\n\
         token: \"0x7070707070707070707070707070707070707070\"\n\
         root: \"{root}\"\n"
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn built_bundle_matches_configured_root() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("input.json");
    let output = dir.path().join("out").join("proofs.json");
    std::fs::create_dir_all(output.parent().unwrap()).unwrap();
    std::fs::write(&source, SOURCE).unwrap();

    let code = run_build(&BuildArgs {
        source,
        output: Some(output.clone()),
    })
    .unwrap();
    assert_eq!(code, 0);

    let root = ProofBundle::load(&output).unwrap().root().unwrap();
    let config = write_config(dir.path(), &root.to_hex());

    let verify = VerifyArgs {
        bundle: output.clone(),
        root: None,
        account: None,
    };
    assert_eq!(run_verify(&verify, Some(&config)).unwrap(), 0);
    assert_eq!(run_check(&CheckArgs { at: None }, Some(&config)).unwrap(), 0);

    let stale = write_config(dir.path(), &format!("0x{}", "ab".repeat(32)));
    assert_eq!(run_verify(&verify, Some(&stale)).unwrap(), 1);
}

#[test]
fn missing_source_is_an_error_not_a_failure_code() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_build(&BuildArgs {
        source: dir.path().join("absent.json"),
        output: None,
    });
    assert!(result.is_err());
}
