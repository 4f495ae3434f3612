//! # Source → Bundle File Round Trip
//!
//! Reads an entitlement source from disk, writes the proof bundle, reads it
//! back and re-verifies it.

use claimdrop_commitment::{Commitment, EntitlementSource, ProofBundle};
use claimdrop_core::{Address, Amount};
use claimdrop_crypto::merkle::{leaf_fingerprint, verify_membership};

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

#[test]
fn source_file_to_bundle_file_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("input.json");
    let bundle_path = dir.path().join("output.json");
    std::fs::write(&source_path, SOURCE).unwrap();

    let source = EntitlementSource::load(&source_path).unwrap();
    let commitment = Commitment::from_source(&source).unwrap();
    commitment.bundle().unwrap().save(&bundle_path).unwrap();

    let bundle = ProofBundle::load(&bundle_path).unwrap();
    assert_eq!(bundle.len(), 4);
    assert_eq!(bundle.verify_all().unwrap(), commitment.root());

    let claimant = Address::from_hex("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC").unwrap();
    let record = bundle.find(&claimant).unwrap();
    let amount = Amount::scaled(25, 18).unwrap();
    assert!(verify_membership(
        &record.proof,
        &commitment.root(),
        &leaf_fingerprint(&claimant, &amount)
    ));
    assert_eq!(record.proof.len(), 2);
}

#[test]
fn malformed_source_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");
    std::fs::write(&path, SOURCE.replace("\"count\": 4", "\"count\": 5")).unwrap();
    let source = EntitlementSource::load(&path).unwrap();
    assert!(Commitment::from_source(&source).is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProofBundle::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().starts_with("io error"));
}
