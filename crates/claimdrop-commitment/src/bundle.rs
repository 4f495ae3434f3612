//! # Proof Bundle
//!
//! The file handed to claimants: a JSON array with one record per entry,
//!
//! ```json
//! [{ "inputs": ["0x6ca6…", "25000000000000000000"],
//!    "proof":  ["0x…", "0x…"],
//!    "root":   "0x…",
//!    "leaf":   "0x…" }]
//! ```
//!
//! A bundle can be re-verified offline: each record's leaf must match its
//! inputs and its proof must fold to its root.

use std::path::Path;

use serde::{Deserialize, Serialize};

use claimdrop_core::{Address, Amount, Digest32};
use claimdrop_crypto::merkle::verify_membership;

use crate::builder::Entitlement;
use crate::error::CommitmentError;

/// Proof material for one entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// `[account, amount]` in source string form.
    pub inputs: Vec<String>,
    /// Sibling path, leaf to root.
    pub proof: Vec<Digest32>,
    /// The commitment root.
    pub root: Digest32,
    /// The leaf fingerprint of `inputs`.
    pub leaf: Digest32,
}

impl ProofRecord {
    /// Parse `inputs` back into an entitlement.
    pub fn entitlement(&self) -> Result<Entitlement, CommitmentError> {
        let field = |field: usize| {
            self.inputs
                .get(field)
                .ok_or(CommitmentError::MissingField { index: 0, field })
        };
        let account = Address::from_hex(field(0)?).map_err(|source| {
            CommitmentError::InvalidValue {
                index: 0,
                field: 0,
                source,
            }
        })?;
        let amount = Amount::parse_decimal(field(1)?).map_err(|source| {
            CommitmentError::InvalidValue {
                index: 0,
                field: 1,
                source,
            }
        })?;
        Ok(Entitlement::new(account, amount))
    }

    /// Check the record is internally consistent. Returns a description of
    /// the first mismatch.
    pub fn check(&self) -> Result<(), String> {
        let entitlement = self.entitlement().map_err(|e| e.to_string())?;
        if entitlement.leaf() != self.leaf {
            return Err(format!(
                "leaf {} does not match inputs (expected {})",
                self.leaf,
                entitlement.leaf()
            ));
        }
        if !verify_membership(&self.proof, &self.root, &self.leaf) {
            return Err(format!("proof does not fold to root {}", self.root));
        }
        Ok(())
    }
}

/// An ordered list of proof records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofBundle {
    records: Vec<ProofRecord>,
}

impl ProofBundle {
    /// Wrap a list of records.
    pub fn new(records: Vec<ProofRecord>) -> Self {
        Self { records }
    }

    /// All records, in entry order.
    pub fn records(&self) -> &[ProofRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the bundle is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The root shared by the records, or `None` for an empty bundle or
    /// records that disagree.
    pub fn root(&self) -> Option<Digest32> {
        let first = self.records.first()?.root;
        self.records
            .iter()
            .all(|r| r.root == first)
            .then_some(first)
    }

    /// The record for `account`. Addresses compare by value, so the
    /// stored input's hex case does not matter.
    pub fn find(&self, account: &Address) -> Option<&ProofRecord> {
        self.records.iter().find(|r| {
            r.inputs
                .first()
                .and_then(|a| Address::from_hex(a).ok())
                .is_some_and(|a| a == *account)
        })
    }

    /// Re-verify every record against its own root, and every root against
    /// the others.
    pub fn verify_all(&self) -> Result<Digest32, CommitmentError> {
        let Some(root) = self.records.first().map(|r| r.root) else {
            return Err(CommitmentError::InvalidRecord {
                index: 0,
                reason: "bundle is empty".to_string(),
            });
        };
        for (index, record) in self.records.iter().enumerate() {
            if record.root != root {
                return Err(CommitmentError::InvalidRecord {
                    index,
                    reason: format!("root {} differs from bundle root {root}", record.root),
                });
            }
            record
                .check()
                .map_err(|reason| CommitmentError::InvalidRecord { index, reason })?;
        }
        Ok(root)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String, CommitmentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, CommitmentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write to `path`.
    pub fn save(&self, path: &Path) -> Result<(), CommitmentError> {
        std::fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), records = self.len(), "wrote proof bundle");
        Ok(())
    }

    /// Read from `path`.
    pub fn load(path: &Path) -> Result<Self, CommitmentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Commitment;

    fn sample() -> ProofBundle {
        let entries = (1..=4u8)
            .map(|i| Entitlement::new(Address::from_bytes([i; 20]), Amount::from(u64::from(i))))
            .collect();
        Commitment::build(entries).unwrap().bundle().unwrap()
    }

    #[test]
    fn fresh_bundle_verifies() {
        let bundle = sample();
        assert_eq!(bundle.verify_all().unwrap(), bundle.root().unwrap());
    }

    #[test]
    fn json_shape_is_array_of_records() {
        let value: serde_json::Value = serde_json::to_value(sample()).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert!(first["inputs"].is_array());
        assert!(first["proof"].is_array());
        assert!(first["root"].as_str().unwrap().starts_with("0x"));
        assert!(first["leaf"].as_str().unwrap().starts_with("0x"));
    }

    #[test]
    fn tampered_amount_is_detected() {
        let mut bundle = sample();
        bundle.records[2].inputs[1] = "1000".to_string();
        assert!(matches!(
            bundle.verify_all(),
            Err(CommitmentError::InvalidRecord { index: 2, .. })
        ));
    }

    #[test]
    fn tampered_proof_is_detected() {
        let mut bundle = sample();
        bundle.records[1].proof[0] = bundle.records[1].proof[0].with_bit_flipped(0);
        assert!(matches!(
            bundle.verify_all(),
            Err(CommitmentError::InvalidRecord { index: 1, .. })
        ));
    }

    #[test]
    fn mixed_roots_are_detected() {
        let mut bundle = sample();
        bundle.records[3].root = Digest32::ZERO;
        assert!(bundle.root().is_none());
        assert!(bundle.verify_all().is_err());
    }

    #[test]
    fn find_ignores_hex_case() {
        let mut bundle = sample();
        bundle.records[0].inputs[0] = bundle.records[0].inputs[0].to_uppercase().replace("0X", "0x");
        assert!(bundle.find(&Address::from_bytes([1; 20])).is_some());
        assert!(bundle.find(&Address::from_bytes([7; 20])).is_none());
    }

    #[test]
    fn empty_bundle_does_not_verify() {
        assert!(ProofBundle::default().verify_all().is_err());
    }
}
