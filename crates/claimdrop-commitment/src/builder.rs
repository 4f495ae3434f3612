//! # Commitment Builder
//!
//! Builds the Merkle commitment over an ordered entitlement list and
//! extracts per-entry proofs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use claimdrop_core::{Address, Amount, Digest32};
use claimdrop_crypto::merkle::{leaf_fingerprint, MerkleTree};

use crate::bundle::{ProofBundle, ProofRecord};
use crate::error::CommitmentError;
use crate::source::EntitlementSource;

/// One `(account, amount)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entitlement {
    /// The claimant.
    pub account: Address,
    /// Tokens the claimant may claim.
    pub amount: Amount,
}

impl Entitlement {
    /// Construct an entitlement.
    pub fn new(account: Address, amount: Amount) -> Self {
        Self { account, amount }
    }

    /// The Merkle leaf for this entitlement.
    pub fn leaf(&self) -> Digest32 {
        leaf_fingerprint(&self.account, &self.amount)
    }
}

/// A built tree together with the entries it commits to.
#[derive(Debug, Clone)]
pub struct Commitment {
    entries: Vec<Entitlement>,
    tree: MerkleTree,
}

impl Commitment {
    /// Build a commitment. Fails on an empty list or a repeated account.
    pub fn build(entries: Vec<Entitlement>) -> Result<Self, CommitmentError> {
        let mut seen: HashMap<Address, usize> = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if let Some(first) = seen.insert(entry.account, i) {
                return Err(CommitmentError::DuplicateAccount {
                    account: entry.account,
                    first,
                    second: i,
                });
            }
        }

        let tree = MerkleTree::new(entries.iter().map(Entitlement::leaf).collect())?;
        tracing::info!(
            entries = entries.len(),
            depth = tree.depth(),
            root = %tree.root(),
            "built entitlement commitment"
        );
        Ok(Self { entries, tree })
    }

    /// Parse and build from an entitlement source.
    pub fn from_source(source: &EntitlementSource) -> Result<Self, CommitmentError> {
        Self::build(source.entitlements()?)
    }

    /// The commitment root.
    pub fn root(&self) -> Digest32 {
        self.tree.root()
    }

    /// Committed entries, in input order.
    pub fn entries(&self) -> &[Entitlement] {
        &self.entries
    }

    /// The underlying tree.
    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Sibling path for the entry at `index`.
    pub fn proof(&self, index: usize) -> Result<Vec<Digest32>, CommitmentError> {
        Ok(self.tree.proof(index)?)
    }

    /// Index and proof for `account`, if it is committed.
    pub fn proof_for(&self, account: &Address) -> Option<(usize, Vec<Digest32>)> {
        let index = self.entries.iter().position(|e| e.account == *account)?;
        self.tree.proof(index).ok().map(|proof| (index, proof))
    }

    /// Emit one proof record per entry, in input order.
    pub fn bundle(&self) -> Result<ProofBundle, CommitmentError> {
        let root = self.root();
        let records = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| -> Result<ProofRecord, CommitmentError> {
                Ok(ProofRecord {
                    inputs: vec![entry.account.to_hex(), entry.amount.to_string()],
                    proof: self.tree.proof(i)?,
                    root,
                    leaf: entry.leaf(),
                })
            })
            .collect::<Result<Vec<_>, CommitmentError>>()?;
        Ok(ProofBundle::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdrop_crypto::merkle::verify_membership;

    fn entries(n: u8) -> Vec<Entitlement> {
        (1..=n)
            .map(|i| Entitlement::new(Address::from_bytes([i; 20]), Amount::from(u64::from(i))))
            .collect()
    }

    #[test]
    fn every_entry_verifies_against_root() {
        let c = Commitment::build(entries(5)).unwrap();
        for (i, e) in c.entries().iter().enumerate() {
            assert!(verify_membership(&c.proof(i).unwrap(), &c.root(), &e.leaf()));
        }
    }

    #[test]
    fn rejects_empty_list() {
        assert!(matches!(
            Commitment::build(vec![]),
            Err(CommitmentError::Merkle(_))
        ));
    }

    #[test]
    fn rejects_duplicate_account() {
        let mut list = entries(3);
        list.push(Entitlement::new(list[1].account, Amount::from(99u64)));
        match Commitment::build(list) {
            Err(CommitmentError::DuplicateAccount { first, second, .. }) => {
                assert_eq!((first, second), (1, 3));
            }
            other => panic!("expected DuplicateAccount, got {other:?}"),
        }
    }

    #[test]
    fn proof_for_finds_account() {
        let c = Commitment::build(entries(4)).unwrap();
        let (index, proof) = c.proof_for(&Address::from_bytes([3; 20])).unwrap();
        assert_eq!(index, 2);
        assert_eq!(proof, c.proof(2).unwrap());
        assert!(c.proof_for(&Address::from_bytes([9; 20])).is_none());
    }

    #[test]
    fn input_order_changes_root() {
        let forward = Commitment::build(entries(3)).unwrap();
        let mut reversed = entries(3);
        reversed.reverse();
        let backward = Commitment::build(reversed).unwrap();
        assert_ne!(forward.root(), backward.root());
    }

    #[test]
    fn bundle_preserves_order() {
        let c = Commitment::build(entries(3)).unwrap();
        let bundle = c.bundle().unwrap();
        assert_eq!(bundle.len(), 3);
        for (record, entry) in bundle.records().iter().zip(c.entries()) {
            assert_eq!(record.inputs[0], entry.account.to_hex());
            assert_eq!(record.root, c.root());
            assert_eq!(record.leaf, entry.leaf());
        }
    }
}
