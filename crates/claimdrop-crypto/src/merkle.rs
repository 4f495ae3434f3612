//! # Sorted-Pair Merkle Tree
//!
//! The commitment over the entitlement set and its membership proofs.
//!
//! ## Algorithm
//!
//! - Leaf: `keccak256(keccak256(abi.encode(account, amount)))`. The second
//!   hash keeps a 64-byte leaf preimage from ever colliding with a 64-byte
//!   internal-node preimage.
//! - Node: `keccak256(min(a, b) || max(a, b))`, comparing the two digests as
//!   unsigned 256-bit integers. Because each pair is sorted, a proof is just
//!   the list of siblings; no left/right bits are carried.
//! - Odd levels: the last node is paired with the zero digest. The zero
//!   digest is included in that node's proof, so every proof over `n`
//!   leaves has exactly `ceil(log2(n))` siblings.
//!
//! ## Security Invariant
//!
//! Builder and verifier share [`hash_pair`]. Changing the pair ordering in
//! one place without the other silently invalidates every proof.

use thiserror::Error;

use claimdrop_core::{AbiEncoded, Address, Amount, Digest32};

use crate::keccak::{keccak256, keccak256_abi, keccak256_concat};

/// Error building a tree or extracting a proof.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree needs at least one leaf.
    #[error("cannot build a Merkle tree with no leaves")]
    Empty,

    /// Requested a proof for a leaf that does not exist.
    #[error("leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of leaves in the tree.
        len: usize,
    },
}

/// The leaf fingerprint of an entitlement.
pub fn leaf_fingerprint(account: &Address, amount: &Amount) -> Digest32 {
    let inner = keccak256_abi(&AbiEncoded::entitlement(account, amount));
    keccak256(inner.as_bytes())
}

/// Hash two nodes in unsigned numeric order.
pub fn hash_pair(a: &Digest32, b: &Digest32) -> Digest32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    keccak256_concat(&[&lo.as_bytes()[..], &hi.as_bytes()[..]])
}

/// Fold `path` onto `leaf`, returning the implied root.
pub fn compute_root(path: &[Digest32], leaf: &Digest32) -> Digest32 {
    path.iter().fold(*leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Whether `path` proves `leaf` is committed to by `root`.
///
/// Pure and total: a truncated, padded or reordered path yields `false`.
pub fn verify_membership(path: &[Digest32], root: &Digest32, leaf: &Digest32) -> bool {
    compute_root(path, leaf) == *root
}

/// A fully materialized tree, level 0 being the leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest32>>,
}

impl MerkleTree {
    /// Build a tree bottom-up from leaf fingerprints, in the given order.
    pub fn new(leaves: Vec<Digest32>) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::Empty);
        }
        let mut levels = vec![leaves];
        while let Some(current) = levels.last() {
            if current.len() == 1 {
                break;
            }
            let next: Vec<Digest32> = current
                .chunks(2)
                .map(|pair| {
                    let right = pair.get(1).unwrap_or(&Digest32::ZERO);
                    hash_pair(&pair[0], right)
                })
                .collect();
            levels.push(next);
        }
        Ok(Self { levels })
    }

    /// Build a tree directly from entitlements.
    pub fn from_entitlements(entries: &[(Address, Amount)]) -> Result<Self, MerkleError> {
        Self::new(
            entries
                .iter()
                .map(|(account, amount)| leaf_fingerprint(account, amount))
                .collect(),
        )
    }

    /// The commitment root.
    pub fn root(&self) -> Digest32 {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(Digest32::ZERO)
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels above the leaves, i.e. the proof length.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// The leaf at `index`.
    pub fn leaf(&self, index: usize) -> Option<&Digest32> {
        self.levels.first().and_then(|leaves| leaves.get(index))
    }

    /// Sibling path for the leaf at `index`, leaf to root.
    pub fn proof(&self, index: usize) -> Result<Vec<Digest32>, MerkleError> {
        let len = self.len();
        if index >= len {
            return Err(MerkleError::IndexOutOfRange { index, len });
        }
        let mut path = Vec::with_capacity(self.depth());
        let mut position = index;
        for level in &self.levels[..self.depth()] {
            let sibling = level
                .get(position ^ 1)
                .copied()
                .unwrap_or(Digest32::ZERO);
            path.push(sibling);
            position /= 2;
        }
        Ok(path)
    }
}
