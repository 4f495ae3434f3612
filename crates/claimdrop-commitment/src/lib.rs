//! # claimdrop-commitment: Offline Commitment Builder
//!
//! Turns an entitlement list into the artifacts the on-line ledger
//! consumes:
//!
//! - **Source** (`source.rs`): the `{types, count, values}` entitlement
//!   input file.
//! - **Builder** (`builder.rs`): one leaf fingerprint per entry, the
//!   sorted-pair Merkle tree, and its root.
//! - **Bundle** (`bundle.rs`): the `[{inputs, proof, root, leaf}]` proof
//!   file handed to claimants, plus re-verification of a bundle against its
//!   own root.
//!
//! ## Crate Policy
//!
//! - Tree hashing is delegated to `claimdrop_crypto::merkle`; the builder
//!   and the verifier cannot drift apart.
//! - Entry order is preserved: entry `i` of the source is record `i` of the
//!   bundle and leaf `i` of the tree.

pub mod builder;
pub mod bundle;
pub mod error;
pub mod source;

pub use builder::{Commitment, Entitlement};
pub use bundle::{ProofBundle, ProofRecord};
pub use error::CommitmentError;
pub use source::{EntitlementSource, FieldType};
