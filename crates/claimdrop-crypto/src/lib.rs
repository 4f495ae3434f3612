//! # claimdrop-crypto: Cryptographic Primitives
//!
//! Provides the verification building blocks for the claim ledger:
//!
//! - **keccak256** over raw bytes and over `AbiEncoded` words.
//! - **Merkle membership** with double-hashed leaves and sorted-pair
//!   internal nodes, plus the tree builder that produces matching proofs.
//! - **EIP-712** domain separators and the `RewardsClaim` typed-data digest.
//! - **secp256k1** recoverable signatures: signing, signer recovery, and the
//!   composite authorization check.
//!
//! ## Crate Policy
//!
//! - Depends only on `claimdrop-core` internally.
//! - Hashing and curve arithmetic are delegated to `tiny-keccak` and
//!   `secp256k1`; nothing here reimplements a primitive.
//! - Verification functions return `bool`. Malformed evidence is a
//!   non-match, never a panic.

pub mod authorization;
pub mod ecdsa;
pub mod eip712;
pub mod keccak;
pub mod merkle;

pub use authorization::{sign_claim, verify_authorization};
pub use ecdsa::{recover_signer, EcdsaSignature, SigningKey};
pub use eip712::{claim_digest, claim_struct_hash, Eip712Domain};
pub use keccak::{keccak256, keccak256_abi};
pub use merkle::{hash_pair, leaf_fingerprint, verify_membership, MerkleError, MerkleTree};
