//! # claimdrop-core: Foundational Types
//!
//! This crate is the leaf of the claimdrop dependency graph. It defines the
//! primitives every other crate builds on, and it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for every on-wire value.** `Address` (20 bytes), `Amount`
//!    (unsigned 256-bit), `Digest32` (32 bytes). No bare byte arrays or
//!    strings cross a crate boundary.
//!
//! 2. **`AbiEncoded` newtype.** Every hash input that must match the
//!    Ethereum ABI word layout is produced through `AbiEncoder`. Leaf
//!    fingerprints and typed-data digests cannot be computed from ad hoc
//!    byte concatenation.
//!
//! 3. **Hex at the edges.** Addresses, digests and signatures serialize as
//!    `0x`-prefixed lowercase hex; amounts serialize as decimal strings so
//!    that 256-bit values survive JSON round-trips.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod amount;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod hex;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use address::Address;
pub use amount::Amount;
pub use digest::Digest32;
pub use encoding::{AbiEncoded, AbiEncoder};
pub use error::{CoreError, CryptoError};
pub use temporal::{Deadline, Timestamp};
