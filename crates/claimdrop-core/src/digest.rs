//! # 32-Byte Digests
//!
//! `Digest32` carries every keccak256 output in the system: leaf
//! fingerprints, tree nodes, Merkle roots, type hashes and typed-data
//! digests.
//!
//! ## Ordering
//!
//! The derived `Ord` compares the bytes lexicographically, which for a
//! fixed-width big-endian value is exactly unsigned numeric order. Pair
//! hashing in the Merkle tree relies on this.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::hex;

/// A 32-byte hash value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest32(pub [u8; 32]);

impl Digest32 {
    /// The all-zero digest. Reserved as the "invalid/unset" root sentinel
    /// and used as padding for odd tree levels.
    pub const ZERO: Digest32 = Digest32([0u8; 32]);

    /// Create a digest from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse from a 64-character hex string, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        hex::decode_fixed::<32>(s).map(Self)
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }

    /// Return a copy with bit `bit` (0 = most significant bit of byte 0)
    /// inverted.
    pub fn with_bit_flipped(&self, bit: usize) -> Self {
        let mut out = self.0;
        out[(bit / 8) % 32] ^= 0x80 >> (bit % 8);
        Self(out)
    }
}

impl FromStr for Digest32 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Digest32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest32({}...)", hex::prefix(&self.0))
    }
}

impl std::fmt::Display for Digest32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
