//! # ABI Word Encoding
//!
//! This module defines `AbiEncoded`, the sole construction path for bytes
//! that feed a leaf fingerprint or a typed-data struct hash.
//!
//! ## Security Invariant
//!
//! `AbiEncoded` has a private inner field and is only produced by
//! [`AbiEncoder::finish`]. Every value is appended as one 32-byte word in the
//! Ethereum ABI static layout:
//!
//! - `address`: 12 zero bytes followed by the 20 address bytes.
//! - `uint256`: 32-byte big-endian.
//! - `bytes32`: the raw 32 bytes.
//!
//! Hash functions in `claimdrop-crypto` accept `&AbiEncoded`, so a leaf or
//! struct hash cannot be computed from a packed or otherwise mis-laid-out
//! byte string. A packed encoding of `(address, uint256)` is 52 bytes; the
//! word encoding is 64, and only the latter matches the commitment builder.

use crate::address::Address;
use crate::amount::Amount;
use crate::digest::Digest32;

/// Bytes produced exclusively by [`AbiEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbiEncoded(Vec<u8>);

impl AbiEncoded {
    /// Start a new encoding.
    pub fn builder() -> AbiEncoder {
        AbiEncoder::default()
    }

    /// `abi.encode(account, amount)`: the entitlement tuple.
    pub fn entitlement(account: &Address, amount: &Amount) -> Self {
        Self::builder().address(account).uint(amount).finish()
    }

    /// Access the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes (always a multiple of 32).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no words were encoded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Appends static ABI words.
#[derive(Debug, Default)]
pub struct AbiEncoder {
    buf: Vec<u8>,
}

impl AbiEncoder {
    /// Append an `address` word.
    pub fn address(mut self, value: &Address) -> Self {
        self.buf.extend_from_slice(&value.to_word());
        self
    }

    /// Append a `uint256` word.
    pub fn uint(mut self, value: &Amount) -> Self {
        self.buf.extend_from_slice(&value.to_word());
        self
    }

    /// Append a `uint256` word from a `u64` (chain ids, timestamps).
    pub fn uint64(mut self, value: u64) -> Self {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        self.buf.extend_from_slice(&word);
        self
    }

    /// Append a `bytes32` word.
    pub fn bytes32(mut self, value: &Digest32) -> Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Finish encoding.
    pub fn finish(self) -> AbiEncoded {
        AbiEncoded(self.buf)
    }
}
