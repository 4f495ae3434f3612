//! # Error Types
//!
//! Errors raised while parsing or constructing the foundational types, plus
//! the cryptographic error type shared with `claimdrop-crypto`. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error constructing or parsing a foundational value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A hex string contained a non-hex character or had odd length.
    #[error("invalid hex: {reason}")]
    InvalidHex {
        /// What was wrong with the input.
        reason: String,
    },

    /// A hex string decoded to the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required byte length.
        expected: usize,
        /// Decoded byte length.
        actual: usize,
    },

    /// An amount string was not a base-10 unsigned integer in range.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Checked arithmetic on an amount overflowed or underflowed.
    #[error("amount arithmetic overflow: {0}")]
    Overflow(String),

    /// A timestamp could not be represented.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Error in cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// A signature could not be parsed.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Public-key recovery from a signature failed.
    #[error("signer recovery failed: {0}")]
    RecoveryFailed(String),
}

impl From<CoreError> for CryptoError {
    fn from(e: CoreError) -> Self {
        Self::KeyError(e.to_string())
    }
}
