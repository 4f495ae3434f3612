//! # Commitment Errors

use thiserror::Error;

use claimdrop_core::{Address, CoreError};
use claimdrop_crypto::MerkleError;

/// Error reading a source, building a tree, or verifying a bundle.
#[derive(Error, Debug)]
pub enum CommitmentError {
    /// The source's field types are not `["address", "uint"]`.
    #[error("unsupported field types {found:?}; expected [\"address\", \"uint\"]")]
    UnsupportedTypes {
        /// The declared types.
        found: Vec<String>,
    },

    /// `count` disagrees with the number of value rows.
    #[error("source declares count {declared} but has {actual} value rows")]
    CountMismatch {
        /// The declared count.
        declared: usize,
        /// Rows actually present.
        actual: usize,
    },

    /// A value row between `0` and `count - 1` is missing.
    #[error("missing value row {index}")]
    MissingRow {
        /// The missing row index.
        index: usize,
    },

    /// A field of a value row is missing.
    #[error("row {index} is missing field {field}")]
    MissingField {
        /// The row index.
        index: usize,
        /// The missing field position.
        field: usize,
    },

    /// A field value could not be parsed.
    #[error("row {index} field {field}: {source}")]
    InvalidValue {
        /// The row index.
        index: usize,
        /// The field position.
        field: usize,
        /// The parse failure.
        source: CoreError,
    },

    /// The same account appears twice. Claims are keyed by account, so the
    /// second entry could never be claimed.
    #[error("account {account} appears at rows {first} and {second}")]
    DuplicateAccount {
        /// The repeated account.
        account: Address,
        /// First row.
        first: usize,
        /// Repeating row.
        second: usize,
    },

    /// A bundle record failed re-verification.
    #[error("bundle record {index} does not verify: {reason}")]
    InvalidRecord {
        /// The record index.
        index: usize,
        /// What did not match.
        reason: String,
    },

    /// Tree construction failed.
    #[error("merkle error: {0}")]
    Merkle(#[from] MerkleError),

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// File IO failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
