//! # Amount
//!
//! Unsigned 256-bit token amounts, wrapping `primitive_types::U256`.
//!
//! Amounts serialize as base-10 strings. JSON numbers lose precision above
//! 2^53 in most consumers, and entitlement values are routinely 10^18-scaled.

use std::str::FromStr;

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// An unsigned 256-bit token amount.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(U256);

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(U256([0; 4]));

    /// Wrap a raw `U256`.
    pub fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// The raw `U256`.
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a base-10 string. Leading `+`, signs, whitespace inside the
    /// digits and hex are rejected.
    pub fn parse_decimal(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidAmount {
                input: s.to_string(),
                reason: "expected base-10 digits".to_string(),
            });
        }
        U256::from_dec_str(trimmed)
            .map(Self)
            .map_err(|e| CoreError::InvalidAmount {
                input: s.to_string(),
                reason: format!("{e:?}"),
            })
    }

    /// `value × 10^decimals`, e.g. `Amount::scaled(25, 18)` for 25 tokens.
    pub fn scaled(value: u64, decimals: u32) -> Result<Self, CoreError> {
        let factor = U256::from(10u8)
            .checked_pow(U256::from(decimals))
            .ok_or_else(|| CoreError::Overflow(format!("10^{decimals}")))?;
        U256::from(value)
            .checked_mul(factor)
            .map(Self)
            .ok_or_else(|| CoreError::Overflow(format!("{value} * 10^{decimals}")))
    }

    /// The amount as a 32-byte big-endian ABI word.
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        self.0.to_big_endian(&mut word);
        word
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Amount) -> Result<Amount, CoreError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| CoreError::Overflow(format!("{self} + {other}")))
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, other: Amount) -> Result<Amount, CoreError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| CoreError::Overflow(format!("{self} - {other}")))
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for Amount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(s)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_decimal(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
