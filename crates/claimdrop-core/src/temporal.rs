//! # Temporal Types: Timestamps and Claim Deadlines
//!
//! `Timestamp` is a Unix-seconds instant, the only clock resolution the
//! claim ledger compares against. `Deadline` is the claim window bound, where
//! the wire value `0` means "no deadline".
//!
//! ## Boundary Semantics
//!
//! - A claim at exactly the deadline is inside the window
//!   ([`Deadline::has_passed`] is strict `>`).
//! - Withdrawal is blocked while `now < deadline`
//!   ([`Deadline::is_before`] is strict `<`), so at `now == deadline` both
//!   claiming and withdrawing are permitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Seconds since the Unix epoch, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Current UTC time, truncated to seconds. Pre-epoch clocks clamp to 0.
    pub fn now() -> Self {
        Self(u64::try_from(Utc::now().timestamp()).unwrap_or(0))
    }

    /// Construct from Unix seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Unix seconds.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Parse an RFC 3339 string, converting any offset to UTC.
    pub fn parse_rfc3339(s: &str) -> Result<Self, CoreError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| CoreError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        let secs = u64::try_from(dt.with_timezone(&Utc).timestamp())
            .map_err(|_| CoreError::InvalidTimestamp(format!("{s:?} is before the epoch")))?;
        Ok(Self(secs))
    }

    /// `self + secs`, saturating.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ`. Out-of-range values fall back to
    /// the raw seconds.
    pub fn to_rfc3339(&self) -> String {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            .unwrap_or_else(|| format!("@{}", self.0))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// The end of the claim window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deadline {
    /// No deadline: claims never expire and withdrawal is never time-gated.
    #[default]
    Unset,
    /// Claims are accepted up to and including this instant.
    At(Timestamp),
}

impl Deadline {
    /// Decode the wire form, where `0` means unset.
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Self::Unset
        } else {
            Self::At(Timestamp::from_secs(secs))
        }
    }

    /// Encode to the wire form.
    pub fn as_secs(&self) -> u64 {
        match self {
            Self::Unset => 0,
            Self::At(ts) => ts.as_secs(),
        }
    }

    /// Whether a deadline is configured.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Whether `now` is strictly after the deadline. Always false when unset.
    pub fn has_passed(&self, now: Timestamp) -> bool {
        match self {
            Self::Unset => false,
            Self::At(end) => now > *end,
        }
    }

    /// Whether `now` is strictly before the deadline. Always false when unset.
    pub fn is_before(&self, now: Timestamp) -> bool {
        match self {
            Self::Unset => false,
            Self::At(end) => now < *end,
        }
    }
}

impl std::fmt::Display for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => f.write_str("unset"),
            Self::At(ts) => write!(f, "{ts}"),
        }
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_secs())
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_secs)
    }
}
