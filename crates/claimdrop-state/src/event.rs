//! # Ledger Events
//!
//! Change notifications emitted by successful ledger operations. Failed
//! operations emit nothing.

use serde::{Deserialize, Serialize};

use claimdrop_core::{Address, Amount, Deadline, Digest32, Timestamp};

/// A single state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// An entitlement was paid out.
    Claimed {
        /// The claimant.
        account: Address,
        /// Tokens transferred.
        amount: Amount,
    },
    /// The commitment root was rotated.
    RootUpdated {
        /// Root before the call.
        previous: Digest32,
        /// Root after the call.
        current: Digest32,
    },
    /// The claim deadline changed.
    DeadlineUpdated {
        /// Deadline before the call.
        previous: Deadline,
        /// Deadline after the call.
        current: Deadline,
    },
    /// The remaining balance was swept out.
    Withdrawn {
        /// Where the balance went.
        receiver: Address,
        /// How much was moved.
        amount: Amount,
    },
    /// Claims were suspended.
    Suspended {
        /// The owner that suspended.
        by: Address,
    },
    /// Claims were resumed.
    Resumed {
        /// The owner that resumed.
        by: Address,
    },
}

impl LedgerEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Claimed { .. } => "claimed",
            Self::RootUpdated { .. } => "root_updated",
            Self::DeadlineUpdated { .. } => "deadline_updated",
            Self::Withdrawn { .. } => "withdrawn",
            Self::Suspended { .. } => "suspended",
            Self::Resumed { .. } => "resumed",
        }
    }
}

/// An event together with when it was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Context timestamp of the emitting call.
    pub timestamp: Timestamp,
    /// The event.
    #[serde(flatten)]
    pub event: LedgerEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_event_tag() {
        let record = EventRecord {
            timestamp: Timestamp::from_secs(10),
            event: LedgerEvent::Claimed {
                account: Address::from_bytes([1; 20]),
                amount: Amount::from(5u64),
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["event"], "claimed");
        assert_eq!(json["amount"], "5");
        assert_eq!(json["timestamp"], 10);
        let back: EventRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
