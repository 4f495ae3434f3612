//! # Call Context
//!
//! Who is calling and when. Every ledger operation takes one, so time and
//! identity are inputs rather than ambient globals.

use serde::{Deserialize, Serialize};

use claimdrop_core::{Address, Timestamp};

/// The sender and clock of a single ledger call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// The account invoking the operation.
    pub caller: Address,
    /// The current time as seen by the ledger.
    pub timestamp: Timestamp,
}

impl CallContext {
    /// A context at an explicit time.
    pub fn new(caller: Address, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }

    /// A context at the wall-clock time.
    pub fn now(caller: Address) -> Self {
        Self::new(caller, Timestamp::now())
    }

    /// The same caller, `secs` later.
    pub fn advanced(&self, secs: u64) -> Self {
        Self::new(self.caller, self.timestamp.plus_secs(secs))
    }
}
