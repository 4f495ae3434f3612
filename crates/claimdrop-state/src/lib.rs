//! # claimdrop-state: Claim Ledger
//!
//! The on-line half of claimdrop: a single-instance ledger that pays out
//! committed entitlements exactly once.
//!
//! ## Modules
//!
//! - **Ledger** (`ledger.rs`): the `ClaimLedger` state machine with
//!   `claim`, `update_root`, `update_deadline`, `set_suspended` and
//!   `withdraw`.
//! - **Token** (`token.rs`): the `TokenLedger` collaborator trait and an
//!   in-memory implementation.
//! - **Events** (`event.rs`): change notifications.
//! - **Context** (`context.rs`): caller identity and clock passed to every
//!   operation.
//!
//! ## Concurrency
//!
//! A ledger is single-threaded. State lives behind `Cell`/`RefCell` so
//! that a token collaborator can re-enter during a transfer and be refused
//! by the entry guard rather than by the borrow checker.

pub mod context;
pub mod error;
pub mod event;
pub mod ledger;
pub mod token;

pub use context::CallContext;
pub use error::LedgerError;
pub use event::{EventRecord, LedgerEvent};
pub use ledger::{ClaimLedger, LedgerParams};
pub use token::{InMemoryToken, TokenError, TokenLedger};
