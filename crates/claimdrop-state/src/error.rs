//! # Ledger Errors
//!
//! Every rejection is synchronous and leaves the ledger exactly as it was
//! before the call.

use thiserror::Error;

use claimdrop_core::{Address, Deadline, Timestamp};

use crate::token::TokenError;

/// Rejection from a ledger operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // ─── Input validity ──────────────────────────────────────────────
    /// A required address parameter is zero.
    #[error("{field} must not be the zero address")]
    ZeroAddress {
        /// Which parameter.
        field: &'static str,
    },

    /// The commitment root is the zero digest.
    #[error("commitment root must not be zero")]
    InvalidRoot,

    /// A non-zero deadline earlier than the current time.
    #[error("deadline {deadline} is before current time {now}")]
    EndTimeInPast {
        /// The requested deadline.
        deadline: Deadline,
        /// The call's timestamp.
        now: Timestamp,
    },

    /// The signing domain names a different verifying contract than the
    /// ledger's own address.
    #[error("domain verifying contract {domain} does not match ledger address {ledger}")]
    DomainMismatch {
        /// The domain's verifying contract.
        domain: Address,
        /// The ledger's address.
        ledger: Address,
    },

    // ─── Authorization ───────────────────────────────────────────────
    /// The claim signature does not recover to the claimant.
    #[error("claim signature is not from {account}")]
    InvalidSignature {
        /// The claimant.
        account: Address,
    },

    /// The membership proof does not fold to the current root.
    #[error("membership proof for {account} does not match the current root")]
    InvalidProof {
        /// The claimant.
        account: Address,
    },

    // ─── State conflict ──────────────────────────────────────────────
    /// The account has already claimed.
    #[error("{account} has already claimed")]
    AlreadyClaimed {
        /// The claimant.
        account: Address,
    },

    /// The claim window has closed.
    #[error("claim window closed at {deadline}")]
    ClaimWindowFinished {
        /// The deadline that passed.
        deadline: Deadline,
    },

    /// The operation needs claims to be suspended.
    #[error("claims are not suspended")]
    NotSuspended,

    /// The operation needs claims to be active.
    #[error("claims are suspended")]
    ClaimsSuspended,

    /// Withdrawal attempted before the deadline.
    #[error("cannot withdraw before the claim deadline {deadline}")]
    NoWithdrawDuringClaim {
        /// The pending deadline.
        deadline: Deadline,
    },

    /// A guarded operation was entered while another was in progress.
    #[error("reentrant call")]
    Reentrancy,

    // ─── Access control ──────────────────────────────────────────────
    /// An owner-only operation called by someone else.
    #[error("{caller} is not the ledger owner")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    // ─── Collaborator ────────────────────────────────────────────────
    /// The token transfer failed.
    #[error("token transfer failed: {0}")]
    Token(#[from] TokenError),
}
