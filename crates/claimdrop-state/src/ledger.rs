//! # Claim Ledger State Machine
//!
//! Holds the commitment root, the claim deadline, the suspension flag and
//! the set of accounts that have claimed, and moves tokens through a
//! [`TokenLedger`] collaborator.
//!
//! ## States
//!
//! ```text
//! per account:   Unclaimed ──claim──▶ Claimed (terminal)
//!
//! global:        Active ──set_suspended(true)──▶ Suspended
//!                  ▲                                 │
//!                  └──────set_suspended(false)───────┘
//! ```
//!
//! ## Claim Checks
//!
//! `claim` rejects, in this order: suspended, re-entered, past the
//! deadline, already claimed, bad signature, bad proof. The first failing
//! check determines the error.
//!
//! ## Security Invariants
//!
//! - The claimed mark is written before the token transfer and rolled back
//!   if the transfer fails. A callback from the token sees the account as
//!   claimed.
//! - `claim` and `withdraw` share one entry guard. Nested entry from a
//!   token callback fails with [`LedgerError::Reentrancy`].
//! - No `RefCell` borrow is held across a call into the token.
//! - The claimed set survives root rotation. An account claims at most
//!   once for the lifetime of the ledger.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use claimdrop_core::{Address, Amount, Deadline, Digest32, Timestamp};
use claimdrop_crypto::eip712::{claim_digest, Eip712Domain};
use claimdrop_crypto::merkle::{leaf_fingerprint, verify_membership};
use claimdrop_crypto::{verify_authorization, EcdsaSignature};

use crate::context::CallContext;
use crate::error::LedgerError;
use crate::event::{EventRecord, LedgerEvent};
use crate::token::TokenLedger;

// ─── Construction Parameters ─────────────────────────────────────────

/// Everything needed to open a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Account allowed to run administrative operations.
    pub owner: Address,
    /// Identity of the token being distributed.
    pub token: Address,
    /// The ledger's own account. Holds the undistributed balance.
    pub address: Address,
    /// Initial commitment root.
    pub root: Digest32,
    /// Initial claim deadline.
    pub deadline: Deadline,
    /// Signing domain. Its verifying contract must be `address`.
    pub domain: Eip712Domain,
}

// ─── Entry Guard ─────────────────────────────────────────────────────

/// Holds the entered flag for the duration of a guarded call.
struct EntryGuard<'a> {
    entered: &'a Cell<bool>,
}

impl<'a> EntryGuard<'a> {
    fn acquire(entered: &'a Cell<bool>) -> Result<Self, LedgerError> {
        if entered.replace(true) {
            return Err(LedgerError::Reentrancy);
        }
        Ok(Self { entered })
    }
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        self.entered.set(false);
    }
}

// ─── Ledger ──────────────────────────────────────────────────────────

#[derive(Debug)]
struct LedgerState {
    root: Digest32,
    deadline: Deadline,
    suspended: bool,
    claimed: HashSet<Address>,
    events: Vec<EventRecord>,
}

/// A single claim distribution.
///
/// All operations take `&self` so that a token collaborator can hold a
/// handle to the ledger and call back into it.
pub struct ClaimLedger {
    owner: Address,
    token_address: Address,
    address: Address,
    domain: Eip712Domain,
    domain_separator: Digest32,
    token: Rc<dyn TokenLedger>,
    entered: Cell<bool>,
    state: RefCell<LedgerState>,
}

impl std::fmt::Debug for ClaimLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimLedger")
            .field("owner", &self.owner)
            .field("token", &self.token_address)
            .field("address", &self.address)
            .field("domain_separator", &self.domain_separator)
            .field("entered", &self.entered.get())
            .field("state", &self.state)
            .finish()
    }
}

impl ClaimLedger {
    /// Open a ledger. `now` is used to validate the initial deadline.
    pub fn new(
        params: LedgerParams,
        token: Rc<dyn TokenLedger>,
        now: Timestamp,
    ) -> Result<Self, LedgerError> {
        for (field, value) in [
            ("owner", &params.owner),
            ("token", &params.token),
            ("address", &params.address),
        ] {
            if value.is_zero() {
                return Err(LedgerError::ZeroAddress { field });
            }
        }
        if params.root.is_zero() {
            return Err(LedgerError::InvalidRoot);
        }
        if params.deadline.has_passed(now) {
            return Err(LedgerError::EndTimeInPast {
                deadline: params.deadline,
                now,
            });
        }
        if params.domain.verifying_contract != params.address {
            return Err(LedgerError::DomainMismatch {
                domain: params.domain.verifying_contract,
                ledger: params.address,
            });
        }

        let domain_separator = params.domain.separator();
        tracing::info!(
            owner = %params.owner,
            address = %params.address,
            root = %params.root,
            deadline = %params.deadline,
            domain_separator = %domain_separator,
            "opened claim ledger"
        );

        Ok(Self {
            owner: params.owner,
            token_address: params.token,
            address: params.address,
            domain: params.domain,
            domain_separator,
            token,
            entered: Cell::new(false),
            state: RefCell::new(LedgerState {
                root: params.root,
                deadline: params.deadline,
                suspended: false,
                claimed: HashSet::new(),
                events: Vec::new(),
            }),
        })
    }

    // ─── Queries ─────────────────────────────────────────────────────

    /// The administrative account.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Identity of the distributed token.
    pub fn token(&self) -> Address {
        self.token_address
    }

    /// The ledger's own account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The current commitment root.
    pub fn root(&self) -> Digest32 {
        self.state.borrow().root
    }

    /// The current claim deadline.
    pub fn deadline(&self) -> Deadline {
        self.state.borrow().deadline
    }

    /// Whether claims are suspended.
    pub fn is_suspended(&self) -> bool {
        self.state.borrow().suspended
    }

    /// Whether `account` has claimed.
    pub fn is_claimed(&self, account: &Address) -> bool {
        self.state.borrow().claimed.contains(account)
    }

    /// Number of accounts that have claimed.
    pub fn claimed_count(&self) -> usize {
        self.state.borrow().claimed.len()
    }

    /// The signing domain.
    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// The signing domain separator.
    pub fn domain_separator(&self) -> Digest32 {
        self.domain_separator
    }

    /// The digest `account` must sign to claim `amount` here.
    pub fn claim_digest(&self, account: &Address, amount: &Amount) -> Digest32 {
        claim_digest(&self.domain_separator, account, amount)
    }

    /// Undistributed token balance held by the ledger.
    pub fn balance(&self) -> Amount {
        self.token.balance_of(&self.address)
    }

    /// All events emitted so far.
    pub fn events(&self) -> Vec<EventRecord> {
        self.state.borrow().events.clone()
    }

    /// Drain the event log.
    pub fn take_events(&self) -> Vec<EventRecord> {
        std::mem::take(&mut self.state.borrow_mut().events)
    }

    // ─── Claim ───────────────────────────────────────────────────────

    /// Pay `amount` to `account` if both the signature and the membership
    /// proof check out. Open to any caller.
    pub fn claim(
        &self,
        ctx: &CallContext,
        account: &Address,
        amount: &Amount,
        proof: &[Digest32],
        signature: &EcdsaSignature,
    ) -> Result<(), LedgerError> {
        let result = self.try_claim(ctx, account, amount, proof, signature);
        match &result {
            Ok(()) => tracing::info!(
                %account,
                %amount,
                caller = %ctx.caller,
                at = %ctx.timestamp,
                "claim paid"
            ),
            Err(e) => tracing::warn!(
                %account,
                %amount,
                caller = %ctx.caller,
                at = %ctx.timestamp,
                error = %e,
                "claim rejected"
            ),
        }
        result
    }

    fn try_claim(
        &self,
        ctx: &CallContext,
        account: &Address,
        amount: &Amount,
        proof: &[Digest32],
        signature: &EcdsaSignature,
    ) -> Result<(), LedgerError> {
        if self.is_suspended() {
            return Err(LedgerError::ClaimsSuspended);
        }
        let _guard = EntryGuard::acquire(&self.entered)?;

        let (root, deadline, already_claimed) = {
            let state = self.state.borrow();
            (state.root, state.deadline, state.claimed.contains(account))
        };
        if deadline.has_passed(ctx.timestamp) {
            return Err(LedgerError::ClaimWindowFinished { deadline });
        }
        if already_claimed {
            return Err(LedgerError::AlreadyClaimed { account: *account });
        }
        if !verify_authorization(account, amount, signature, account, &self.domain_separator) {
            return Err(LedgerError::InvalidSignature { account: *account });
        }
        if !verify_membership(proof, &root, &leaf_fingerprint(account, amount)) {
            return Err(LedgerError::InvalidProof { account: *account });
        }

        self.state.borrow_mut().claimed.insert(*account);
        if let Err(e) = self.token.transfer(&self.address, account, amount) {
            self.state.borrow_mut().claimed.remove(account);
            return Err(e.into());
        }
        self.emit(
            ctx,
            LedgerEvent::Claimed {
                account: *account,
                amount: *amount,
            },
        );
        Ok(())
    }

    // ─── Administration ──────────────────────────────────────────────

    /// Rotate the commitment root. Accounts that already claimed stay
    /// claimed.
    pub fn update_root(&self, ctx: &CallContext, new_root: Digest32) -> Result<(), LedgerError> {
        self.only_owner(ctx)?;
        if new_root.is_zero() {
            return Err(LedgerError::InvalidRoot);
        }
        let previous = std::mem::replace(&mut self.state.borrow_mut().root, new_root);
        tracing::info!(%previous, current = %new_root, "commitment root updated");
        self.emit(
            ctx,
            LedgerEvent::RootUpdated {
                previous,
                current: new_root,
            },
        );
        Ok(())
    }

    /// Move the claim deadline. [`Deadline::Unset`] removes it.
    pub fn update_deadline(
        &self,
        ctx: &CallContext,
        new_deadline: Deadline,
    ) -> Result<(), LedgerError> {
        self.only_owner(ctx)?;
        if new_deadline.has_passed(ctx.timestamp) {
            return Err(LedgerError::EndTimeInPast {
                deadline: new_deadline,
                now: ctx.timestamp,
            });
        }
        let previous = std::mem::replace(&mut self.state.borrow_mut().deadline, new_deadline);
        tracing::info!(%previous, current = %new_deadline, "claim deadline updated");
        self.emit(
            ctx,
            LedgerEvent::DeadlineUpdated {
                previous,
                current: new_deadline,
            },
        );
        Ok(())
    }

    /// Suspend (`true`) or resume (`false`) claims. Repeating the current
    /// setting is rejected.
    pub fn set_suspended(&self, ctx: &CallContext, suspended: bool) -> Result<(), LedgerError> {
        self.only_owner(ctx)?;
        let current = self.is_suspended();
        match (current, suspended) {
            (true, true) => return Err(LedgerError::ClaimsSuspended),
            (false, false) => return Err(LedgerError::NotSuspended),
            _ => {}
        }
        self.state.borrow_mut().suspended = suspended;
        let event = if suspended {
            LedgerEvent::Suspended { by: ctx.caller }
        } else {
            LedgerEvent::Resumed { by: ctx.caller }
        };
        tracing::info!(by = %ctx.caller, suspended, "claim suspension changed");
        self.emit(ctx, event);
        Ok(())
    }

    /// Sweep the whole remaining balance to `receiver`. Requires claims to
    /// be suspended and the deadline, if any, to have been reached.
    pub fn withdraw(&self, ctx: &CallContext, receiver: &Address) -> Result<Amount, LedgerError> {
        self.only_owner(ctx)?;
        if !self.is_suspended() {
            return Err(LedgerError::NotSuspended);
        }
        let _guard = EntryGuard::acquire(&self.entered)?;

        let deadline = self.deadline();
        if deadline.is_before(ctx.timestamp) {
            return Err(LedgerError::NoWithdrawDuringClaim { deadline });
        }

        let amount = self.balance();
        self.token.transfer(&self.address, receiver, &amount)?;
        tracing::info!(%receiver, %amount, "remaining balance withdrawn");
        self.emit(
            ctx,
            LedgerEvent::Withdrawn {
                receiver: *receiver,
                amount,
            },
        );
        Ok(amount)
    }

    // ─── Internals ───────────────────────────────────────────────────

    fn only_owner(&self, ctx: &CallContext) -> Result<(), LedgerError> {
        if ctx.caller != self.owner {
            tracing::warn!(caller = %ctx.caller, "owner-only operation refused");
            return Err(LedgerError::Unauthorized { caller: ctx.caller });
        }
        Ok(())
    }

    fn emit(&self, ctx: &CallContext, event: LedgerEvent) {
        tracing::debug!(event = event.name(), at = %ctx.timestamp, "ledger event");
        self.state.borrow_mut().events.push(EventRecord {
            timestamp: ctx.timestamp,
            event,
        });
    }
}
