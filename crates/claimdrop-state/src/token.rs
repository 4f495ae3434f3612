//! # Token Collaborator
//!
//! The ledger never holds balances itself. It moves value through a
//! [`TokenLedger`], which may be a real token adapter or the
//! [`InMemoryToken`] used in tests and simulation.
//!
//! Methods take `&self`: an implementation may call back into the ledger
//! during a transfer, and the ledger must stay borrowable while it does.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

use claimdrop_core::{Address, Amount, CoreError};

/// Rejection from the token collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Transfers to the zero address are refused.
    #[error("transfer to the zero address")]
    ZeroRecipient,

    /// The sender cannot cover the transfer.
    #[error("insufficient balance for {holder}: has {balance}, needs {requested}")]
    InsufficientBalance {
        /// The paying account.
        holder: Address,
        /// Its balance.
        balance: Amount,
        /// The attempted transfer.
        requested: Amount,
    },

    /// A balance would exceed 2^256 - 1.
    #[error("balance overflow: {0}")]
    Overflow(#[from] CoreError),

    /// Implementation-specific refusal.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Opaque value transfer.
pub trait TokenLedger {
    /// Move `amount` from `from` to `to`. Either fully applies or has no
    /// effect.
    fn transfer(&self, from: &Address, to: &Address, amount: &Amount) -> Result<(), TokenError>;

    /// Current balance of `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;
}

/// A balance map behind a `RefCell`.
#[derive(Debug, Default)]
pub struct InMemoryToken {
    balances: RefCell<HashMap<Address, Amount>>,
}

impl InMemoryToken {
    /// An empty token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `to` out of thin air.
    pub fn mint(&self, to: &Address, amount: &Amount) -> Result<(), TokenError> {
        if to.is_zero() {
            return Err(TokenError::ZeroRecipient);
        }
        let mut balances = self.balances.borrow_mut();
        let current = balances.get(to).copied().unwrap_or(Amount::ZERO);
        balances.insert(*to, current.checked_add(*amount)?);
        Ok(())
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> Result<Amount, TokenError> {
        self.balances
            .borrow()
            .values()
            .try_fold(Amount::ZERO, |acc, b| Ok(acc.checked_add(*b)?))
    }
}

impl TokenLedger for InMemoryToken {
    fn transfer(&self, from: &Address, to: &Address, amount: &Amount) -> Result<(), TokenError> {
        if to.is_zero() {
            return Err(TokenError::ZeroRecipient);
        }
        let mut balances = self.balances.borrow_mut();
        let balance = balances.get(from).copied().unwrap_or(Amount::ZERO);
        let remaining = balance
            .checked_sub(*amount)
            .map_err(|_| TokenError::InsufficientBalance {
                holder: *from,
                balance,
                requested: *amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = balances
            .get(to)
            .copied()
            .unwrap_or(Amount::ZERO)
            .checked_add(*amount)?;
        balances.insert(*from, remaining);
        balances.insert(*to, credited);
        Ok(())
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances
            .borrow()
            .get(holder)
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}
