use crate::ledger::{AccountId, Amount};

use super::balance::Balance;

/// Note: I chose to keep errors simple here, so they stay cheap to compare.
/// The context (which transaction, which accounts) travels next to the error
/// instead, see `process::Rejection`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionError {
    /// The amount is above the per-transaction cap.
    #[error("amount exceeds the per-transaction limit")]
    LimitExceeded,

    /// Funds in the account are insufficient for a withdrawal or transfer.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Zero or negative amounts never move money.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The operation references an account the ledger doesn't know about.
    #[error("unknown account")]
    UnknownAccount,

    /// A transfer's source and destination are the same account.
    #[error("cannot transfer from an account to itself")]
    SameAccount,

    /// A user with the same ID is already registered.
    #[error("user already registered")]
    DuplicateUser,

    /// An account with the same ID is already registered.
    #[error("account already registered")]
    DuplicateAccount,

    /// Adding more money to the balance would overflow.
    #[error("balance would overflow")]
    Overflow,
}

/// An account is where funds are stored.
///
/// Accounts are owned by a `User`, and only the `Ledger` mutates them, so
/// every balance change has a matching entry in the ledger's history.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub(crate) id: AccountId,
    pub(crate) balance: Balance,
}

impl Account {
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            balance: Balance::zero(),
        }
    }

    /// An account opened with some funds already in it.
    pub fn with_balance(id: impl Into<AccountId>, opening: Amount) -> Self {
        Self {
            id: id.into(),
            balance: Balance::new(opening, Amount::ZERO),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> Amount {
        self.balance.amount()
    }

    // Every operation moves a strictly positive amount, no larger than the cap.
    pub(super) fn check_amount(amount: Amount, cap: Amount) -> Result<(), TransactionError> {
        if amount <= Amount::ZERO {
            return Err(TransactionError::InvalidAmount);
        }

        if amount > cap {
            return Err(TransactionError::LimitExceeded);
        }

        Ok(())
    }
}
