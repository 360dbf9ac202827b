use crate::ledger::Amount;

use super::account::TransactionError;

/// A balance is a sum of credits (adds money to the balance)
/// and debits (remove money from the balance).
///
/// Only the running totals are kept here. The individual movements live in
/// the ledger's `History`, which is what makes the balance auditable.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    credit: Amount,
    debit: Amount,
}

impl Balance {
    pub const fn new(credit: Amount, debit: Amount) -> Self {
        Self { credit, debit }
    }

    pub fn zero() -> Self {
        Self::new(Amount::ZERO, Amount::ZERO)
    }

    pub fn amount(&self) -> Amount {
        self.credit - self.debit
    }

    /// The balance after crediting `amount`, leaving `self` untouched.
    pub fn credited(&self, amount: Amount) -> Result<Self, TransactionError> {
        let credit = self
            .credit
            .checked_add(amount)
            .ok_or(TransactionError::Overflow)?;

        Ok(Self::new(credit, self.debit))
    }

    /// The balance after debiting `amount`, leaving `self` untouched.
    pub fn debited(&self, amount: Amount) -> Result<Self, TransactionError> {
        let debit = self
            .debit
            .checked_add(amount)
            .ok_or(TransactionError::Overflow)?;

        Ok(Self::new(self.credit, debit))
    }
}
