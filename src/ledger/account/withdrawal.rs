use crate::ledger::Amount;

use super::{
    account::{Account, TransactionError},
    balance::Balance,
};

impl Account {
    /// What the balance would be after withdrawing `amount`.
    /// Withdrawing more than what the account holds is never allowed.
    pub(crate) fn balance_after_withdrawal(
        &self,
        amount: Amount,
        cap: Amount,
    ) -> Result<Balance, TransactionError> {
        Self::check_amount(amount, cap)?;

        if amount > self.balance() {
            return Err(TransactionError::InsufficientFunds);
        }

        self.balance.debited(amount)
    }

    pub(crate) fn withdraw(&mut self, amount: Amount, cap: Amount) -> Result<(), TransactionError> {
        self.balance = self.balance_after_withdrawal(amount, cap)?;

        Ok(())
    }
}
