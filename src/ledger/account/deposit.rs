use crate::ledger::Amount;

use super::{
    account::{Account, TransactionError},
    balance::Balance,
};

impl Account {
    /// What the balance would be after depositing `amount`.
    pub(crate) fn balance_after_deposit(
        &self,
        amount: Amount,
        cap: Amount,
    ) -> Result<Balance, TransactionError> {
        Self::check_amount(amount, cap)?;
        self.balance.credited(amount)
    }

    pub(crate) fn deposit(&mut self, amount: Amount, cap: Amount) -> Result<(), TransactionError> {
        self.balance = self.balance_after_deposit(amount, cap)?;

        Ok(())
    }
}
