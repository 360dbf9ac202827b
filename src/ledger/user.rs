use super::{account::Account, Amount, UserId};

/// A user owns an ordered set of accounts, fixed once the user is created.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub(crate) name: String,
    pub(crate) id: UserId,
    pub(crate) accounts: Vec<Account>,
}

impl User {
    pub fn new(name: impl Into<String>, id: impl Into<UserId>, accounts: Vec<Account>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            accounts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == account_id)
    }

    /// The sum of the balances of every account the user owns.
    pub fn balance(&self) -> Amount {
        self.accounts.iter().map(Account::balance).sum()
    }
}
