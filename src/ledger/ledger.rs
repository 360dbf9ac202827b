use super::account::{Account, Balance, TransactionError};
use super::history::{Entry, History};
use super::transaction::{self, Transaction};
use super::user::User;
use super::{AccountId, Amount, TransactionId, UserId};
use crate::config::Config;

use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

// Where an account lives: the index of its owner in `Ledger::users`, then
// its index in that user's accounts.
type Handle = (usize, usize);

/// The ledger owns every user (and through them, every account) as well as
/// the history of all the amounts applied to them.
///
/// Balances are only ever mutated here, and each mutation records its history
/// entries within the same call, once all the checks have passed. Either both
/// happen or neither does.
#[derive(Debug)]
pub struct Ledger {
    config: Config,
    users: Vec<User>,
    user_index: HashMap<UserId, usize>,
    account_index: HashMap<AccountId, Handle>,
    history: History,
    next_tx_id: TransactionId,
}

/// The final state of an account, along with its history.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub user_id: UserId,
    pub account_id: AccountId,
    pub balance: Amount,
    pub history: Vec<Amount>,
}

// State of the accounts touched by a batch, so it can be undone.
struct Checkpoint {
    accounts: Vec<(Handle, Balance, usize)>,
    next_tx_id: TransactionId,
}

impl Ledger {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            users: Vec::new(),
            user_index: HashMap::new(),
            account_index: HashMap::new(),
            history: History::new(),
            next_tx_id: 1,
        }
    }

    /// The largest amount a single operation may move.
    pub fn cap(&self) -> Amount {
        self.config.max_transaction_amount
    }

    /// Adds a user and their accounts to the ledger.
    ///
    /// User IDs and account IDs must be unique across the whole ledger.
    /// An account opened with a nonzero balance gets that balance recorded as
    /// its first history entry. Accounts can't be opened overdrawn.
    pub fn register(&mut self, user: User) -> Result<(), TransactionError> {
        if self.user_index.contains_key(user.id()) {
            return Err(TransactionError::DuplicateUser);
        }

        let mut seen = HashSet::new();
        for account in user.accounts() {
            if self.account_index.contains_key(account.id()) || !seen.insert(account.id()) {
                return Err(TransactionError::DuplicateAccount);
            }
            if account.balance() < Amount::ZERO {
                return Err(TransactionError::InvalidAmount);
            }
        }

        let user_idx = self.users.len();
        for (account_idx, account) in user.accounts().iter().enumerate() {
            self.account_index
                .insert(account.id.clone(), (user_idx, account_idx));

            let opening = account.balance();
            if !opening.is_zero() {
                let tx_id = self.next_tx_id();
                self.history.record(&account.id, tx_id, opening);
            }
        }

        info!(
            user = %user.id,
            name = user.name(),
            accounts = user.accounts().len(),
            "registered user"
        );

        self.user_index.insert(user.id.clone(), user_idx);
        self.users.push(user);

        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.user_index.get(user_id).map(|idx| &self.users[*idx])
    }

    /// The sum of the balances of all the accounts a user owns.
    pub fn user_balance(&self, user_id: &str) -> Option<Amount> {
        self.user(user_id).map(User::balance)
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.account_index
            .get(account_id)
            .map(|handle| self.account_at(*handle))
    }

    /// The signed amounts applied to an account, oldest first.
    pub fn history(&self, account_id: &str) -> Vec<Amount> {
        self.history.amounts(account_id)
    }

    pub fn entries(&self, account_id: &str) -> &[Entry] {
        self.history.entries(account_id)
    }

    /// Every account along with its history, in registration order.
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.users.iter().flat_map(move |user| {
            user.accounts.iter().map(move |account| Statement {
                user_id: user.id.clone(),
                account_id: account.id.clone(),
                balance: account.balance(),
                history: self.history.amounts(&account.id),
            })
        })
    }

    pub fn deposit(
        &mut self,
        account_id: &str,
        amount: Amount,
    ) -> Result<TransactionId, TransactionError> {
        let handle = self.handle(account_id)?;
        let cap = self.cap();
        self.account_at_mut(handle).deposit(amount, cap)?;

        let tx_id = self.next_tx_id();
        self.history.record(account_id, tx_id, amount);
        debug!(tx_id, account = account_id, %amount, "deposit");

        Ok(tx_id)
    }

    pub fn withdraw(
        &mut self,
        account_id: &str,
        amount: Amount,
    ) -> Result<TransactionId, TransactionError> {
        let handle = self.handle(account_id)?;
        let cap = self.cap();
        self.account_at_mut(handle).withdraw(amount, cap)?;

        let tx_id = self.next_tx_id();
        self.history.record(account_id, tx_id, -amount);
        debug!(tx_id, account = account_id, %amount, "withdrawal");

        Ok(tx_id)
    }

    /// Moves `amount` from one account to another, possibly owned by
    /// different users.
    ///
    /// The amount must not exceed the cap, and the source account must hold
    /// at least that much.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<TransactionId, TransactionError> {
        let from_handle = self.handle(from)?;
        let to_handle = self.handle(to)?;
        if from_handle == to_handle {
            return Err(TransactionError::SameAccount);
        }

        // Both new balances are computed before either account is written.
        let cap = self.cap();
        let from_balance = self
            .account_at(from_handle)
            .balance_after_withdrawal(amount, cap)?;
        let to_balance = self.account_at(to_handle).balance_after_deposit(amount, cap)?;

        self.account_at_mut(from_handle).balance = from_balance;
        self.account_at_mut(to_handle).balance = to_balance;

        let tx_id = self.next_tx_id();
        self.history.record(from, tx_id, -amount);
        self.history.record(to, tx_id, amount);
        debug!(tx_id, from, to, %amount, "transfer");

        Ok(tx_id)
    }

    /// Transfers any amount by splitting it into as many transfers as the
    /// cap requires, e.g. 25 000 with a cap of 10 000 becomes 10 000, 10 000
    /// and 5 000.
    ///
    /// Each transfer is validated on its own, but the batch is all-or-nothing:
    /// if one of them fails, balances and history are restored to what they
    /// were before the call, and that failure is returned.
    pub fn transfer_in_batches(
        &mut self,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<Vec<TransactionId>, TransactionError> {
        let from_handle = self.handle(from)?;
        let to_handle = self.handle(to)?;
        if from_handle == to_handle {
            return Err(TransactionError::SameAccount);
        }
        if amount <= Amount::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        // No amount fits under a cap that isn't positive.
        let cap = self.cap();
        if cap <= Amount::ZERO {
            return Err(TransactionError::LimitExceeded);
        }

        let checkpoint = self.checkpoint(&[(from_handle, from), (to_handle, to)]);

        let mut tx_ids = Vec::new();
        let mut remaining = amount;
        while remaining > Amount::ZERO {
            let chunk = remaining.min(cap);
            match self.transfer(from, to, chunk) {
                Ok(tx_id) => tx_ids.push(tx_id),
                Err(err) => {
                    debug!(from, to, %amount, transferred = tx_ids.len(), "rolling back batch");
                    self.rollback(checkpoint);
                    return Err(err);
                }
            }
            remaining -= chunk;
        }

        Ok(tx_ids)
    }

    /// Applies an incoming transaction. Transfers above the cap are split
    /// into batches, deposits and withdrawals above it are rejected.
    pub fn apply(&mut self, tx: &Transaction) -> Result<Vec<TransactionId>, TransactionError> {
        match tx.tx_type() {
            transaction::Type::Deposit(amount) => {
                self.deposit(tx.account_id(), *amount).map(|tx_id| vec![tx_id])
            }
            transaction::Type::Withdrawal(amount) => {
                self.withdraw(tx.account_id(), *amount).map(|tx_id| vec![tx_id])
            }
            transaction::Type::Transfer { to, amount } => {
                self.transfer_in_batches(tx.account_id(), to, *amount)
            }
        }
    }

    fn next_tx_id(&mut self) -> TransactionId {
        let tx_id = self.next_tx_id;
        self.next_tx_id += 1;
        tx_id
    }

    fn handle(&self, account_id: &str) -> Result<Handle, TransactionError> {
        self.account_index
            .get(account_id)
            .copied()
            .ok_or(TransactionError::UnknownAccount)
    }

    fn account_at(&self, (user_idx, account_idx): Handle) -> &Account {
        &self.users[user_idx].accounts[account_idx]
    }

    fn account_at_mut(&mut self, (user_idx, account_idx): Handle) -> &mut Account {
        &mut self.users[user_idx].accounts[account_idx]
    }

    fn checkpoint(&self, accounts: &[(Handle, &str)]) -> Checkpoint {
        Checkpoint {
            accounts: accounts
                .iter()
                .map(|(handle, account_id)| {
                    (
                        *handle,
                        self.account_at(*handle).balance.clone(),
                        self.history.len(account_id),
                    )
                })
                .collect(),
            next_tx_id: self.next_tx_id,
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        for ((user_idx, account_idx), balance, entries) in checkpoint.accounts {
            let account = &mut self.users[user_idx].accounts[account_idx];
            account.balance = balance;
            self.history.truncate(&account.id, entries);
        }
        self.next_tx_id = checkpoint.next_tx_id;
    }
}
