//! Append-only record of every signed amount applied to each account.
//!
//! A deposit is recorded as a single positive entry, a withdrawal as a single
//! negative one, and a transfer as a negative entry under the source account
//! plus a positive one under the destination, both sharing the same
//! transaction ID. As long as every mutation goes through the `Ledger`, an
//! account's balance is always the sum of its entries.

use super::{AccountId, Amount, TransactionId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub tx_id: TransactionId,
    pub amount: Amount,
}

#[derive(Debug, Default)]
pub struct History {
    entries: HashMap<AccountId, Vec<Entry>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, account_id: &str, tx_id: TransactionId, amount: Amount) {
        let entry = Entry { tx_id, amount };

        match self.entries.get_mut(account_id) {
            Some(entries) => entries.push(entry),
            None => {
                self.entries.insert(account_id.to_owned(), vec![entry]);
            }
        }
    }

    /// All entries for an account, in the order they were recorded.
    pub fn entries(&self, account_id: &str) -> &[Entry] {
        self.entries.get(account_id).map_or(&[], Vec::as_slice)
    }

    /// The signed amounts recorded for an account, in the order they were recorded.
    pub fn amounts(&self, account_id: &str) -> Vec<Amount> {
        self.entries(account_id)
            .iter()
            .map(|entry| entry.amount)
            .collect()
    }

    pub fn total(&self, account_id: &str) -> Amount {
        self.entries(account_id)
            .iter()
            .map(|entry| entry.amount)
            .sum()
    }

    pub(super) fn len(&self, account_id: &str) -> usize {
        self.entries(account_id).len()
    }

    // Only used to undo a batch of transfers that couldn't complete.
    pub(super) fn truncate(&mut self, account_id: &str, len: usize) {
        if let Some(entries) = self.entries.get_mut(account_id) {
            entries.truncate(len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, History};
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut history = History::new();
        history.record("Acc1", 1, dec!(5000));
        history.record("Acc2", 2, dec!(5000));
        history.record("Acc1", 2, dec!(-5000));
        history.record("Acc1", 3, dec!(5000));

        assert_eq!(vec![dec!(5000), dec!(-5000), dec!(5000)], history.amounts("Acc1"));
        assert_eq!(vec![dec!(5000)], history.amounts("Acc2"));
        assert_eq!(
            &[Entry {
                tx_id: 2,
                amount: dec!(5000)
            }],
            history.entries("Acc2")
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = History::new();
        history.record("Acc1", 1, dec!(10));
        history.record("Acc1", 1, dec!(10));

        assert_eq!(vec![dec!(10), dec!(10)], history.amounts("Acc1"));
    }

    #[test]
    fn test_unknown_account_is_empty() {
        let history = History::new();

        assert!(history.amounts("nope").is_empty());
        assert!(history.entries("nope").is_empty());
        assert_eq!(dec!(0), history.total("nope"));
    }

    #[test]
    fn test_total() {
        let mut history = History::new();
        for (tx_id, amount) in vec![(1, dec!(5000)), (2, dec!(-1250.25)), (3, dec!(0.25))] {
            history.record("Acc1", tx_id, amount);
        }

        assert_eq!(dec!(3750), history.total("Acc1"));
    }

    #[test]
    fn test_truncate() {
        let mut history = History::new();
        history.record("Acc1", 1, dec!(1));
        history.record("Acc1", 2, dec!(2));
        history.record("Acc1", 3, dec!(3));

        history.truncate("Acc1", 1);
        assert_eq!(vec![dec!(1)], history.amounts("Acc1"));
        assert_eq!(1, history.len("Acc1"));

        // Truncating an unknown account is a no-op.
        history.truncate("Acc2", 0);
        assert_eq!(0, history.len("Acc2"));
    }
}
