use super::{AccountId, Amount};

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Deposit(Amount),    // Credit the account.
    Withdrawal(Amount), // Debit the account. Can't overdraw it.
    Transfer { to: AccountId, amount: Amount }, // Debit the account, credit `to`.
}

/// A transaction is a request to move money, as it comes in.
/// It only changes anything once the `Ledger` accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub(super) tx_type: Type,
    pub(super) account_id: AccountId,
}

impl Transaction {
    // The new() function ensures we can only create amounts with a decimal precision of 4.
    pub fn new(tx_type: Type, account_id: impl Into<AccountId>) -> Self {
        let tx_type = match tx_type {
            Type::Deposit(amount) => Type::Deposit(amount.round_dp(super::DECIMAL_PRECISION)),
            Type::Withdrawal(amount) => Type::Withdrawal(amount.round_dp(super::DECIMAL_PRECISION)),
            Type::Transfer { to, amount } => Type::Transfer {
                to,
                amount: amount.round_dp(super::DECIMAL_PRECISION),
            },
        };

        Self {
            tx_type,
            account_id: account_id.into(),
        }
    }

    pub fn tx_type(&self) -> &Type {
        &self.tx_type
    }

    /// The account the money is deposited to, or taken from.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

#[test]
// Decimal precision is 4 places. We should be unable to have more precise amounts.
fn test_transaction_decimal_precision() {
    use rust_decimal_macros::dec;

    for (raw_amount, want_amount) in vec![
        (dec!(1.0), dec!(1.0)),
        (dec!(0.999999), dec!(1.0)),
        (dec!(1.0000001), dec!(1.0)),
        (dec!(1.2345), dec!(1.2345)),
        (dec!(1.23459), dec!(1.2346)),
    ] {
        let tx = Transaction::new(Type::Withdrawal(raw_amount), "Acc1");
        assert_eq!(&Type::Withdrawal(want_amount), tx.tx_type());
        assert_eq!("Acc1", tx.account_id());

        let tx = Transaction::new(
            Type::Transfer {
                to: "Acc2".to_string(),
                amount: raw_amount,
            },
            "Acc1",
        );
        assert_eq!(
            &Type::Transfer {
                to: "Acc2".to_string(),
                amount: want_amount
            },
            tx.tx_type()
        );
    }
}
