use crate::ledger::{
    account::Account,
    transaction::{self, Transaction},
    user::User,
    AccountId, UserId, DECIMAL_PRECISION,
};

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("malformed CSV: {0}")]
    Csv(String), // CSV is malformed

    #[error("invalid record: {0}")]
    Format(String), // Data format is incorrect
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<<TransactionRecord as TryInto<Transaction>>::Error> for Error {
    fn from(err: <TransactionRecord as TryInto<Transaction>>::Error) -> Self {
        Self::Format(err.to_string())
    }
}

fn reader<R: std::io::Read>(input: R) -> csv::Reader<std::io::BufReader<R>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(input))
}

// Unlike operations, users are read upfront and any error aborts the whole
// run: applying operations against a partially loaded set of accounts would
// only produce more errors.
pub fn parse_users(input: impl std::io::Read) -> Result<Vec<User>, Error> {
    let mut users: Vec<User> = Vec::new();
    let mut index: HashMap<UserId, usize> = HashMap::new();

    for record in reader(input).deserialize::<UserRecord>() {
        let record = record?;
        let account = Account::with_balance(
            record.account_id,
            record
                .opening
                .unwrap_or_default()
                .round_dp(DECIMAL_PRECISION),
        );

        match index.get(&record.user_id) {
            Some(&idx) if users[idx].name != record.name => {
                return Err(Error::Format(format!(
                    "conflicting names for user {}",
                    record.user_id
                )));
            }
            Some(&idx) => users[idx].accounts.push(account),
            None => {
                index.insert(record.user_id.clone(), users.len());
                users.push(User::new(record.name, record.user_id, vec![account]));
            }
        }
    }

    Ok(users)
}

// Operations are streamed: a bad row is reported and skipped, and the rest
// of the file is still processed.
pub fn parse(
    input_stream: (impl std::io::Read + Send + 'static),
) -> (Receiver<Transaction>, Receiver<Error>) {
    let (transaction_tx, transaction_rx): (Sender<Transaction>, Receiver<Transaction>) =
        mpsc::channel();
    let (error_tx, error_rx): (Sender<Error>, Receiver<Error>) = mpsc::channel();

    let mut reader = reader(input_stream);

    // Moving to a new thread so we can start processing the transactions immediately.
    std::thread::spawn(move || {
        for record in reader.deserialize::<TransactionRecord>() {
            let sent = match convert(record) {
                Ok(transaction) => transaction_tx.send(transaction).is_ok(),
                Err(err) => error_tx.send(err).is_ok(),
            };

            // The receiving end is gone, nobody cares about the rest.
            if !sent {
                break;
            }
        }
    });

    (transaction_rx, error_rx)
}

// Convert from a csv deserialise result into a transaction result.
fn convert(record: Result<TransactionRecord, csv::Error>) -> Result<Transaction, Error> {
    Ok(record?.try_into()?)
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(rename = "user")]
    user_id: UserId,

    name: String,

    #[serde(rename = "account")]
    account_id: AccountId,

    opening: Option<Decimal>,
}

// I have a TransactionRecord type because I can't directly deserialise into my "domain" type, i.e. Transaction.
// See https://github.com/BurntSushi/rust-csv/issues/211.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    tx_type: TransactionRecordType,

    #[serde(rename = "account")]
    account_id: AccountId,

    #[serde(rename = "to")]
    to_account_id: Option<AccountId>,

    amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionRecordType {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = &'static str;
    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let tx_type = match record.tx_type {
            TransactionRecordType::Deposit => transaction::Type::Deposit(match record.amount {
                Some(amount) => amount,
                None => return Err("missing amount for deposit"),
            }),
            TransactionRecordType::Withdrawal => {
                transaction::Type::Withdrawal(match record.amount {
                    Some(amount) => amount,
                    None => return Err("missing amount for withdrawal"),
                })
            }
            TransactionRecordType::Transfer => transaction::Type::Transfer {
                to: match record.to_account_id {
                    Some(to) => to,
                    None => return Err("missing destination account for transfer"),
                },
                amount: match record.amount {
                    Some(amount) => amount,
                    None => return Err("missing amount for transfer"),
                },
            },
        };

        Ok(Self::new(tx_type, record.account_id))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, parse_users, Error, TransactionRecord, TransactionRecordType};
    use crate::ledger::{
        account::Account,
        transaction::{self, Transaction},
        user::User,
    };

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    // Parsing well-formed data should stream every Transaction.
    fn test_parse_ok() {
        let data = r#"type,account,to,amount
deposit,Acc1,,5000
transfer,Acc1,Acc2,5000
withdrawal,Acc2,,1.5"#;
        let reader = std::io::Cursor::new(data);
        let (transactions, errors) = parse(reader);

        let transactions: Vec<Transaction> = transactions.iter().collect();
        assert_eq!(
            vec![
                Transaction::new(transaction::Type::Deposit(dec!(5000)), "Acc1"),
                Transaction::new(
                    transaction::Type::Transfer {
                        to: "Acc2".to_string(),
                        amount: dec!(5000)
                    },
                    "Acc1"
                ),
                Transaction::new(transaction::Type::Withdrawal(dec!(1.5)), "Acc2"),
            ],
            transactions
        );
        assert_eq!(0, errors.iter().count());
    }

    #[test]
    fn test_parse_ok_with_whitespace() {
        let data = r#"type,     account,     to,amount
deposit, Acc1, , 1.0
withdrawal , Acc1 , , 0.5
    transfer ,Acc1,Acc2,  0.25  "#;
        let reader = std::io::Cursor::new(data);
        let (transactions, errors) = parse(reader);

        assert_eq!(3, transactions.iter().count());
        assert_eq!(0, errors.iter().count());
    }

    #[test]
    // Bad rows are reported, and the following rows still get through.
    fn test_parse_skips_bad_rows() {
        let data = r#"type,account,to,amount
deposit,Acc1,,1.0
some_unknown_tx_type,Acc1,,1.0
deposit,Acc1,,not_a_number
deposit,Acc1,,2.0"#;
        let reader = std::io::Cursor::new(data);
        let (transactions, errors) = parse(reader);

        assert_eq!(2, transactions.iter().count());

        let errs: Vec<Error> = errors.iter().collect();
        assert_eq!(2, errs.len());
        match &errs[0] {
            Error::Csv(msg) => assert!(
                msg.contains("unknown variant `some_unknown_tx_type`"),
                "{:?}",
                msg
            ),
            _ => panic!("unexpected error"),
        }
    }

    #[test]
    // Parsing incorrectly formatted data should report an error.
    fn test_parse_invalid_format() {
        for (data, err_contains) in vec![
            (
                r#"type,account,to,amount
deposit,Acc1,1"#,
                "found record with 3 fields, but the previous record has 4 fields",
            ),
            (
                r#"type,account,to,amount
deposit,Acc1,,1,,,"#,
                "found record with 7 fields, but the previous record has 4 fields",
            ),
        ] {
            let reader = std::io::Cursor::new(data);
            let (transactions, errors) = parse(reader);

            assert_eq!(0, transactions.iter().count());

            let errs: Vec<Error> = errors.iter().collect();
            assert_eq!(1, errs.len());

            match &errs[0] {
                Error::Csv(msg) => assert!(msg.contains(err_contains), "{:?}", msg),
                _ => panic!("unexpected error"),
            }
        }
    }

    #[test]
    // Records missing the data their type needs can't be converted into a Transaction.
    fn test_parse_invalid_data() {
        for (data, want_err) in vec![
            (
                r#"type,account,to,amount
deposit,Acc1,,"#,
                Error::Format("missing amount for deposit".to_string()),
            ),
            (
                r#"type,account,to,amount
withdrawal,Acc1,,"#,
                Error::Format("missing amount for withdrawal".to_string()),
            ),
            (
                r#"type,account,to,amount
transfer,Acc1,,5"#,
                Error::Format("missing destination account for transfer".to_string()),
            ),
            (
                r#"type,account,to,amount
transfer,Acc1,Acc2,"#,
                Error::Format("missing amount for transfer".to_string()),
            ),
        ] {
            let reader = std::io::Cursor::new(data);
            let (transactions, errors) = parse(reader);

            assert_eq!(0, transactions.iter().count());

            let errs: Vec<Error> = errors.iter().collect();
            assert_eq!(vec![want_err], errs);
        }
    }

    #[test]
    fn test_transaction_record_rounds_amounts() {
        let record = TransactionRecord {
            tx_type: TransactionRecordType::Deposit,
            account_id: "Acc1".to_string(),
            to_account_id: None,
            amount: Some(Decimal::new(123456789, 6)),
        };

        let got: Transaction = record.try_into().unwrap();
        assert_eq!(
            Transaction::new(transaction::Type::Deposit(dec!(123.4568)), "Acc1"),
            got
        );
    }

    #[test]
    fn test_parse_users() {
        let data = r#"user,name,account,opening
ID1,Andrey,Acc1,
ID2,Juan,Acc2,100.5
ID1,Andrey,Acc3,0.123456"#;
        let reader = std::io::Cursor::new(data);

        let users = parse_users(reader).expect("should parse users");
        assert_eq!(
            vec![
                User::new(
                    "Andrey",
                    "ID1",
                    vec![
                        Account::new("Acc1"),
                        Account::with_balance("Acc3", dec!(0.1235))
                    ]
                ),
                User::new(
                    "Juan",
                    "ID2",
                    vec![Account::with_balance("Acc2", dec!(100.5))]
                ),
            ],
            users
        );
    }

    #[test]
    fn test_parse_users_conflicting_names() {
        let data = r#"user,name,account,opening
ID1,Andrey,Acc1,
ID1,Juan,Acc2,"#;
        let reader = std::io::Cursor::new(data);

        assert_eq!(
            Err(Error::Format("conflicting names for user ID1".to_string())),
            parse_users(reader)
        );
    }

    #[test]
    fn test_parse_users_malformed() {
        let data = r#"user,name,account,opening
ID1,Andrey,Acc1,lots"#;
        let reader = std::io::Cursor::new(data);

        match parse_users(reader) {
            Err(Error::Csv(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
