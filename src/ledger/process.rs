use super::account::TransactionError;
use super::ledger::{Ledger, Statement};
use super::transaction::Transaction;
use std::sync::mpsc::{self, Receiver, Sender};

/// A transaction the ledger refused, and why.
#[derive(Debug, PartialEq)]
pub struct Rejection {
    pub transaction: Transaction,
    pub error: TransactionError,
}

/// Applies a stream of transactions to the ledger.
///
/// The ledger is moved into a dedicated thread, which is the only one ever
/// touching it, so operations are applied one at a time, in the order they
/// are received. Rejected transactions are streamed back as they happen, and
/// once the input is exhausted every account's statement is sent to
/// `statements_tx`.
pub fn process(
    mut ledger: Ledger,
    transactions: Receiver<Transaction>,
    statements_tx: Sender<Statement>,
) -> Receiver<Rejection> {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for transaction in transactions {
            if let Err(error) = ledger.apply(&transaction) {
                // Only fails if nobody listens to rejections anymore, in which
                // case there's nothing left to report them to.
                let _ = tx.send(Rejection { transaction, error });
            };
        }

        for statement in ledger.statements() {
            if statements_tx.send(statement).is_err() {
                break;
            }
        }
    });

    rx
}
