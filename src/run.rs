use crate::{
    config::Config,
    error_handler, input,
    ledger::{process::process, Ledger, TransactionError, UserId},
    output,
};

use std::io;
use std::sync::mpsc;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read users")]
    Users(#[from] input::Error),

    #[error("failed to register user {user}")]
    Register {
        user: UserId,
        #[source]
        source: TransactionError,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Loads the users, applies every operation read from `operations`, then
/// writes each account's balance and history to `output`.
///
/// Bad operation records and rejected transactions are logged and skipped.
/// Bad user records, or failing to write the output, abort the run.
pub fn run(
    config: Config,
    users: impl io::Read,
    operations: impl io::Read + Send + 'static,
    output: impl io::Write,
) -> Result<(), Error> {
    let mut ledger = Ledger::new(config);
    for user in input::parse_users(users)? {
        let user_id = user.id().to_owned();
        ledger
            .register(user)
            .map_err(|source| Error::Register {
                user: user_id,
                source,
            })?;
    }

    let (transactions, input_errors) = input::parse(operations);
    let (statements_tx, statements) = mpsc::channel();
    let rejections = process(ledger, transactions, statements_tx);
    let error_handlers = error_handler::report(input_errors, rejections);

    output::write(output, statements)?;

    let mut failures = 0;
    for handle in error_handlers {
        match handle.join() {
            Ok(count) => failures += count,
            Err(_) => error!("error handler panicked"),
        }
    }
    info!(failures, "done");

    Ok(())
}
