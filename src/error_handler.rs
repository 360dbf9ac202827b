use crate::{input::Error, ledger::process::Rejection};

use std::sync::mpsc::Receiver;
use std::thread::JoinHandle;
use tracing::warn;

// Bad records and rejected transactions don't stop the run: they're logged
// and the following transactions are still processed.
//
// Each stream is drained on its own thread, so neither the parser nor the
// ledger ever waits on the other one's errors.
pub fn report(
    input_errors: Receiver<Error>,
    rejections: Receiver<Rejection>,
) -> Vec<JoinHandle<usize>> {
    vec![
        std::thread::spawn(move || {
            input_errors
                .into_iter()
                .inspect(|err| warn!(error = %err, "failed to read record"))
                .count()
        }),
        std::thread::spawn(move || {
            rejections
                .into_iter()
                .inspect(|rejection| {
                    warn!(
                        transaction = ?rejection.transaction,
                        error = %rejection.error,
                        "rejected transaction"
                    )
                })
                .count()
        }),
    ]
}
