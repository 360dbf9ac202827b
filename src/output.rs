use crate::ledger::{ledger::Statement, AccountId, Amount, UserId};

use serde::Serialize;
use std::sync::mpsc::Receiver;

#[derive(Serialize)]
struct AccountRecord {
    #[serde(rename = "user")]
    user_id: UserId,

    #[serde(rename = "account")]
    account_id: AccountId,

    balance: Amount,

    // Signed amounts, oldest first, separated by a space.
    history: String,
}

impl From<Statement> for AccountRecord {
    fn from(statement: Statement) -> Self {
        Self {
            user_id: statement.user_id,
            account_id: statement.account_id,
            balance: statement.balance,
            history: statement
                .history
                .iter()
                .map(Amount::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

// Writes the received account statements to the given stream.
pub fn write(
    output_stream: impl std::io::Write,
    statements: Receiver<Statement>,
) -> Result<(), std::io::Error> {
    let mut writer = csv::Writer::from_writer(output_stream);

    for statement in statements {
        writer.serialize(AccountRecord::from(statement))?;
    }

    writer.flush()
}
