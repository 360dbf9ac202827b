pub mod account;
pub mod history;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod process;
pub mod transaction;
pub mod user;

pub use account::{Account, Balance, TransactionError};
pub use history::{Entry, History};
pub use ledger::Ledger;
pub use transaction::Transaction;
pub use user::User;

// Using named types doesn't provide any compiler help, but it helps a lot with
// readability: `HashMap<AccountId, Vec<Entry>>` explains itself, while
// `HashMap<String, Vec<Entry>>` would need a comment.
pub type AccountId = String;
pub type UserId = String;
pub type TransactionId = u32;

// I decided to use a decimal library instead of the built-in f64 type, to be
// safer when dealing with money, and making the decimal precision easier to
// deal with.
pub type Amount = rust_decimal::Decimal;
pub const DECIMAL_PRECISION: u32 = 4;
