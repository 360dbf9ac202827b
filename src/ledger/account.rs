#[allow(clippy::module_inception)]
pub mod account;
pub mod balance;
mod deposit;
mod withdrawal;

pub use account::{Account, TransactionError};
pub use balance::Balance;
