//! An in-memory ledger of users and their accounts.
//!
//! Money moves through deposits, withdrawals and transfers, each capped to a
//! maximum amount per operation. Every accepted operation is recorded in a
//! per-account history, so an account's balance is always the sum of its
//! history.

pub mod config;
pub mod error_handler;
pub mod input;
pub mod ledger;
pub mod logging;
pub mod output;
pub mod run;
