use crate::ledger::Amount;

use clap::Parser;
use rust_decimal_macros::dec;
use std::path::PathBuf;

/// Settings the ledger runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The largest amount a single deposit, withdrawal or transfer may move.
    pub max_transaction_amount: Amount,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_transaction_amount: dec!(10000),
        }
    }
}

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// CSV file of the operations to apply (`type,account,to,amount`)
    pub operations: PathBuf,

    /// CSV file of the users and their accounts (`user,name,account,opening`)
    #[clap(long, short)]
    pub users: PathBuf,

    /// Override the per-transaction cap, must be positive
    #[clap(long, parse(try_from_str = parse_cap))]
    pub max_amount: Option<Amount>,

    /// Log more (-v, -vv, -vvv)
    #[clap(long, short, parse(from_occurrences))]
    pub verbose: u8,
}

fn parse_cap(value: &str) -> Result<Amount, String> {
    let cap: Amount = value.parse().map_err(|err| format!("{}", err))?;
    if cap <= Amount::ZERO {
        return Err(format!("the cap must be positive, got {}", cap));
    }
    Ok(cap)
}

impl Cli {
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(max_amount) = self.max_amount {
            config.max_transaction_amount = max_amount;
        }
        config
    }
}
