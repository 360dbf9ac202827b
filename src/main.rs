use account_ledger::{config::Cli, logging, run};

use clap::Parser;
use std::{fs::File, io};

fn main() -> Result<(), run::Error> {
    let cli = Cli::parse();
    logging::set_up(cli.verbose);

    let users = File::open(&cli.users)?;
    let operations = File::open(&cli.operations)?;

    let stdout = io::stdout();
    run::run(cli.config(), users, operations, stdout.lock())
}
