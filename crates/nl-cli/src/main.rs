mod cli;
mod config;
mod convert_cmd;
mod events_cmd;
mod festivals_cmd;
mod logging;
mod month_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::NongliConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = NongliConfig::load(&cli.config)?;
    match cli.command {
        Command::Convert(args) => convert_cmd::run(args, &config),
        Command::Month(args) => month_cmd::run(args, &config),
        Command::Festivals(args) => festivals_cmd::run(args, &config),
        Command::Events(args) => events_cmd::run(args, &config),
    }
}
