mod cli;
mod config;
mod convert;
mod decluster_cmd;
mod logging;
mod partition_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Decluster(args) => decluster_cmd::run(args, &config),
        Command::Split(args) => partition_cmd::run_split(args, &config),
        Command::Folds(args) => partition_cmd::run_folds(args, &config),
        Command::Subsample(args) => partition_cmd::run_subsample(args, &config),
    }
}
