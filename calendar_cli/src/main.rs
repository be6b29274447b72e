mod cli;
mod commands;
mod logging;

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
    if let Command::Presets = cli.command {
        return commands::presets();
    }

    let mut driver = commands::load_driver(cli.calendar.as_deref(), &cli.preset)?;
    match cli.command {
        Command::Date(args) => commands::date(&driver, args, cli.json),
        Command::Day(args) => commands::day(&driver, args, cli.json),
        Command::Sun(args) => commands::sun(&driver, args, cli.json),
        Command::Advance(args) => commands::advance(&mut driver, args, cli.json),
        Command::Presets => commands::presets(),
    }
}
