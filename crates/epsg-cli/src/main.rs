//! GeoTrans EPSG command line tool.

use anyhow::Result;
use clap::Parser;
use epsg_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_check, run_search, run_session, run_show};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(&cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let data_file = cli.data_file.as_deref();
    match &cli.command {
        Command::Check => run_check(data_file),
        Command::Search(args) => run_search(data_file, args),
        Command::Show(args) => run_show(data_file, args),
        Command::Session(args) => run_session(data_file, args),
    }
}
