//! connstr CLI - inspect and normalize connection strings.

use clap::Parser;

use connstr_cli::cli::{Cli, Command};
use connstr_cli::commands;
use connstr_cli::error::CliResult;
use connstr_cli::output;

fn main() {
    connstr_core::logging::init();

    if let Err(e) = run() {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse(args) => commands::parse::run(args),
        Command::Format(args) => commands::format::run(args),
        Command::Version => commands::version::run(),
    }
}
