//! `heisenberg` binary entry point
//!
//! Parses arguments, loads configuration once, initializes tracing from
//! `[general]`, and dispatches to the subcommand handlers. Errors are
//! printed to stderr and mapped to the exit codes of [`CliError`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use heisenberg_core::config::{GeneralConfig, HeisenbergConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // `config validate` reports load errors itself, so a bad file must not abort here
    let loaded = HeisenbergConfig::load_or_default(&cli.config).await;

    let general = loaded
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_else(|_| GeneralConfig::default());
    let log_level = cli.log_level.as_deref().unwrap_or(&general.log_level);
    logging::init_tracing(log_level, &general.log_format)?;
    heisenberg_core::metrics::describe_all();

    tracing::debug!(config = %cli.config.display(), "heisenberg starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
        Commands::Check(args) => commands::check::execute(args, &loaded?, &writer).await,
        Commands::Vendor(args) => commands::vendor::execute(args, &loaded?, &writer).await,
        Commands::Bulk(args) => commands::bulk::execute(args, &loaded?, &writer).await,
        Commands::Analyze(args) => commands::analyze::execute(args, &loaded?, &writer).await,
    }
}
