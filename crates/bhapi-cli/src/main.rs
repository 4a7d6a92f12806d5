mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use bhapi_core::{BrawlhallaClient, ConfigError, ReqwestHttpClient, SchedulerConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "bhapi_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let api_key = cli.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
    let client = BrawlhallaClient::with_transport(
        SchedulerConfig::from_env()?,
        Arc::new(ReqwestHttpClient::new()),
        api_key,
    )?;

    let result = commands::run(&cli.command, &client).await?;
    output::render(&result, cli.pretty)
}
