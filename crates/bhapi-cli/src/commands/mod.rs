mod clan;
mod legend;
mod player;
mod rankings;

use std::time::Instant;

use bhapi_core::BrawlhallaClient;
use serde_json::Value;

use crate::cli::Command;
use crate::error::CliError;

pub struct CommandResult {
    pub command: &'static str,
    pub data: Value,
    pub latency_ms: u64,
}

impl CommandResult {
    pub fn ok(command: &'static str, data: Value) -> Self {
        Self {
            command,
            data,
            latency_ms: 0,
        }
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

pub async fn run(command: &Command, client: &BrawlhallaClient) -> Result<CommandResult, CliError> {
    let started = Instant::now();

    let result = match command {
        Command::PlayerId(args) => player::run_player_id(args, client).await?,
        Command::Stats(args) => player::run_stats(args, client).await?,
        Command::Ranked(args) => player::run_ranked(args, client).await?,
        Command::Glory(args) => player::run_glory(args, client).await?,
        Command::Clan(args) => clan::run(args, client).await?,
        Command::Legend(args) => legend::run_legend(args, client).await?,
        Command::Legends => legend::run_legends(client).await?,
        Command::Rankings(args) => rankings::run(args, client).await?,
    };

    Ok(result.with_latency(started.elapsed().as_millis() as u64))
}
