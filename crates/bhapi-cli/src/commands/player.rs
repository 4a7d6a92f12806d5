use bhapi_core::BrawlhallaClient;
use serde::Serialize;

use crate::cli::{IdArgs, NameArgs, PlayerArgs};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PlayerIdData<'a> {
    name: &'a str,
    brawlhalla_id: u64,
}

pub async fn run_player_id(
    args: &NameArgs,
    client: &BrawlhallaClient,
) -> Result<CommandResult, CliError> {
    let brawlhalla_id = client.brawlhalla_id_by_name(&args.name).await?;
    let data = serde_json::to_value(PlayerIdData {
        name: &args.name,
        brawlhalla_id,
    })?;
    Ok(CommandResult::ok("player-id", data))
}

pub async fn run_stats(
    args: &PlayerArgs,
    client: &BrawlhallaClient,
) -> Result<CommandResult, CliError> {
    let stats = match (&args.name, args.id) {
        (Some(name), _) => client.stats_by_name(name).await?,
        (None, Some(id)) => client.stats_by_id(id).await?,
        (None, None) => {
            return Err(CliError::Command(String::from(
                "stats requires a Brawlhalla id or --name",
            )))
        }
    };
    Ok(CommandResult::ok("stats", serde_json::to_value(stats)?))
}

pub async fn run_ranked(args: &IdArgs, client: &BrawlhallaClient) -> Result<CommandResult, CliError> {
    let ranked = client.ranked_by_id(args.id).await?;
    Ok(CommandResult::ok("ranked", serde_json::to_value(ranked)?))
}

pub async fn run_glory(args: &IdArgs, client: &BrawlhallaClient) -> Result<CommandResult, CliError> {
    let glory = client.glory_by_id(args.id).await?;
    Ok(CommandResult::ok("glory", serde_json::to_value(glory)?))
}
