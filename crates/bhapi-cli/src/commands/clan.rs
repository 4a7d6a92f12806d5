use bhapi_core::BrawlhallaClient;

use crate::cli::IdArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &IdArgs, client: &BrawlhallaClient) -> Result<CommandResult, CliError> {
    let clan = client.clan_by_id(args.id).await?;
    Ok(CommandResult::ok("clan", serde_json::to_value(clan)?))
}
