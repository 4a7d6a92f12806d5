use bhapi_core::BrawlhallaClient;

use crate::cli::LegendArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run_legend(
    args: &LegendArgs,
    client: &BrawlhallaClient,
) -> Result<CommandResult, CliError> {
    let legend = match (&args.name, args.id) {
        (Some(name), _) => client.legend_by_name(name).await?,
        (None, Some(id)) => client.legend_by_id(id).await?,
        (None, None) => {
            return Err(CliError::Command(String::from(
                "legend requires a legend id or --name",
            )))
        }
    };
    Ok(CommandResult::ok("legend", serde_json::to_value(legend)?))
}

pub async fn run_legends(client: &BrawlhallaClient) -> Result<CommandResult, CliError> {
    let legends = client.all_legends().await?;
    Ok(CommandResult::ok("legends", serde_json::to_value(legends)?))
}
