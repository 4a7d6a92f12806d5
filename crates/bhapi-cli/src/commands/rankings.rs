use bhapi_core::{BrawlhallaClient, RankedRegion, RankingKind};
use serde::Serialize;
use serde_json::Value;

use crate::cli::RankingsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct RankingsData {
    kind: RankingKind,
    region: RankedRegion,
    page: u32,
    rows: Value,
}

pub async fn run(args: &RankingsArgs, client: &BrawlhallaClient) -> Result<CommandResult, CliError> {
    let kind = args.kind.parse::<RankingKind>()?;
    let region = args.region.parse::<RankedRegion>()?;

    let rows = match kind {
        RankingKind::OneVsOne => serde_json::to_value(client.rankings_1v1(&region, args.page).await?)?,
        RankingKind::TwoVsTwo => serde_json::to_value(client.rankings_2v2(&region, args.page).await?)?,
        RankingKind::Seasonal => {
            serde_json::to_value(client.rankings_seasonal(&region, args.page).await?)?
        }
    };

    let data = serde_json::to_value(RankingsData {
        kind,
        region,
        page: args.page,
        rows,
    })?;
    Ok(CommandResult::ok("rankings", data))
}
