//! Typed Brawlhalla endpoints on top of the [`RequestScheduler`].
//!
//! Each lookup is one scheduled call whose JSON body is decoded into a
//! [`domain`](crate::domain) type. Name-based lookups chain two calls.
//!
//! ```rust,ignore
//! use bhapi_core::BrawlhallaClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BrawlhallaClient::from_env()?;
//!     let glory = client.glory_by_id(2).await?;
//!     println!("{} keeps {} rating next season", glory.name, glory.elo_reset);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{api_key_from_env, SchedulerConfig};
use crate::domain::{
    Clan, LegendDetails, LegendSummary, PlayerRanked, PlayerStats, Ranking1v1, Ranking2v2,
    RankingKind, RankingSeasonal, RankedRegion,
};
use crate::error::{ApiError, ConfigError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::rating::GloryData;
use crate::scheduler::RequestScheduler;

/// Endpoint layer; cheap to clone, clones share one scheduler.
#[derive(Debug, Clone)]
pub struct BrawlhallaClient {
    scheduler: RequestScheduler,
}

impl BrawlhallaClient {
    pub fn new(scheduler: RequestScheduler) -> Self {
        Self { scheduler }
    }

    /// Builds a reqwest-backed client from `BHAPI_*` settings and `BRAWLHALLA_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = api_key_from_env().ok_or(ConfigError::MissingApiKey)?;
        Self::with_transport(
            SchedulerConfig::from_env()?,
            Arc::new(ReqwestHttpClient::new()),
            api_key,
        )
    }

    pub fn with_transport(
        config: SchedulerConfig,
        transport: Arc<dyn HttpClient>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let scheduler = RequestScheduler::new(config, transport)?;
        scheduler.set_credential(api_key);
        Ok(Self::new(scheduler))
    }

    pub fn scheduler(&self) -> &RequestScheduler {
        &self.scheduler
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: String,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.scheduler.get(path.clone(), query).await?;
        serde_json::from_str(&response.body).map_err(|error| {
            ApiError::invalid_response(format!("failed to decode response body: {error}"))
                .with_status(response.status)
                .with_path(path)
        })
    }

    /// Resolves a player name to its Brawlhalla id via the 1v1 ladder search.
    pub async fn brawlhalla_id_by_name(&self, name: &str) -> Result<u64, ApiError> {
        let path = String::from("rankings/1v1/all/1");
        let rows: Vec<Ranking1v1> = self.get_json(path.clone(), &[("name", name)]).await?;

        let Some(first) = rows.first() else {
            return Err(
                ApiError::not_found(format!("Player with name \"{name}\" not found."))
                    .with_path(path)
                    .with_details("PlayerNotFound"),
            );
        };

        debug!(player = name, brawlhalla_id = first.brawlhalla_id, "resolved player name");
        Ok(first.brawlhalla_id)
    }

    pub async fn stats_by_id(&self, brawlhalla_id: u64) -> Result<PlayerStats, ApiError> {
        self.get_json(format!("player/{brawlhalla_id}/stats"), &[])
            .await
    }

    pub async fn stats_by_name(&self, name: &str) -> Result<PlayerStats, ApiError> {
        let brawlhalla_id = self.brawlhalla_id_by_name(name).await?;
        self.stats_by_id(brawlhalla_id).await
    }

    pub async fn ranked_by_id(&self, brawlhalla_id: u64) -> Result<PlayerRanked, ApiError> {
        self.get_json(format!("player/{brawlhalla_id}/ranked"), &[])
            .await
    }

    pub async fn clan_by_id(&self, clan_id: u64) -> Result<Clan, ApiError> {
        self.get_json(format!("clan/{clan_id}"), &[]).await
    }

    pub async fn all_legends(&self) -> Result<Vec<LegendSummary>, ApiError> {
        self.get_json(String::from("legend/all"), &[]).await
    }

    pub async fn legend_by_id(&self, legend_id: u32) -> Result<LegendDetails, ApiError> {
        self.get_json(format!("legend/{legend_id}"), &[]).await
    }

    /// Looks a legend up by name key, ignoring case.
    pub async fn legend_by_name(&self, name: &str) -> Result<LegendDetails, ApiError> {
        let legends = self.all_legends().await?;
        let Some(legend) = legends.iter().find(|legend| legend.matches_name(name)) else {
            return Err(
                ApiError::not_found(format!("Legend with name \"{name}\" not found."))
                    .with_status(404)
                    .with_path("legend/all")
                    .with_details("LegendNotFound"),
            );
        };

        self.legend_by_id(legend.legend_id).await
    }

    /// Best rating, season reset and glory for one player.
    pub async fn glory_by_id(&self, brawlhalla_id: u64) -> Result<GloryData, ApiError> {
        let ranked = self.ranked_by_id(brawlhalla_id).await?;
        Ok(GloryData::from_ranked(&ranked))
    }

    pub async fn rankings_1v1(
        &self,
        region: &RankedRegion,
        page: u32,
    ) -> Result<Vec<Ranking1v1>, ApiError> {
        self.rankings(RankingKind::OneVsOne, region, page).await
    }

    pub async fn rankings_2v2(
        &self,
        region: &RankedRegion,
        page: u32,
    ) -> Result<Vec<Ranking2v2>, ApiError> {
        self.rankings(RankingKind::TwoVsTwo, region, page).await
    }

    pub async fn rankings_seasonal(
        &self,
        region: &RankedRegion,
        page: u32,
    ) -> Result<Vec<RankingSeasonal>, ApiError> {
        self.rankings(RankingKind::Seasonal, region, page).await
    }

    async fn rankings<T: DeserializeOwned>(
        &self,
        kind: RankingKind,
        region: &RankedRegion,
        page: u32,
    ) -> Result<Vec<T>, ApiError> {
        self.get_json(format!("rankings/{kind}/{region}/{page}"), &[])
            .await
    }
}
