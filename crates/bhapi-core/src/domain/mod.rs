//! # Domain Models
//!
//! Typed shapes of the upstream Brawlhalla API payloads.
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`PlayerStats`] | `player/{id}/stats` |
//! | [`PlayerRanked`] | `player/{id}/ranked` |
//! | [`Clan`] | `clan/{id}` |
//! | [`LegendSummary`] / [`LegendDetails`] | `legend/all`, `legend/{id}` |
//! | [`Ranking1v1`] / [`Ranking2v2`] / [`RankingSeasonal`] | `rankings/{kind}/{region}/{page}` |
//!
//! Numeric fields the API sometimes sends as strings (ranks, clan xp) are
//! accepted in both forms.

mod clan;
mod legend;
mod ranked;
mod rankings;
mod region;
mod stats;
mod tier;

pub use clan::{Clan, ClanMember, ClanRank};
pub use legend::{LegendDetails, LegendSummary};
pub use ranked::{LegendRanked, PlayerRanked, TeamRanked};
pub use rankings::{Ranking1v1, Ranking2v2, RankingKind, RankingSeasonal};
pub use region::RankedRegion;
pub use stats::{LegendStats, PlayerClan, PlayerStats};
pub use tier::RankedTier;

pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    /// Accepts `7` as well as `"7"`.
    pub fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(value) => Ok(value),
            NumberOrString::String(value) => value
                .trim()
                .parse::<u64>()
                .map_err(serde::de::Error::custom),
        }
    }
}
