use serde::{Deserialize, Serialize};

use super::{RankedRegion, RankedTier};

/// Current-season ranked record of one player (`player/{id}/ranked`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanked {
    pub brawlhalla_id: u64,
    pub name: String,
    pub rating: u32,
    pub peak_rating: u32,
    pub tier: RankedTier,
    pub wins: u32,
    pub games: u32,
    pub region: RankedRegion,
    #[serde(default)]
    pub global_rank: u64,
    #[serde(default)]
    pub region_rank: u64,
    #[serde(default)]
    pub legends: Vec<LegendRanked>,
    #[serde(rename = "2v2", default)]
    pub teams: Vec<TeamRanked>,
}

/// Per-legend ranked record nested in [`PlayerRanked`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRanked {
    pub legend_id: u32,
    pub legend_name_key: String,
    pub rating: u32,
    pub peak_rating: u32,
    pub tier: RankedTier,
    pub wins: u32,
    pub games: u32,
}

/// 2v2 team record nested in [`PlayerRanked`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRanked {
    pub brawlhalla_id_one: u64,
    pub brawlhalla_id_two: u64,
    pub rating: u32,
    pub peak_rating: u32,
    pub tier: RankedTier,
    pub wins: u32,
    pub games: u32,
    pub teamname: String,
    pub region: RankedRegion,
    #[serde(default)]
    pub global_rank: u64,
}
