use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{de, RankedRegion, RankedTier};
use crate::error::ValidationError;

/// Ladder a ranking page is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankingKind {
    #[serde(rename = "1v1")]
    OneVsOne,
    #[serde(rename = "2v2")]
    TwoVsTwo,
    #[serde(rename = "seasonal")]
    Seasonal,
}

impl RankingKind {
    pub const ALL: [Self; 3] = [Self::OneVsOne, Self::TwoVsTwo, Self::Seasonal];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneVsOne => "1v1",
            Self::TwoVsTwo => "2v2",
            Self::Seasonal => "seasonal",
        }
    }
}

impl Display for RankingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1v1" => Ok(Self::OneVsOne),
            "2v2" => Ok(Self::TwoVsTwo),
            "seasonal" => Ok(Self::Seasonal),
            other => Err(ValidationError::InvalidRankingKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// One row of a 1v1 ranking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking1v1 {
    #[serde(deserialize_with = "de::u64_lenient")]
    pub rank: u64,
    pub name: String,
    pub brawlhalla_id: u64,
    pub best_legend: u32,
    pub best_legend_games: u32,
    pub best_legend_wins: u32,
    pub rating: u32,
    pub tier: RankedTier,
    pub games: u32,
    pub wins: u32,
    pub region: RankedRegion,
    pub peak_rating: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch_name: Option<String>,
}

/// One row of a 2v2 ranking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking2v2 {
    #[serde(deserialize_with = "de::u64_lenient")]
    pub rank: u64,
    pub teamname: String,
    pub brawlhalla_id_one: u64,
    pub brawlhalla_id_two: u64,
    pub rating: u32,
    pub tier: RankedTier,
    pub games: u32,
    pub wins: u32,
    pub region: RankedRegion,
    pub peak_rating: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch_name_one: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch_name_two: Option<String>,
}

/// One row of a seasonal ranking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSeasonal {
    #[serde(deserialize_with = "de::u64_lenient")]
    pub rank: u64,
    pub name: String,
    pub brawlhalla_id: u64,
    pub rating: u32,
    pub tier: RankedTier,
    pub games: u32,
    pub wins: u32,
    pub region: RankedRegion,
    pub peak_rating: u32,
}
