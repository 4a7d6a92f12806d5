use serde::{Deserialize, Serialize};

use super::de;

/// Lifetime statistics of one player (`player/{id}/stats`).
///
/// Damage totals are sent as decimal strings by the upstream and kept as such.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub brawlhalla_id: u64,
    pub name: String,
    pub xp: u64,
    pub level: u32,
    pub xp_percentage: f64,
    pub games: u32,
    pub wins: u32,
    #[serde(default)]
    pub damagebomb: String,
    #[serde(default)]
    pub damagemine: String,
    #[serde(default)]
    pub damagespikeball: String,
    #[serde(default)]
    pub damagesidekick: String,
    #[serde(default)]
    pub hitsnowball: u32,
    #[serde(default)]
    pub kobomb: u32,
    #[serde(default)]
    pub komine: u32,
    #[serde(default)]
    pub kospikeball: u32,
    #[serde(default)]
    pub kosidekick: u32,
    #[serde(default)]
    pub kosnowball: u32,
    #[serde(default)]
    pub legends: Vec<LegendStats>,
    pub clan: Option<PlayerClan>,
}

/// Per-legend lifetime statistics nested in [`PlayerStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendStats {
    pub legend_id: u32,
    pub legend_name_key: String,
    pub damagedealt: String,
    pub damagetaken: String,
    pub kos: u32,
    pub falls: u32,
    pub suicides: u32,
    pub teamkos: u32,
    pub matchtime: u64,
    pub games: u32,
    pub wins: u32,
    pub damageunarmed: String,
    pub damagethrownitem: String,
    pub damageweaponone: String,
    pub damageweapontwo: String,
    pub damagegadgets: String,
    pub kounarmed: u32,
    pub kothrownitem: u32,
    pub koweaponone: u32,
    pub koweapontwo: u32,
    pub kogadgets: u32,
    pub timeheldweaponone: u64,
    pub timeheldweapontwo: u64,
    pub xp: u64,
    pub level: u32,
    pub xp_percentage: f64,
}

/// Clan membership summary nested in [`PlayerStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClan {
    pub clan_name: String,
    pub clan_id: u64,
    #[serde(deserialize_with = "de::u64_lenient")]
    pub clan_xp: u64,
    pub personal_xp: u64,
}
