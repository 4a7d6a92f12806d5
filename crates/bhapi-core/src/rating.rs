//! Glory and rating-reset computations over ranked records.
//!
//! Everything here is pure. Callers fetch a [`PlayerRanked`] through the
//! scheduler and derive figures from it:
//!
//! ```rust
//! use bhapi_core::rating::{glory_from_best_rating, glory_from_wins, new_elo_from_old_elo};
//!
//! assert_eq!(glory_from_wins(150), 3000);
//! assert_eq!(glory_from_best_rating(2700), 5000);
//! assert_eq!(new_elo_from_old_elo(1399), 1399);
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::PlayerRanked;

/// Below this many combined 1v1 + 2v2 games no glory is awarded.
pub const MIN_GAMES_FOR_GLORY: u32 = 10;

/// Ratings below this value are carried over unchanged by a season reset.
pub const RESET_THRESHOLD: u32 = 1400;

const LINEAR_WIN_GLORY_LIMIT: u32 = 150;

/// Highest peak rating across the player, each ranked legend and each 2v2 team.
pub fn best_rating(record: &PlayerRanked) -> u32 {
    record
        .legends
        .iter()
        .map(|legend| legend.peak_rating)
        .chain(record.teams.iter().map(|team| team.peak_rating))
        .fold(record.peak_rating, u32::max)
}

/// Glory earned from the season's total wins.
pub fn glory_from_wins(total_wins: u32) -> u32 {
    if total_wins <= LINEAR_WIN_GLORY_LIMIT {
        return 20 * total_wins;
    }

    let log = (f64::from(total_wins) * 2.0).log10();
    (10.0 * (45.0 * log.powi(2)) + 245.0).floor() as u32
}

/// Glory earned from the season's best peak rating.
pub fn glory_from_best_rating(best_rating: u32) -> u32 {
    let r = f64::from(best_rating);
    let glory = match best_rating {
        0..=1199 => 250.0,
        1200..=1285 => 10.0 * (25.0 + 0.872093023 * (86.0 - (1286.0 - r))),
        1286..=1389 => 10.0 * (100.0 + 0.721153846 * (104.0 - (1390.0 - r))),
        1390..=1679 => 10.0 * (187.0 + 0.389655172 * (290.0 - (1680.0 - r))),
        1680..=1999 => 10.0 * (300.0 + 0.428125 * (320.0 - (2000.0 - r))),
        2000..=2299 => 10.0 * (437.0 + 0.143333333 * (300.0 - (2300.0 - r))),
        _ => 10.0 * (480.0 + 0.05 * (400.0 - (2700.0 - r))),
    };
    glory.floor() as u32
}

/// Rating a player starts the next season with.
///
/// Ratings at or above [`RESET_THRESHOLD`] are compressed towards it.
pub fn new_elo_from_old_elo(elo: u32) -> u32 {
    if elo < RESET_THRESHOLD {
        return elo;
    }

    let elo = f64::from(elo);
    // For elo >= 1400 the divisor is >= 1 and grows with elo.
    let divisor = 3.0 - (3000.0 - elo) / 800.0;
    (1400.0 + (elo - 1400.0) / divisor).floor() as u32
}

/// Glory split by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Glory {
    pub wins: u32,
    pub rating: u32,
}

impl Glory {
    pub const fn total(self) -> u32 {
        self.wins.saturating_add(self.rating)
    }
}

/// Glory for combined totals; fewer than [`MIN_GAMES_FOR_GLORY`] games earn nothing.
pub fn glory_from_totals(games: u32, wins: u32, best_rating: u32) -> Glory {
    if games < MIN_GAMES_FOR_GLORY {
        return Glory::default();
    }

    Glory {
        wins: glory_from_wins(wins),
        rating: glory_from_best_rating(best_rating),
    }
}

/// Glory for a ranked record, summing 1v1 and every 2v2 team's games and wins.
pub fn glory(record: &PlayerRanked) -> Glory {
    let (games, wins) = record
        .teams
        .iter()
        .fold((record.games, record.wins), |(games, wins), team| {
            (games.saturating_add(team.games), wins.saturating_add(team.wins))
        });

    glory_from_totals(games, wins, best_rating(record))
}

/// Derived end-of-season figures for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GloryData {
    pub brawlhalla_id: u64,
    pub name: String,
    #[serde(rename = "bestElo")]
    pub best_elo: u32,
    #[serde(rename = "eloReset")]
    pub elo_reset: u32,
    pub glory: Glory,
}

impl GloryData {
    pub fn from_ranked(record: &PlayerRanked) -> Self {
        Self {
            brawlhalla_id: record.brawlhalla_id,
            name: record.name.clone(),
            best_elo: best_rating(record),
            elo_reset: new_elo_from_old_elo(record.rating),
            glory: glory(record),
        }
    }
}
