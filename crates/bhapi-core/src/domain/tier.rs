use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Ranked bracket derived from rating, e.g. `Diamond` or `Platinum 3`.
///
/// Sub-divided tiers carry their division (0–5). Tier names the upstream
/// adds later are kept verbatim in [`RankedTier::Other`] instead of failing
/// the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RankedTier {
    Valhallan,
    Diamond,
    Platinum(u8),
    Gold(u8),
    Silver(u8),
    Bronze(u8),
    Tin(u8),
    Other(String),
}

impl From<String> for RankedTier {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        match trimmed {
            "Valhallan" => return Self::Valhallan,
            "Diamond" => return Self::Diamond,
            _ => {}
        }

        let parsed = trimmed.split_once(' ').and_then(|(name, division)| {
            let division = division.parse::<u8>().ok().filter(|d| *d <= 5)?;
            match name {
                "Platinum" => Some(Self::Platinum(division)),
                "Gold" => Some(Self::Gold(division)),
                "Silver" => Some(Self::Silver(division)),
                "Bronze" => Some(Self::Bronze(division)),
                "Tin" => Some(Self::Tin(division)),
                _ => None,
            }
        });

        parsed.unwrap_or(Self::Other(value))
    }
}

impl From<RankedTier> for String {
    fn from(tier: RankedTier) -> Self {
        tier.to_string()
    }
}

impl Display for RankedTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valhallan => f.write_str("Valhallan"),
            Self::Diamond => f.write_str("Diamond"),
            Self::Platinum(division) => write!(f, "Platinum {division}"),
            Self::Gold(division) => write!(f, "Gold {division}"),
            Self::Silver(division) => write!(f, "Silver {division}"),
            Self::Bronze(division) => write!(f, "Bronze {division}"),
            Self::Tin(division) => write!(f, "Tin {division}"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
