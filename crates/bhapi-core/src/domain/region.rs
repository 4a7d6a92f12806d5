use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ranked ladder region.
///
/// Request paths use the lowercase form (`us-e`); payloads carry the
/// uppercase form (`US-E`). Both are accepted when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RankedRegion {
    All,
    UsEast,
    Europe,
    SoutheastAsia,
    Brazil,
    Australia,
    UsWest,
    Japan,
    /// Region code not known to this crate, kept as sent.
    Other(String),
}

impl RankedRegion {
    pub const KNOWN: [Self; 8] = [
        Self::All,
        Self::UsEast,
        Self::Europe,
        Self::SoutheastAsia,
        Self::Brazil,
        Self::Australia,
        Self::UsWest,
        Self::Japan,
    ];

    /// Lowercase code used in request paths.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::UsEast => "us-e",
            Self::Europe => "eu",
            Self::SoutheastAsia => "sea",
            Self::Brazil => "brz",
            Self::Australia => "aus",
            Self::UsWest => "us-w",
            Self::Japan => "jpn",
            Self::Other(code) => code,
        }
    }

    fn parse_known(value: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl Display for RankedRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankedRegion {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_known(value).ok_or_else(|| ValidationError::InvalidRegion {
            value: value.to_owned(),
        })
    }
}

impl From<String> for RankedRegion {
    fn from(value: String) -> Self {
        Self::parse_known(&value).unwrap_or(Self::Other(value))
    }
}

impl From<RankedRegion> for String {
    fn from(region: RankedRegion) -> Self {
        match region {
            RankedRegion::Other(code) => code,
            known => known.as_str().to_ascii_uppercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_cases() {
        assert_eq!("US-E".parse::<RankedRegion>(), Ok(RankedRegion::UsEast));
        assert_eq!("sea".parse::<RankedRegion>(), Ok(RankedRegion::SoutheastAsia));
    }

    #[test]
    fn unknown_code_is_rejected_for_requests() {
        assert_eq!(
            "mars".parse::<RankedRegion>(),
            Err(ValidationError::InvalidRegion {
                value: String::from("mars")
            })
        );
    }

    #[test]
    fn unknown_code_is_kept_in_payloads() {
        let region: RankedRegion = serde_json::from_str("\"SA\"").expect("region");
        assert_eq!(region, RankedRegion::Other(String::from("SA")));

        let region: RankedRegion = serde_json::from_str("\"EU\"").expect("region");
        assert_eq!(region, RankedRegion::Europe);
        assert_eq!(serde_json::to_string(&region).expect("serialize"), "\"EU\"");
    }
}
