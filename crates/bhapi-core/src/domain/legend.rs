use serde::{Deserialize, Serialize};

/// Static legend entry as listed by `legend/all`.
///
/// Attribute values are sent as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendSummary {
    pub legend_id: u32,
    pub legend_name_key: String,
    pub bio_name: String,
    pub bio_aka: String,
    pub weapon_one: String,
    pub weapon_two: String,
    pub strength: String,
    pub dexterity: String,
    pub defense: String,
    pub speed: String,
}

impl LegendSummary {
    /// Case-insensitive match on the legend's name key.
    pub fn matches_name(&self, name: &str) -> bool {
        self.legend_name_key.eq_ignore_ascii_case(name.trim())
    }
}

/// Full static legend record from `legend/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendDetails {
    #[serde(flatten)]
    pub summary: LegendSummary,
    pub bio_quote: String,
    pub bio_quote_about_attrib: String,
    pub bio_quote_from: String,
    pub bio_quote_from_attrib: String,
    pub bio_text: String,
    pub bot_name: String,
}
