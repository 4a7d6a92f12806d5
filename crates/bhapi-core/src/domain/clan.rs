use serde::{Deserialize, Serialize};

use super::de;

/// Clan record with its member roster (`clan/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clan {
    pub clan_id: u64,
    pub clan_name: String,
    pub clan_create_date: u64,
    #[serde(deserialize_with = "de::u64_lenient")]
    pub clan_xp: u64,
    #[serde(rename = "clan", default)]
    pub members: Vec<ClanMember>,
}

impl Clan {
    /// Members holding `rank`, in roster order.
    pub fn members_with_rank(&self, rank: ClanRank) -> impl Iterator<Item = &ClanMember> {
        self.members.iter().filter(move |member| member.rank == rank)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClanMember {
    pub brawlhalla_id: u64,
    pub name: String,
    pub rank: ClanRank,
    pub join_date: u64,
    pub xp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClanRank {
    Leader,
    Officer,
    Member,
    Recruit,
}
