//! Common types used throughout the solo arena module

use serde::{Deserialize, Serialize};

/// Globally unique player identifier assigned by the host
pub type PlayerGuid = u64;

/// Arena team identifier (persistent or temporary)
pub type ArenaTeamId = u32;

/// Identifier of a group waiting in the battleground queue
pub type GroupId = u64;

/// Level bracket of a battleground queue
pub type BracketId = u8;

/// Battleground instance identifier
pub type InstanceId = u32;

/// Number of talent ranks a single talent row can carry
pub const MAX_TALENT_RANK: usize = 5;

/// Number of arena team slots a player owns (2v2, 3v3, 5v5, solo 3v3)
pub const MAX_ARENA_SLOT: usize = 4;

/// Team ids at or above this value belong to temporary teams
pub const MAX_ARENA_TEAM_ID: ArenaTeamId = 0xFFF0_0000;

/// Players per side in a solo 3v3 match
pub const SOLO_3V3_TEAM_SIZE: usize = 3;

/// Players required for a solo 3v3 match to start
pub const SOLO_3V3_PLAYERS: usize = SOLO_3V3_TEAM_SIZE * 2;

/// Kind of arena match (and of the arena team playing it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArenaType {
    TwoVTwo,
    ThreeVThree,
    FiveVFive,
    SoloThreeVThree,
}

impl ArenaType {
    /// Slot index of this arena type in the player's arena team list
    pub fn slot(&self) -> usize {
        match self {
            ArenaType::TwoVTwo => 0,
            ArenaType::ThreeVThree => 1,
            ArenaType::FiveVFive => 2,
            ArenaType::SoloThreeVThree => 3,
        }
    }

    /// Players on each side
    pub fn team_size(&self) -> usize {
        match self {
            ArenaType::TwoVTwo => 2,
            ArenaType::ThreeVThree | ArenaType::SoloThreeVThree => 3,
            ArenaType::FiveVFive => 5,
        }
    }
}

impl std::fmt::Display for ArenaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArenaType::TwoVTwo => write!(f, "2v2"),
            ArenaType::ThreeVThree => write!(f, "3v3"),
            ArenaType::FiveVFive => write!(f, "5v5"),
            ArenaType::SoloThreeVThree => write!(f, "Solo 3v3"),
        }
    }
}

/// Battleground side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    Alliance,
    Horde,
    Neutral,
}

impl TeamSide {
    /// The two playable sides, in selection pool order
    pub const PLAYABLE: [TeamSide; 2] = [TeamSide::Alliance, TeamSide::Horde];

    /// Index into per-side arrays; `None` for the neutral side
    pub fn index(&self) -> Option<usize> {
        match self {
            TeamSide::Alliance => Some(0),
            TeamSide::Horde => Some(1),
            TeamSide::Neutral => None,
        }
    }
}

/// Queue category of a group, decides which selection pool it feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupQueueType {
    PremadeAlliance,
    PremadeHorde,
    NormalAlliance,
    NormalHorde,
}

/// Role inferred from a player's talent build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TalentCategory {
    Melee,
    Range,
    Healer,
}

impl TalentCategory {
    /// All categories in tie-break order
    pub const ALL: [TalentCategory; 3] = [
        TalentCategory::Melee,
        TalentCategory::Range,
        TalentCategory::Healer,
    ];

    /// Whether this category fills a damage slot
    pub fn is_dps(&self) -> bool {
        matches!(self, TalentCategory::Melee | TalentCategory::Range)
    }
}

impl std::fmt::Display for TalentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TalentCategory::Melee => write!(f, "melee"),
            TalentCategory::Range => write!(f, "range"),
            TalentCategory::Healer => write!(f, "healer"),
        }
    }
}
