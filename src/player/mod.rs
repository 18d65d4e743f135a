//! Player snapshots and the host's player accessor
//!
//! The host owns live player objects; this module sees them as cloned
//! snapshots fetched by GUID through [`PlayerLookup`].

pub mod registry;

pub use registry::{InMemoryPlayerRegistry, PlayerLookup};

use crate::types::{ArenaTeamId, ArenaType, PlayerGuid, MAX_ARENA_SLOT};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The slice of a player the solo queue needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaPlayer {
    pub guid: PlayerGuid,
    pub name: String,
    /// Watching the match rather than playing it
    pub is_spectator: bool,
    /// Active talent specialisation
    pub active_spec: u8,
    /// Learned talent spell ids per specialisation
    pub talents: HashMap<u8, HashSet<u32>>,
    /// Arena team ids indexed by arena slot
    pub arena_team_ids: [Option<ArenaTeamId>; MAX_ARENA_SLOT],
}

impl ArenaPlayer {
    pub fn new(guid: PlayerGuid, name: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
            is_spectator: false,
            active_spec: 0,
            talents: HashMap::new(),
            arena_team_ids: [None; MAX_ARENA_SLOT],
        }
    }

    /// Learn talent spells into the given specialisation
    pub fn with_talents(mut self, spec: u8, spell_ids: impl IntoIterator<Item = u32>) -> Self {
        self.talents.entry(spec).or_default().extend(spell_ids);
        self
    }

    /// Assign the arena team for an arena type's slot
    pub fn with_arena_team(mut self, arena_type: ArenaType, team_id: ArenaTeamId) -> Self {
        self.arena_team_ids[arena_type.slot()] = Some(team_id);
        self
    }

    pub fn as_spectator(mut self) -> Self {
        self.is_spectator = true;
        self
    }

    /// Whether the player knows a talent spell in a specialisation
    pub fn has_talent(&self, spell_id: u32, spec: u8) -> bool {
        self.talents
            .get(&spec)
            .map(|spells| spells.contains(&spell_id))
            .unwrap_or(false)
    }

    /// Arena team id held in an arena type's slot
    pub fn arena_team_id(&self, arena_type: ArenaType) -> Option<ArenaTeamId> {
        self.arena_team_ids[arena_type.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talents_are_per_spec() {
        let player = ArenaPlayer::new(1, "Aria")
            .with_talents(0, [100, 101])
            .with_talents(1, [200]);

        assert!(player.has_talent(100, 0));
        assert!(!player.has_talent(100, 1));
        assert!(player.has_talent(200, 1));
        assert!(!player.has_talent(999, 0));
    }

    #[test]
    fn test_arena_team_slot() {
        let player = ArenaPlayer::new(1, "Aria").with_arena_team(ArenaType::SoloThreeVThree, 42);

        assert_eq!(player.arena_team_id(ArenaType::SoloThreeVThree), Some(42));
        assert_eq!(player.arena_team_id(ArenaType::TwoVTwo), None);
    }
}
