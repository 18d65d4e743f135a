//! Player accessor trait and an in-memory registry

use crate::error::ArenaError;
use crate::player::ArenaPlayer;
use crate::types::PlayerGuid;
use std::collections::HashMap;
use std::sync::RwLock;

/// Host lookup of online players by GUID
#[cfg_attr(test, mockall::automock)]
pub trait PlayerLookup: Send + Sync {
    /// Find an online player; `None` when offline or unknown
    fn find_player(&self, guid: PlayerGuid) -> Option<ArenaPlayer>;
}

/// In-memory player registry for tests and scenarios
#[derive(Debug, Default)]
pub struct InMemoryPlayerRegistry {
    players: RwLock<HashMap<PlayerGuid, ArenaPlayer>>,
}

impl InMemoryPlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a player
    pub fn insert(&self, player: ArenaPlayer) -> crate::error::Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| ArenaError::InternalError {
                message: "Failed to acquire players write lock".to_string(),
            })?;

        players.insert(player.guid, player);
        Ok(())
    }

    /// Take a player offline
    pub fn remove(&self, guid: PlayerGuid) -> crate::error::Result<Option<ArenaPlayer>> {
        let mut players = self
            .players
            .write()
            .map_err(|_| ArenaError::InternalError {
                message: "Failed to acquire players write lock".to_string(),
            })?;

        Ok(players.remove(&guid))
    }

    pub fn len(&self) -> usize {
        self.players.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlayerLookup for InMemoryPlayerRegistry {
    fn find_player(&self, guid: PlayerGuid) -> Option<ArenaPlayer> {
        self.players
            .read()
            .ok()
            .and_then(|players| players.get(&guid).cloned())
    }
}
