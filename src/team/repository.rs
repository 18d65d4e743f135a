//! Arena team repository interface and an in-memory implementation
//!
//! This mirrors the host's arena team manager: lookup by id, iteration by
//! type, registration of temporary teams and persistence of updated stats.

use crate::error::ArenaError;
use crate::team::arena_team::ArenaTeam;
use crate::types::{ArenaTeamId, ArenaType, MAX_ARENA_TEAM_ID};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

/// Trait for arena team storage operations
pub trait ArenaTeamRepository: Send + Sync {
    /// Get a team by id
    fn get_team(&self, team_id: ArenaTeamId) -> crate::error::Result<Option<ArenaTeam>>;

    /// `(id, rating)` of every team of an arena type
    fn ratings_of_type(
        &self,
        arena_type: ArenaType,
    ) -> crate::error::Result<Vec<(ArenaTeamId, u32)>>;

    /// Register a new team; fails if the id is taken
    fn add_team(&self, team: ArenaTeam) -> crate::error::Result<()>;

    /// Persist an updated team
    fn save_team(&self, team: &ArenaTeam) -> crate::error::Result<()>;

    /// Remove a team, returning whether it existed
    fn remove_team(&self, team_id: ArenaTeamId) -> crate::error::Result<bool>;

    /// Next free id for a temporary team
    fn generate_temp_team_id(&self) -> crate::error::Result<ArenaTeamId>;

    /// Total number of registered teams
    fn team_count(&self) -> crate::error::Result<usize>;
}

/// In-memory arena team repository
#[derive(Debug)]
pub struct InMemoryArenaTeamRepository {
    teams: RwLock<HashMap<ArenaTeamId, ArenaTeam>>,
    next_temp_id: AtomicU32,
    save_calls: RwLock<Vec<ArenaTeamId>>,
}

impl InMemoryArenaTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(HashMap::new()),
            next_temp_id: AtomicU32::new(MAX_ARENA_TEAM_ID),
            save_calls: RwLock::new(Vec::new()),
        }
    }

    /// Ids passed to `save_team`, in call order (for testing)
    pub fn save_calls(&self) -> crate::error::Result<Vec<ArenaTeamId>> {
        let calls = self.save_calls.read().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire save calls read lock".to_string(),
        })?;
        Ok(calls.clone())
    }
}

impl Default for InMemoryArenaTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaTeamRepository for InMemoryArenaTeamRepository {
    fn get_team(&self, team_id: ArenaTeamId) -> crate::error::Result<Option<ArenaTeam>> {
        let teams = self.teams.read().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire teams read lock".to_string(),
        })?;

        Ok(teams.get(&team_id).cloned())
    }

    fn ratings_of_type(
        &self,
        arena_type: ArenaType,
    ) -> crate::error::Result<Vec<(ArenaTeamId, u32)>> {
        let teams = self.teams.read().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire teams read lock".to_string(),
        })?;

        Ok(teams
            .values()
            .filter(|team| team.arena_type == arena_type)
            .map(|team| (team.id, team.stats.rating))
            .collect())
    }

    fn add_team(&self, team: ArenaTeam) -> crate::error::Result<()> {
        let mut teams = self.teams.write().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire teams write lock".to_string(),
        })?;

        if teams.contains_key(&team.id) {
            return Err(ArenaError::TeamAlreadyExists { team_id: team.id }.into());
        }

        teams.insert(team.id, team);
        Ok(())
    }

    fn save_team(&self, team: &ArenaTeam) -> crate::error::Result<()> {
        self.save_calls
            .write()
            .map_err(|_| ArenaError::InternalError {
                message: "Failed to acquire save calls write lock".to_string(),
            })?
            .push(team.id);

        let mut teams = self.teams.write().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire teams write lock".to_string(),
        })?;

        let stored = teams
            .get_mut(&team.id)
            .ok_or(ArenaError::TeamNotFound { team_id: team.id })?;
        *stored = team.clone();

        Ok(())
    }

    fn remove_team(&self, team_id: ArenaTeamId) -> crate::error::Result<bool> {
        let mut teams = self.teams.write().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire teams write lock".to_string(),
        })?;

        Ok(teams.remove(&team_id).is_some())
    }

    fn generate_temp_team_id(&self) -> crate::error::Result<ArenaTeamId> {
        let id = self.next_temp_id.fetch_add(1, Ordering::SeqCst);
        if id == u32::MAX {
            return Err(ArenaError::InternalError {
                message: "Temporary arena team ids exhausted".to_string(),
            }
            .into());
        }
        Ok(id)
    }

    fn team_count(&self) -> crate::error::Result<usize> {
        let teams = self.teams.read().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire teams read lock".to_string(),
        })?;

        Ok(teams.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get_remove() {
        let repository = InMemoryArenaTeamRepository::new();
        let team = ArenaTeam::new(1, "Gladiators", ArenaType::SoloThreeVThree).with_rating(1800);

        repository.add_team(team.clone()).unwrap();
        assert_eq!(repository.get_team(1).unwrap(), Some(team.clone()));
        assert!(repository.add_team(team).is_err());
        assert_eq!(repository.team_count().unwrap(), 1);

        assert!(repository.remove_team(1).unwrap());
        assert!(!repository.remove_team(1).unwrap());
        assert!(repository.get_team(1).unwrap().is_none());
    }

    #[test]
    fn test_ratings_filtered_by_type() {
        let repository = InMemoryArenaTeamRepository::new();
        repository
            .add_team(ArenaTeam::new(1, "a", ArenaType::SoloThreeVThree).with_rating(1500))
            .unwrap();
        repository
            .add_team(ArenaTeam::new(2, "b", ArenaType::ThreeVThree).with_rating(2000))
            .unwrap();

        let ratings = repository
            .ratings_of_type(ArenaType::SoloThreeVThree)
            .unwrap();
        assert_eq!(ratings, vec![(1, 1500)]);
    }

    #[test]
    fn test_save_requires_existing_team() {
        let repository = InMemoryArenaTeamRepository::new();
        let mut team = ArenaTeam::new(1, "a", ArenaType::SoloThreeVThree);
        assert!(repository.save_team(&team).is_err());

        repository.add_team(team.clone()).unwrap();
        team.stats.rating = 1234;
        repository.save_team(&team).unwrap();

        assert_eq!(repository.get_team(1).unwrap().unwrap().stats.rating, 1234);
        assert_eq!(repository.save_calls().unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_save_fails_on_poisoned_call_log() {
        let repository = InMemoryArenaTeamRepository::new();
        let team = ArenaTeam::new(1, "a", ArenaType::SoloThreeVThree);
        repository.add_team(team.clone()).unwrap();

        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _calls = repository.save_calls.write().unwrap();
                    panic!("poison save call log");
                })
                .join();
        });

        let err = repository.save_team(&team).unwrap_err();
        assert!(err.to_string().contains("save calls write lock"));
        assert!(repository.save_calls().is_err());
    }

    #[test]
    fn test_temp_ids_are_sequential() {
        let repository = InMemoryArenaTeamRepository::new();
        assert_eq!(repository.generate_temp_team_id().unwrap(), MAX_ARENA_TEAM_ID);
        assert_eq!(
            repository.generate_temp_team_id().unwrap(),
            MAX_ARENA_TEAM_ID + 1
        );
    }
}
