//! Battleground trait and an in-memory arena instance

use crate::error::{ArenaError, Result};
use crate::types::{ArenaTeamId, ArenaType, InstanceId, PlayerGuid, TeamSide};
use serde::{Deserialize, Serialize};

/// Lifecycle states of a battleground instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlegroundStatus {
    /// Players are being invited and entering
    WaitJoin,
    /// The match is running
    InProgress,
    /// The match is over (terminal state)
    Ended { winner: TeamSide },
}

/// Host battleground operations used by the solo arena
pub trait Battleground: Send + Sync {
    fn instance_id(&self) -> InstanceId;

    fn is_arena(&self) -> bool;

    /// Arena type, `None` for non-arena battlegrounds
    fn arena_type(&self) -> Option<ArenaType>;

    /// Arena team playing on a side
    fn arena_team_id_for(&self, side: TeamSide) -> Option<ArenaTeamId>;

    /// Players currently registered in the instance
    fn player_guids(&self) -> Vec<PlayerGuid>;

    fn is_rated(&self) -> bool;

    fn set_rated(&mut self, rated: bool);

    fn status(&self) -> BattlegroundStatus;

    /// End the match in favour of `winner`; neutral ends it without a winner
    fn end_battleground(&mut self, winner: TeamSide);
}

/// Concrete arena instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaInstance {
    id: InstanceId,
    arena_type: Option<ArenaType>,
    rated: bool,
    status: BattlegroundStatus,
    players: Vec<PlayerGuid>,
    arena_teams: [Option<ArenaTeamId>; 2],
}

impl ArenaInstance {
    pub fn new(id: InstanceId, arena_type: ArenaType, rated: bool) -> Self {
        Self {
            id,
            arena_type: Some(arena_type),
            rated,
            status: BattlegroundStatus::WaitJoin,
            players: Vec::new(),
            arena_teams: [None; 2],
        }
    }

    /// A non-arena battleground, for checking arena-only operations skip it
    pub fn battleground(id: InstanceId) -> Self {
        Self {
            id,
            arena_type: None,
            rated: false,
            status: BattlegroundStatus::WaitJoin,
            players: Vec::new(),
            arena_teams: [None; 2],
        }
    }

    pub fn add_player(&mut self, guid: PlayerGuid) -> Result<()> {
        if matches!(self.status, BattlegroundStatus::Ended { .. }) {
            return Err(ArenaError::InternalError {
                message: format!("Battleground {} has ended", self.id),
            }
            .into());
        }

        if !self.players.contains(&guid) {
            self.players.push(guid);
        }
        Ok(())
    }

    pub fn remove_player(&mut self, guid: PlayerGuid) -> bool {
        let before = self.players.len();
        self.players.retain(|p| *p != guid);
        self.players.len() != before
    }

    pub fn set_arena_team(&mut self, side: TeamSide, team_id: ArenaTeamId) -> Result<()> {
        let index = side.index().ok_or_else(|| ArenaError::InternalError {
            message: "Arena teams need a playable side".to_string(),
        })?;
        self.arena_teams[index] = Some(team_id);
        Ok(())
    }

    /// Move from joining to the running match
    pub fn start(&mut self) {
        if self.status == BattlegroundStatus::WaitJoin {
            self.status = BattlegroundStatus::InProgress;
        }
    }

    pub fn winner(&self) -> Option<TeamSide> {
        match self.status {
            BattlegroundStatus::Ended { winner } => Some(winner),
            _ => None,
        }
    }
}

impl Battleground for ArenaInstance {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn is_arena(&self) -> bool {
        self.arena_type.is_some()
    }

    fn arena_type(&self) -> Option<ArenaType> {
        self.arena_type
    }

    fn arena_team_id_for(&self, side: TeamSide) -> Option<ArenaTeamId> {
        side.index().and_then(|index| self.arena_teams[index])
    }

    fn player_guids(&self) -> Vec<PlayerGuid> {
        self.players.clone()
    }

    fn is_rated(&self) -> bool {
        self.rated
    }

    fn set_rated(&mut self, rated: bool) {
        self.rated = rated;
    }

    fn status(&self) -> BattlegroundStatus {
        self.status
    }

    fn end_battleground(&mut self, winner: TeamSide) {
        self.status = BattlegroundStatus::Ended { winner };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_lifecycle() {
        let mut arena = ArenaInstance::new(1, ArenaType::SoloThreeVThree, true);
        assert!(arena.is_arena());
        assert_eq!(arena.status(), BattlegroundStatus::WaitJoin);

        arena.add_player(10).unwrap();
        arena.add_player(10).unwrap();
        assert_eq!(arena.player_guids(), vec![10]);

        arena.start();
        assert_eq!(arena.status(), BattlegroundStatus::InProgress);

        arena.end_battleground(TeamSide::Neutral);
        assert_eq!(arena.winner(), Some(TeamSide::Neutral));
        assert!(arena.add_player(11).is_err());
    }

    #[test]
    fn test_arena_teams_per_side() {
        let mut arena = ArenaInstance::new(1, ArenaType::SoloThreeVThree, true);
        arena.set_arena_team(TeamSide::Alliance, 100).unwrap();
        arena.set_arena_team(TeamSide::Horde, 101).unwrap();
        assert!(arena.set_arena_team(TeamSide::Neutral, 102).is_err());

        assert_eq!(arena.arena_team_id_for(TeamSide::Alliance), Some(100));
        assert_eq!(arena.arena_team_id_for(TeamSide::Horde), Some(101));
        assert_eq!(arena.arena_team_id_for(TeamSide::Neutral), None);
    }

    #[test]
    fn test_plain_battleground() {
        let bg = ArenaInstance::battleground(2);
        assert!(!bg.is_arena());
        assert_eq!(bg.arena_type(), None);
    }

    #[test]
    fn test_remove_player() {
        let mut arena = ArenaInstance::new(1, ArenaType::SoloThreeVThree, true);
        arena.add_player(10).unwrap();
        assert!(arena.remove_player(10));
        assert!(!arena.remove_player(10));
    }
}
