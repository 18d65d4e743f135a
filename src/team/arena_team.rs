//! Arena team model
//!
//! Persistent teams come from the host; temporary teams are assembled per
//! solo match and carry ids at or above [`MAX_ARENA_TEAM_ID`].

use crate::player::ArenaPlayer;
use crate::team::repository::ArenaTeamRepository;
use crate::types::{ArenaTeamId, ArenaType, PlayerGuid, MAX_ARENA_TEAM_ID};
use crate::utils::integer_mean;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// MMR given to a member without history
pub const DEFAULT_MATCHMAKER_RATING: u32 = 1500;

/// Team-wide rating and game counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaTeamStats {
    pub rating: u32,
    pub week_games: u32,
    pub week_wins: u32,
    pub season_games: u32,
    pub season_wins: u32,
    pub rank: u32,
}

/// Per-member rating and game counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaTeamMember {
    pub guid: PlayerGuid,
    pub name: String,
    pub week_games: u32,
    pub week_wins: u32,
    pub season_games: u32,
    pub season_wins: u32,
    pub personal_rating: u32,
    pub matchmaker_rating: u32,
}

impl ArenaTeamMember {
    pub fn new(guid: PlayerGuid, name: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
            week_games: 0,
            week_wins: 0,
            season_games: 0,
            season_wins: 0,
            personal_rating: 0,
            matchmaker_rating: DEFAULT_MATCHMAKER_RATING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaTeam {
    pub id: ArenaTeamId,
    pub name: String,
    pub arena_type: ArenaType,
    pub captain: Option<PlayerGuid>,
    pub stats: ArenaTeamStats,
    pub members: Vec<ArenaTeamMember>,
}

impl ArenaTeam {
    pub fn new(id: ArenaTeamId, name: impl Into<String>, arena_type: ArenaType) -> Self {
        Self {
            id,
            name: name.into(),
            arena_type,
            captain: None,
            stats: ArenaTeamStats::default(),
            members: Vec::new(),
        }
    }

    /// Build the temporary team one side of a solo match plays as
    ///
    /// Each player's member record is copied from their persistent team in
    /// the same arena slot; players without one are left out. The team
    /// rating is the mean rating of those persistent teams.
    pub fn create_temp(
        id: ArenaTeamId,
        players: &[ArenaPlayer],
        arena_type: ArenaType,
        name: impl Into<String>,
        repository: &dyn ArenaTeamRepository,
    ) -> crate::error::Result<Self> {
        let mut team = Self::new(id, name, arena_type);
        let mut source_ratings = Vec::with_capacity(players.len());

        for player in players {
            let Some(source_id) = player.arena_team_id(arena_type) else {
                debug!(
                    "Player {} has no {} team, not added to temp team {}",
                    player.guid, arena_type, id
                );
                continue;
            };
            let Some(source) = repository.get_team(source_id)? else {
                continue;
            };

            let member = source
                .member(player.guid)
                .cloned()
                .unwrap_or_else(|| ArenaTeamMember::new(player.guid, player.name.clone()));

            source_ratings.push(source.stats.rating);
            team.members.push(member);
        }

        team.stats.rating = integer_mean(&source_ratings);
        team.captain = team.members.first().map(|m| m.guid);

        Ok(team)
    }

    pub fn with_rating(mut self, rating: u32) -> Self {
        self.stats.rating = rating;
        self
    }

    pub fn with_member(mut self, member: ArenaTeamMember) -> Self {
        self.add_member(member);
        self
    }

    pub fn add_member(&mut self, member: ArenaTeamMember) {
        if self.captain.is_none() {
            self.captain = Some(member.guid);
        }
        self.members.push(member);
    }

    pub fn member(&self, guid: PlayerGuid) -> Option<&ArenaTeamMember> {
        self.members.iter().find(|m| m.guid == guid)
    }

    pub fn member_mut(&mut self, guid: PlayerGuid) -> Option<&mut ArenaTeamMember> {
        self.members.iter_mut().find(|m| m.guid == guid)
    }

    pub fn rating(&self) -> u32 {
        self.stats.rating
    }

    pub fn is_temporary(&self) -> bool {
        self.id >= MAX_ARENA_TEAM_ID
    }
}

/// Matchmaking rating of a team, 0 when there is no team
pub fn average_mmr(team: Option<&ArenaTeam>) -> u32 {
    team.map(|t| t.stats.rating).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::repository::InMemoryArenaTeamRepository;

    fn solo_team(id: ArenaTeamId, guid: PlayerGuid, rating: u32, mmr: u32) -> ArenaTeam {
        let mut member = ArenaTeamMember::new(guid, format!("player{}", guid));
        member.matchmaker_rating = mmr;
        member.personal_rating = rating;
        ArenaTeam::new(id, format!("solo{}", guid), ArenaType::SoloThreeVThree)
            .with_rating(rating)
            .with_member(member)
    }

    #[test]
    fn test_average_mmr() {
        assert_eq!(average_mmr(None), 0);
        let team = ArenaTeam::new(1, "t", ArenaType::SoloThreeVThree).with_rating(1720);
        assert_eq!(average_mmr(Some(&team)), 1720);
    }

    #[test]
    fn test_is_temporary() {
        assert!(!ArenaTeam::new(1, "t", ArenaType::ThreeVThree).is_temporary());
        assert!(ArenaTeam::new(MAX_ARENA_TEAM_ID, "t", ArenaType::ThreeVThree).is_temporary());
    }

    #[test]
    fn test_create_temp_copies_members() {
        let repository = InMemoryArenaTeamRepository::new();
        repository.add_team(solo_team(10, 1, 1500, 1600)).unwrap();
        repository.add_team(solo_team(11, 2, 1700, 1650)).unwrap();

        let players = vec![
            ArenaPlayer::new(1, "player1").with_arena_team(ArenaType::SoloThreeVThree, 10),
            ArenaPlayer::new(2, "player2").with_arena_team(ArenaType::SoloThreeVThree, 11),
            ArenaPlayer::new(3, "player3"),
        ];

        let team = ArenaTeam::create_temp(
            MAX_ARENA_TEAM_ID,
            &players,
            ArenaType::SoloThreeVThree,
            "Solo Team - 1",
            &repository,
        )
        .unwrap();

        assert_eq!(team.members.len(), 2);
        assert_eq!(team.stats.rating, 1600);
        assert_eq!(team.captain, Some(1));
        assert_eq!(team.member(2).unwrap().matchmaker_rating, 1650);
        assert!(team.is_temporary());
    }

    #[test]
    fn test_create_temp_without_persistent_teams() {
        let repository = InMemoryArenaTeamRepository::new();
        let players = vec![ArenaPlayer::new(1, "player1")];

        let team = ArenaTeam::create_temp(
            MAX_ARENA_TEAM_ID,
            &players,
            ArenaType::SoloThreeVThree,
            "Solo Team - 1",
            &repository,
        )
        .unwrap();

        assert!(team.members.is_empty());
        assert_eq!(team.stats.rating, 0);
        assert_eq!(team.captain, None);
    }
}
