//! Test fixtures for integration testing
//!
//! Builds a talent table with one talent per role, players who have learned
//! the top rank of their role's talent, and persistent solo teams.

#![allow(dead_code)]

use solo_arena::config::{SoloQueueSettings, TalentTabSettings};
use solo_arena::events::RecordingEventPublisher;
use solo_arena::player::{ArenaPlayer, InMemoryPlayerRegistry, PlayerLookup};
use solo_arena::queue::{BattlegroundQueue, QueuedGroup};
use solo_arena::solo::{HostServices, SoloQueueManager};
use solo_arena::talent::{InMemoryTalentStore, TalentEntry};
use solo_arena::team::{ArenaTeam, ArenaTeamMember, ArenaTeamRepository, InMemoryArenaTeamRepository};
use solo_arena::types::{ArenaTeamId, ArenaType, BracketId, PlayerGuid, TalentCategory};
use std::sync::Arc;

pub const BRACKET: BracketId = 7;

/// Top-rank spell of the talent used for each role
pub fn role_spell(category: TalentCategory) -> u32 {
    match category {
        TalentCategory::Melee => 1005,
        TalentCategory::Range => 2005,
        TalentCategory::Healer => 3005,
    }
}

/// Talent table: Arms (383), Balance (81), Discipline (201)
pub fn talent_store() -> InMemoryTalentStore {
    InMemoryTalentStore::from_entries([
        TalentEntry {
            talent_id: 1,
            tab_id: 383,
            rank_ids: [1001, 1002, 1003, 1004, 1005],
        },
        TalentEntry {
            talent_id: 2,
            tab_id: 81,
            rank_ids: [2001, 2002, 2003, 2004, 2005],
        },
        TalentEntry {
            talent_id: 3,
            tab_id: 201,
            rank_ids: [3001, 3002, 3003, 3004, 3005],
        },
    ])
    .unwrap()
}

/// A complete in-memory host with a manager over it
pub struct TestWorld {
    pub teams: Arc<InMemoryArenaTeamRepository>,
    pub players: Arc<InMemoryPlayerRegistry>,
    pub publisher: Arc<RecordingEventPublisher>,
    pub manager: SoloQueueManager,
    pub queue: BattlegroundQueue,
    next_group_id: u64,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::with_settings(SoloQueueSettings::default())
    }

    pub fn with_settings(settings: SoloQueueSettings) -> Self {
        let teams = Arc::new(InMemoryArenaTeamRepository::new());
        let players = Arc::new(InMemoryPlayerRegistry::new());
        let publisher = Arc::new(RecordingEventPublisher::new());

        let manager = SoloQueueManager::new(
            settings,
            &TalentTabSettings::default(),
            HostServices {
                teams: teams.clone(),
                players: players.clone(),
                talents: Arc::new(talent_store()),
            },
            publisher.clone(),
        )
        .unwrap();

        Self {
            teams,
            players,
            publisher,
            manager,
            queue: BattlegroundQueue::new(ArenaType::SoloThreeVThree),
            next_group_id: 1,
        }
    }

    /// Register a player with a persistent solo team whose id is the guid
    pub fn add_player(
        &self,
        guid: PlayerGuid,
        category: TalentCategory,
        rating: u32,
        mmr: u32,
    ) -> ArenaPlayer {
        let name = format!("Player{}", guid);
        let team_id = guid as ArenaTeamId;

        let mut member = ArenaTeamMember::new(guid, name.clone());
        member.personal_rating = rating;
        member.matchmaker_rating = mmr;
        self.teams
            .add_team(
                ArenaTeam::new(team_id, format!("{} Team", name), ArenaType::SoloThreeVThree)
                    .with_rating(rating)
                    .with_member(member),
            )
            .unwrap();

        let player = ArenaPlayer::new(guid, name)
            .with_talents(0, [role_spell(category)])
            .with_arena_team(ArenaType::SoloThreeVThree, team_id);
        self.players.insert(player.clone()).unwrap();
        player
    }

    /// Register a player and queue them alone in the test bracket
    pub fn queue_player(
        &mut self,
        guid: PlayerGuid,
        category: TalentCategory,
        rating: u32,
        mmr: u32,
    ) -> ArenaPlayer {
        let player = self.add_player(guid, category, rating, mmr);
        let group_id = self.next_group_id;
        self.next_group_id += 1;
        self.queue
            .enqueue(BRACKET, QueuedGroup::solo(group_id, guid, true))
            .unwrap();
        player
    }

    /// Queue four damage dealers and two healers, all rated 1500
    ///
    /// Guids 1..=6 in the order dps, dps, healer, dps, dps, healer.
    pub fn queue_standard_six(&mut self) {
        let roles = [
            TalentCategory::Melee,
            TalentCategory::Range,
            TalentCategory::Healer,
            TalentCategory::Melee,
            TalentCategory::Range,
            TalentCategory::Healer,
        ];
        for (index, category) in roles.into_iter().enumerate() {
            self.queue_player(index as u64 + 1, category, 1500, 1500);
        }
    }

    /// Current snapshot of a registered player
    pub fn players_snapshot(&self, guid: PlayerGuid) -> ArenaPlayer {
        self.players.find_player(guid).unwrap()
    }

    /// Leader guids of one side's selection pool, in selection order
    pub fn selected_players(&self, side: solo_arena::types::TeamSide) -> Vec<PlayerGuid> {
        self.queue
            .selection_pool(side)
            .map(|pool| {
                pool.selected_groups()
                    .iter()
                    .filter_map(|id| self.queue.group(*id).and_then(|g| g.leader()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
