//! Scenario runner
//!
//! Loads a TOML description of a queue (talent rows, players, leavers),
//! wires the in-memory collaborators and walks one solo match through
//! assembly, temporary teams, the start check, leave penalties and cleanup.

use crate::battleground::{ArenaInstance, Battleground};
use crate::config::AppConfig;
use crate::error::{ArenaError, Result};
use crate::events::EventPublisher;
use crate::metrics::MetricsCollector;
use crate::player::{ArenaPlayer, InMemoryPlayerRegistry, PlayerLookup};
use crate::queue::{BattlegroundQueue, QueuedGroup};
use crate::solo::{HostServices, SoloQueueManager, SoloQueueStats, StartCheck};
use crate::talent::{InMemoryTalentStore, TalentEntry};
use crate::team::{
    ArenaTeam, ArenaTeamMember, ArenaTeamRepository, InMemoryArenaTeamRepository, RatingPenalty,
};
use crate::types::{
    ArenaTeamId, ArenaType, BracketId, InstanceId, PlayerGuid, TalentCategory, TeamSide,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const SCENARIO_INSTANCE_ID: InstanceId = 1;

/// Highest talent row id a scenario may use; rows are scanned by id
pub const MAX_SCENARIO_TALENT_ID: u32 = 0xFFFF;

/// A player in a scenario, queued in file order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPlayer {
    pub guid: PlayerGuid,
    pub name: String,
    /// Rating of the player's persistent solo team; no team when absent
    #[serde(default)]
    pub team_rating: Option<u32>,
    #[serde(default)]
    pub matchmaker_rating: Option<u32>,
    /// Learned talent spell ids in the active specialisation
    #[serde(default)]
    pub talents: Vec<u32>,
    #[serde(default)]
    pub spectator: bool,
    /// Whether the player shows up once invited
    #[serde(default = "default_true")]
    pub enters_arena: bool,
}

/// A departure after the start check
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScenarioLeaver {
    pub guid: PlayerGuid,
    #[serde(default = "default_true")]
    pub in_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_bracket")]
    pub bracket: BracketId,
    #[serde(default = "default_true")]
    pub rated: bool,
    #[serde(default)]
    pub talents: Vec<TalentEntry>,
    #[serde(default)]
    pub players: Vec<ScenarioPlayer>,
    #[serde(default)]
    pub leavers: Vec<ScenarioLeaver>,
}

fn default_true() -> bool {
    true
}

fn default_bracket() -> BracketId {
    1
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject out-of-range talent rows, duplicate players and leavers who
    /// never queued
    pub fn validate(&self) -> Result<()> {
        if let Some(entry) = self
            .talents
            .iter()
            .find(|t| t.talent_id > MAX_SCENARIO_TALENT_ID)
        {
            return Err(ArenaError::InvalidScenario {
                reason: format!(
                    "Talent id {} above limit {}",
                    entry.talent_id, MAX_SCENARIO_TALENT_ID
                ),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.guid) {
                return Err(ArenaError::InvalidScenario {
                    reason: format!("Duplicate player guid {}", player.guid),
                }
                .into());
            }
        }

        if let Some(leaver) = self.leavers.iter().find(|l| !seen.contains(&l.guid)) {
            return Err(ArenaError::InvalidScenario {
                reason: format!("Leaver {} is not a scenario player", leaver.guid),
            }
            .into());
        }

        Ok(())
    }
}

/// Outcome of a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub matched: bool,
    /// Players refused for forbidden talents
    pub refused: Vec<PlayerGuid>,
    pub categories: BTreeMap<PlayerGuid, TalentCategory>,
    pub alliance: Vec<PlayerGuid>,
    pub horde: Vec<PlayerGuid>,
    /// `[alliance, horde]` temporary team ids
    pub temp_teams: Option<[ArenaTeamId; 2]>,
    pub temp_team_ratings: Vec<u32>,
    pub start: Option<StartCheck>,
    pub penalties: Vec<RatingPenalty>,
    pub released_teams: Vec<ArenaTeamId>,
    pub stats: SoloQueueStats,
}

/// Run one scenario against fresh in-memory collaborators
pub async fn run_scenario(
    scenario: &Scenario,
    config: &AppConfig,
    event_publisher: Arc<dyn EventPublisher>,
    metrics_collector: Arc<MetricsCollector>,
) -> Result<ScenarioReport> {
    let teams = Arc::new(InMemoryArenaTeamRepository::new());
    let players = Arc::new(InMemoryPlayerRegistry::new());
    let talents = Arc::new(InMemoryTalentStore::from_entries(
        scenario.talents.iter().cloned(),
    )?);

    for (index, entry) in scenario.players.iter().enumerate() {
        let mut player =
            ArenaPlayer::new(entry.guid, entry.name.clone()).with_talents(0, entry.talents.clone());
        if entry.spectator {
            player = player.as_spectator();
        }

        if let Some(rating) = entry.team_rating {
            let team_id = index as ArenaTeamId + 1;
            let mut member = ArenaTeamMember::new(entry.guid, entry.name.clone());
            member.personal_rating = rating;
            member.matchmaker_rating = entry
                .matchmaker_rating
                .unwrap_or(config.solo.default_matchmaker_rating);

            teams.add_team(
                ArenaTeam::new(team_id, format!("{}'s Team", entry.name), ArenaType::SoloThreeVThree)
                    .with_rating(rating)
                    .with_member(member),
            )?;
            player = player.with_arena_team(ArenaType::SoloThreeVThree, team_id);
        }

        players.insert(player)?;
    }

    let manager = SoloQueueManager::with_metrics(
        config.solo.clone(),
        &config.talents,
        HostServices {
            teams: teams.clone(),
            players: players.clone(),
            talents,
        },
        event_publisher,
        metrics_collector,
    );

    let mut report = ScenarioReport {
        matched: false,
        refused: Vec::new(),
        categories: BTreeMap::new(),
        alliance: Vec::new(),
        horde: Vec::new(),
        temp_teams: None,
        temp_team_ratings: Vec::new(),
        start: None,
        penalties: Vec::new(),
        released_teams: Vec::new(),
        stats: SoloQueueStats::default(),
    };

    let mut queue = BattlegroundQueue::new(ArenaType::SoloThreeVThree);
    for (index, entry) in scenario.players.iter().enumerate() {
        let Some(player) = players.find_player(entry.guid) else {
            continue;
        };
        if player.is_spectator {
            continue;
        }

        report
            .categories
            .insert(player.guid, manager.talent_category(&player));

        if !manager.check_talents(Some(&player)).await? {
            report.refused.push(player.guid);
            continue;
        }

        queue.enqueue(
            scenario.bracket,
            QueuedGroup::solo(index as u64 + 1, player.guid, scenario.rated),
        )?;
    }

    report.matched = manager.check_queue(&mut queue, scenario.bracket).await?;
    if !report.matched {
        info!("Scenario ended without a match");
        report.stats = manager.stats()?;
        return Ok(report);
    }

    let temp_teams = manager.create_temp_arena_teams(&queue)?;
    for team_id in temp_teams {
        if let Some(team) = teams.get_team(team_id)? {
            report.temp_team_ratings.push(team.rating());
        }
    }
    report.temp_teams = Some(temp_teams);

    let mut arena = ArenaInstance::new(
        SCENARIO_INSTANCE_ID,
        ArenaType::SoloThreeVThree,
        scenario.rated,
    );
    for (side, team_id) in TeamSide::PLAYABLE.into_iter().zip(temp_teams) {
        arena.set_arena_team(side, team_id)?;
    }

    for side in TeamSide::PLAYABLE {
        let selected: Vec<_> = queue
            .selection_pool(side)
            .map(|pool| pool.selected_groups().to_vec())
            .unwrap_or_default();

        for group_id in selected {
            let Some(guid) = queue.group(group_id).and_then(|g| g.leader()) else {
                continue;
            };
            queue.mark_invited(group_id, SCENARIO_INSTANCE_ID)?;

            match side {
                TeamSide::Alliance => report.alliance.push(guid),
                _ => report.horde.push(guid),
            }

            let enters = scenario
                .players
                .iter()
                .find(|p| p.guid == guid)
                .map(|p| p.enters_arena)
                .unwrap_or(true);
            if enters {
                arena.add_player(guid)?;
            } else {
                debug!("Player {} did not enter the arena", guid);
            }
        }
    }

    let start = manager.check_start(&mut arena).await?;
    report.start = Some(start);

    if matches!(start, StartCheck::Ready | StartCheck::Incomplete { .. }) {
        arena.start();

        for leaver in &scenario.leavers {
            let Some(player) = players.find_player(leaver.guid) else {
                continue;
            };
            if !arena.remove_player(player.guid) {
                continue;
            }

            if let Some(penalty) = manager.count_as_loss(&player, leaver.in_progress).await? {
                report.penalties.push(penalty);
            }
        }
    }

    report.released_teams = manager.clean_up(&arena).await?;
    report.stats = manager.stats()?;

    info!(
        "Scenario finished - start: {:?}, penalties: {}, released teams: {}",
        start,
        report.penalties.len(),
        report.released_teams.len()
    );

    Ok(report)
}
