//! Solo 3v3 queue manager
//!
//! This module provides the SoloQueueManager that the host calls into from
//! its queue update, battleground lifecycle and logout hooks: assembling
//! two role-balanced teams from individual queuers, creating and removing
//! their temporary arena teams, stopping arenas that never filled, and
//! counting early departures as losses.

use crate::battleground::Battleground;
use crate::config::{SoloQueueSettings, TalentTabSettings};
use crate::error::{ArenaError, Result};
use crate::events::{
    ArenaAborted, ArenaEvent, EventPublisher, RatingPenaltyApplied, SoloTeamsAssembled,
    SystemMessage, TempTeamsReleased,
};
use crate::metrics::MetricsCollector;
use crate::player::{ArenaPlayer, PlayerLookup};
use crate::queue::{collect_candidates, switch_team, BattlegroundQueue, Candidate, TeamSplit};
use crate::rating::MatchQuality;
use crate::talent::{TalentClassifier, TalentStore};
use crate::team::{
    apply_leave_penalty, average_mmr, ArenaTeam, ArenaTeamRepository, LeavePhase, RatingPenalty,
};
use crate::types::{
    ArenaTeamId, ArenaType, BracketId, PlayerGuid, TalentCategory, TeamSide, SOLO_3V3_PLAYERS,
    SOLO_3V3_TEAM_SIZE,
};
use crate::utils::{current_timestamp, generate_match_id};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Shown to a player refused for forbidden talents
pub const FORBIDDEN_TALENTS_MESSAGE: &str =
    "You can't join, because you have invested to much points in a forbidden talent. Please edit your talents.";

/// Statistics about solo queue operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloQueueStats {
    /// Total number of queue checks
    pub queue_checks: u64,
    /// Total number of matches assembled
    pub matches_assembled: u64,
    /// Total number of leave penalties applied
    pub penalties_applied: u64,
    /// Total number of arenas ended for missing players
    pub arenas_aborted: u64,
    /// Total number of temporary teams created
    pub temp_teams_created: u64,
    /// Total number of temporary teams removed
    pub temp_teams_removed: u64,
    /// Total number of players refused for forbidden talents
    pub talent_rejections: u64,
}

/// Result of checking whether a solo arena can start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCheck {
    /// Every player is inside
    Ready,
    /// A spectator is present; the check is skipped
    SpectatorPresent,
    /// Players are missing but stopping incomplete games is disabled
    Incomplete { present: usize },
    /// Players are missing; the arena was ended unrated
    Aborted { present: usize },
}

/// Host collaborators the manager reads and writes through
#[derive(Clone)]
pub struct HostServices {
    pub teams: Arc<dyn ArenaTeamRepository>,
    pub players: Arc<dyn PlayerLookup>,
    pub talents: Arc<dyn TalentStore>,
}

/// The solo queue manager
#[derive(Clone)]
pub struct SoloQueueManager {
    /// Queue, penalty and start settings
    settings: SoloQueueSettings,
    /// Talent tree classification tables
    classifier: Arc<TalentClassifier>,
    /// Host arena team manager, player accessor and talent table
    host: HostServices,
    /// Event publisher for penalties, assembled matches and messages
    event_publisher: Arc<dyn EventPublisher>,
    /// Metrics collector for recording operation data
    metrics_collector: Arc<MetricsCollector>,
    /// Manager statistics
    stats: Arc<RwLock<SoloQueueStats>>,
}

impl SoloQueueManager {
    /// Create a new manager with its own metrics registry
    pub fn new(
        settings: SoloQueueSettings,
        talent_tabs: &TalentTabSettings,
        host: HostServices,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self> {
        let metrics_collector = Arc::new(MetricsCollector::new()?);
        Ok(Self::with_metrics(
            settings,
            talent_tabs,
            host,
            event_publisher,
            metrics_collector,
        ))
    }

    /// Create a new manager with a shared metrics collector
    pub fn with_metrics(
        settings: SoloQueueSettings,
        talent_tabs: &TalentTabSettings,
        host: HostServices,
        event_publisher: Arc<dyn EventPublisher>,
        metrics_collector: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            settings,
            classifier: Arc::new(TalentClassifier::new(talent_tabs)),
            host,
            event_publisher,
            metrics_collector,
            stats: Arc::new(RwLock::new(SoloQueueStats::default())),
        }
    }

    pub fn settings(&self) -> &SoloQueueSettings {
        &self.settings
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics_collector.clone()
    }

    /// Snapshot of the manager statistics
    pub fn stats(&self) -> Result<SoloQueueStats> {
        let stats = self.stats.read().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire stats lock".to_string(),
        })?;
        Ok(stats.clone())
    }

    fn update_stats(&self, update: impl FnOnce(&mut SoloQueueStats)) -> Result<()> {
        let mut stats = self.stats.write().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire stats lock".to_string(),
        })?;
        update(&mut stats);
        Ok(())
    }

    /// Matchmaking rating of a team by id, 0 when the team does not exist
    pub fn average_mmr(&self, team_id: Option<ArenaTeamId>) -> Result<u32> {
        let team = match team_id {
            Some(id) => self.host.teams.get_team(id)?,
            None => None,
        };
        Ok(average_mmr(team.as_ref()))
    }

    /// Role a player fills, from their active talent build
    pub fn talent_category(&self, player: &ArenaPlayer) -> TalentCategory {
        self.classifier.classify(player, self.host.talents.as_ref())
    }

    /// Whether a player may join the solo queue with their talents
    ///
    /// With forbidden talents blocked, a player at or above the point
    /// threshold in forbidden trees is refused and told why.
    pub async fn check_talents(&self, player: Option<&ArenaPlayer>) -> Result<bool> {
        let Some(player) = player else {
            return Ok(false);
        };

        if !self.settings.block_forbidden_talents {
            return Ok(true);
        }

        let points = self
            .classifier
            .forbidden_points(player, self.host.talents.as_ref());

        if points < self.settings.forbidden_talent_threshold {
            return Ok(true);
        }

        info!(
            "Refusing player {} ('{}') - {} points in forbidden talents (limit {})",
            player.guid, player.name, points, self.settings.forbidden_talent_threshold
        );

        self.metrics_collector.record_talent_rejection();
        self.update_stats(|stats| stats.talent_rejections += 1)?;

        self.event_publisher
            .publish(ArenaEvent::SystemMessage(SystemMessage {
                player: player.guid,
                text: FORBIDDEN_TALENTS_MESSAGE.to_string(),
                timestamp: current_timestamp(),
            }))
            .await?;

        Ok(false)
    }

    /// Count an early departure as a loss for the player's solo team
    ///
    /// Spectators and players without a solo team are ignored. Returns the
    /// applied penalty.
    pub async fn count_as_loss(
        &self,
        player: &ArenaPlayer,
        is_in_progress: bool,
    ) -> Result<Option<RatingPenalty>> {
        if player.is_spectator {
            debug!("Player {} is a spectator, no penalty", player.guid);
            return Ok(None);
        }

        let Some(team_id) = player.arena_team_id(ArenaType::SoloThreeVThree) else {
            debug!("Player {} has no solo team, no penalty", player.guid);
            return Ok(None);
        };
        let Some(mut team) = self.host.teams.get_team(team_id)? else {
            warn!(
                "Player {} references missing solo team {}",
                player.guid, team_id
            );
            return Ok(None);
        };

        let phase = LeavePhase::from_in_progress(is_in_progress);
        let rating_loss = self.settings.rating_penalty(is_in_progress);

        // Stored ratings, so the team's own pre-penalty rating is counted too
        let stored_ratings: Vec<u32> = self
            .host
            .teams
            .ratings_of_type(ArenaType::SoloThreeVThree)?
            .into_iter()
            .map(|(_, rating)| rating)
            .collect();

        let penalty =
            apply_leave_penalty(&mut team, player.guid, phase, rating_loss, stored_ratings);

        info!(
            "Leave penalty - player: {} ('{}'), team: {}, phase: {}, rating: {} -> {}, rank: {}",
            player.guid,
            player.name,
            team.id,
            phase.as_str(),
            penalty.old_rating,
            penalty.new_rating,
            penalty.new_rank
        );

        self.host.teams.save_team(&team)?;

        self.metrics_collector.record_penalty(phase, rating_loss);
        self.update_stats(|stats| stats.penalties_applied += 1)?;

        self.event_publisher
            .publish(ArenaEvent::RatingPenaltyApplied(RatingPenaltyApplied {
                penalty: penalty.clone(),
                timestamp: current_timestamp(),
            }))
            .await?;

        Ok(Some(penalty))
    }

    /// Remove the temporary teams of a finished solo arena
    ///
    /// Other battlegrounds and persistent teams are left alone. Returns the
    /// removed team ids.
    pub async fn clean_up(&self, bg: &dyn Battleground) -> Result<Vec<ArenaTeamId>> {
        if !bg.is_arena() || bg.arena_type() != Some(ArenaType::SoloThreeVThree) {
            return Ok(Vec::new());
        }

        let mut removed = Vec::new();
        for side in TeamSide::PLAYABLE {
            let Some(team_id) = bg.arena_team_id_for(side) else {
                continue;
            };
            let Some(team) = self.host.teams.get_team(team_id)? else {
                continue;
            };

            if team.is_temporary() && self.host.teams.remove_team(team.id)? {
                debug!("Removed temporary team {} ('{}')", team.id, team.name);
                removed.push(team.id);
            }
        }

        if !removed.is_empty() {
            info!(
                "Released {} temporary team(s) of arena {}",
                removed.len(),
                bg.instance_id()
            );

            self.metrics_collector.record_temp_teams_removed(removed.len());
            self.update_stats(|stats| stats.temp_teams_removed += removed.len() as u64)?;

            self.event_publisher
                .publish(ArenaEvent::TempTeamsReleased(TempTeamsReleased {
                    instance_id: bg.instance_id(),
                    team_ids: removed.clone(),
                    timestamp: current_timestamp(),
                }))
                .await?;
        }

        Ok(removed)
    }

    /// Check that all six players entered a solo arena
    ///
    /// Offline entries are not counted. When players are missing and
    /// incomplete games are stopped, the arena is made unrated and ended
    /// without a winner.
    pub async fn check_start(&self, bg: &mut dyn Battleground) -> Result<StartCheck> {
        let mut present = 0;

        for guid in bg.player_guids() {
            let Some(player) = self.host.players.find_player(guid) else {
                continue;
            };

            if player.is_spectator {
                debug!(
                    "Spectator {} in arena {}, skipping start check",
                    guid,
                    bg.instance_id()
                );
                return Ok(StartCheck::SpectatorPresent);
            }

            present += 1;
        }

        if present >= SOLO_3V3_PLAYERS {
            return Ok(StartCheck::Ready);
        }

        if !self.settings.stop_game_incomplete {
            warn!(
                "Arena {} starting with {}/{} players",
                bg.instance_id(),
                present,
                SOLO_3V3_PLAYERS
            );
            return Ok(StartCheck::Incomplete { present });
        }

        info!(
            "Ending arena {} unrated - only {}/{} players entered",
            bg.instance_id(),
            present,
            SOLO_3V3_PLAYERS
        );

        bg.set_rated(false);
        bg.end_battleground(TeamSide::Neutral);

        self.metrics_collector.record_arena_aborted();
        self.update_stats(|stats| stats.arenas_aborted += 1)?;

        self.event_publisher
            .publish(ArenaEvent::ArenaAborted(ArenaAborted {
                instance_id: bg.instance_id(),
                players_present: present,
                timestamp: current_timestamp(),
            }))
            .await?;

        Ok(StartCheck::Aborted { present })
    }

    /// MMR of a player's solo team membership, or the configured default
    fn player_mmr(&self, guid: PlayerGuid) -> Result<u32> {
        let default = self.settings.default_matchmaker_rating;

        let Some(team_id) = self
            .host
            .players
            .find_player(guid)
            .and_then(|p| p.arena_team_id(ArenaType::SoloThreeVThree))
        else {
            return Ok(default);
        };

        Ok(self
            .host
            .teams
            .get_team(team_id)?
            .and_then(|team| team.member(guid).map(|m| m.matchmaker_rating))
            .unwrap_or(default))
    }

    fn candidate_mmrs<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a Candidate>,
    ) -> Result<HashMap<PlayerGuid, u32>> {
        candidates
            .into_iter()
            .map(|c| Ok((c.guid, self.player_mmr(c.guid)?)))
            .collect()
    }

    /// Try to assemble a solo match from one bracket of the queue
    ///
    /// Scans the alliance side in join order for single-player groups,
    /// buckets them into four damage dealers and two healers, and fills the
    /// selection pools: three players stay alliance, three are switched to
    /// horde. Returns whether both pools together hold six players.
    pub async fn check_queue(
        &self,
        queue: &mut BattlegroundQueue,
        bracket: BracketId,
    ) -> Result<bool> {
        let timer = self.metrics_collector.start_timer();

        queue.reset_selection_pools();

        let buckets = collect_candidates(queue, bracket, |guid| {
            self.host
                .players
                .find_player(guid)
                .map(|player| self.talent_category(&player))
        });

        debug!(
            "Bracket {} candidates - dps: {}, healers: {}",
            bracket,
            buckets.dps.len(),
            buckets.healers.len()
        );

        let mmrs = self.candidate_mmrs(buckets.dps.iter().chain(&buckets.healers))?;
        let mmr_of = |c: &Candidate| {
            mmrs.get(&c.guid)
                .copied()
                .unwrap_or(self.settings.default_matchmaker_rating)
        };

        let split = if self.settings.balance_teams_by_mmr {
            TeamSplit::balanced_by_mmr(&buckets, mmr_of)
        } else {
            TeamSplit::in_queue_order(&buckets)
        };

        let mut matched = false;
        if let Some(split) = split {
            for candidate in &split.alliance {
                queue.select_group(TeamSide::Alliance, candidate.group_id, SOLO_3V3_TEAM_SIZE)?;
            }
            for candidate in &split.horde {
                switch_team(queue.group_mut(candidate.group_id)?);
                queue.select_group(TeamSide::Horde, candidate.group_id, SOLO_3V3_TEAM_SIZE)?;
            }

            let selected: usize = TeamSide::PLAYABLE
                .iter()
                .filter_map(|side| queue.selection_pool(*side))
                .map(|pool| pool.player_count())
                .sum();
            matched = selected == SOLO_3V3_PLAYERS;

            if matched {
                let side_mmrs =
                    |side| -> Vec<u32> { split.side(side).iter().map(mmr_of).collect() };
                let quality = MatchQuality::from_mmrs(
                    &side_mmrs(TeamSide::Alliance),
                    &side_mmrs(TeamSide::Horde),
                );

                let event = SoloTeamsAssembled {
                    match_id: generate_match_id(),
                    bracket,
                    alliance: split.alliance.iter().map(|c| c.guid).collect(),
                    horde: split.horde.iter().map(|c| c.guid).collect(),
                    alliance_mmr: quality.alliance_mmr,
                    horde_mmr: quality.horde_mmr,
                    alliance_win_probability: quality.alliance_win_probability,
                    timestamp: current_timestamp(),
                };

                let now = current_timestamp();
                let longest_wait = split
                    .alliance
                    .iter()
                    .chain(&split.horde)
                    .filter_map(|c| queue.group(c.group_id))
                    .map(|group| group.wait_time(now).num_seconds())
                    .max()
                    .unwrap_or(0);
                debug!(
                    "Longest wait in bracket {} match: {}s",
                    bracket, longest_wait
                );

                info!(
                    "Assembled solo match {} in bracket {} - alliance {:?} ({} mmr) vs horde {:?} ({} mmr), fairness {:.2}",
                    event.match_id,
                    bracket,
                    event.alliance,
                    event.alliance_mmr,
                    event.horde,
                    event.horde_mmr,
                    quality.fairness()
                );

                self.event_publisher
                    .publish(ArenaEvent::SoloTeamsAssembled(event))
                    .await?;
            } else {
                warn!(
                    "Bracket {} selection pools hold {} players after assembly",
                    bracket, selected
                );
            }
        }

        self.metrics_collector.record_queue_check(
            matched,
            buckets.dps.len(),
            buckets.healers.len(),
            timer.stop(),
        );
        self.update_stats(|stats| {
            stats.queue_checks += 1;
            if matched {
                stats.matches_assembled += 1;
            }
        })?;

        Ok(matched)
    }

    /// Create one temporary arena team per side from the selection pools
    ///
    /// Each side takes the leader of each selected group, at most three,
    /// skipping players who went offline. Returns `[alliance, horde]` ids.
    pub fn create_temp_arena_teams(&self, queue: &BattlegroundQueue) -> Result<[ArenaTeamId; 2]> {
        let mut team_ids = [0; 2];

        for (index, side) in TeamSide::PLAYABLE.iter().enumerate() {
            let pool = queue
                .selection_pool(*side)
                .ok_or_else(|| ArenaError::InternalError {
                    message: format!("No selection pool for {:?}", side),
                })?;

            let mut players = Vec::with_capacity(SOLO_3V3_TEAM_SIZE);
            for group_id in pool.selected_groups() {
                if players.len() >= SOLO_3V3_TEAM_SIZE {
                    break;
                }

                let player = queue
                    .group(*group_id)
                    .and_then(|group| group.leader())
                    .and_then(|guid| self.host.players.find_player(guid));
                if let Some(player) = player {
                    players.push(player);
                }
            }

            let team_id = self.host.teams.generate_temp_team_id()?;
            let team = ArenaTeam::create_temp(
                team_id,
                &players,
                ArenaType::SoloThreeVThree,
                format!("Solo Team - {}", index + 1),
                self.host.teams.as_ref(),
            )?;

            info!(
                "Created temporary team {} ('{}') - {} members, rating {}",
                team.id,
                team.name,
                team.members.len(),
                team.stats.rating
            );

            self.host.teams.add_team(team)?;
            team_ids[index] = team_id;
        }

        self.metrics_collector.record_temp_teams_created(team_ids.len());
        self.update_stats(|stats| stats.temp_teams_created += team_ids.len() as u64)?;

        Ok(team_ids)
    }
}
