//! Rating penalties for leaving a solo match early

use crate::team::arena_team::ArenaTeam;
use crate::types::{ArenaTeamId, PlayerGuid};
use crate::utils::apply_rating_loss;
use serde::{Deserialize, Serialize};

/// When the player left, relative to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeavePhase {
    /// The arena had started
    InProgress,
    /// Preparation, declined invite, or logout while invited
    BeforeStart,
}

impl LeavePhase {
    pub fn from_in_progress(is_in_progress: bool) -> Self {
        if is_in_progress {
            LeavePhase::InProgress
        } else {
            LeavePhase::BeforeStart
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeavePhase::InProgress => "in_progress",
            LeavePhase::BeforeStart => "before_start",
        }
    }
}

/// Record of a penalty applied to a team and its departing member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPenalty {
    pub team_id: ArenaTeamId,
    pub player: PlayerGuid,
    pub phase: LeavePhase,
    pub rating_loss: i32,
    pub old_rating: u32,
    pub new_rating: u32,
    pub new_rank: u32,
    /// MMR after the penalty, `None` when the player is not a team member
    pub new_matchmaker_rating: Option<u32>,
}

/// Count a departure as a lost game for `team`
///
/// `stored_ratings` are the ratings of every team of the same type as held
/// before this penalty, this team's old rating included; the new rank is
/// one plus the number of them rated strictly higher than the new rating.
pub fn apply_leave_penalty(
    team: &mut ArenaTeam,
    player: PlayerGuid,
    phase: LeavePhase,
    rating_loss: i32,
    stored_ratings: impl IntoIterator<Item = u32>,
) -> RatingPenalty {
    let old_rating = team.stats.rating;
    let new_rating = apply_rating_loss(old_rating, rating_loss);

    team.stats.rating = new_rating;
    team.stats.season_games += 1;
    team.stats.week_games += 1;
    team.stats.rank = 1 + stored_ratings
        .into_iter()
        .filter(|rating| *rating > new_rating)
        .count() as u32;

    let new_matchmaker_rating = team.member_mut(player).map(|member| {
        member.week_games += 1;
        member.season_games += 1;
        member.personal_rating = new_rating;
        member.matchmaker_rating = apply_rating_loss(member.matchmaker_rating, rating_loss);
        member.matchmaker_rating
    });

    RatingPenalty {
        team_id: team.id,
        player,
        phase,
        rating_loss,
        old_rating,
        new_rating,
        new_rank: team.stats.rank,
        new_matchmaker_rating,
    }
}
