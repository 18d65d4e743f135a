//! Events emitted by the solo arena

use crate::team::RatingPenalty;
use crate::types::{ArenaTeamId, BracketId, InstanceId, PlayerGuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A departure was counted as a loss; team stats changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingPenaltyApplied {
    pub penalty: RatingPenalty,
    pub timestamp: DateTime<Utc>,
}

/// Six queuers were split into two teams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoloTeamsAssembled {
    pub match_id: Uuid,
    pub bracket: BracketId,
    pub alliance: Vec<PlayerGuid>,
    pub horde: Vec<PlayerGuid>,
    pub alliance_mmr: u32,
    pub horde_mmr: u32,
    /// Expected chance the alliance side wins
    pub alliance_win_probability: f64,
    pub timestamp: DateTime<Utc>,
}

/// An arena was ended unrated because players were missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaAborted {
    pub instance_id: InstanceId,
    pub players_present: usize,
    pub timestamp: DateTime<Utc>,
}

/// Temporary teams of a finished arena were removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempTeamsReleased {
    pub instance_id: InstanceId,
    pub team_ids: Vec<ArenaTeamId>,
    pub timestamp: DateTime<Utc>,
}

/// Text shown to a single player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMessage {
    pub player: PlayerGuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Union type for all solo arena events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArenaEvent {
    RatingPenaltyApplied(RatingPenaltyApplied),
    SoloTeamsAssembled(SoloTeamsAssembled),
    ArenaAborted(ArenaAborted),
    TempTeamsReleased(TempTeamsReleased),
    SystemMessage(SystemMessage),
}

impl ArenaEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ArenaEvent::RatingPenaltyApplied(_) => "RatingPenaltyApplied",
            ArenaEvent::SoloTeamsAssembled(_) => "SoloTeamsAssembled",
            ArenaEvent::ArenaAborted(_) => "ArenaAborted",
            ArenaEvent::TempTeamsReleased(_) => "TempTeamsReleased",
            ArenaEvent::SystemMessage(_) => "SystemMessage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::current_timestamp;

    #[test]
    fn test_event_tagged_serialization() {
        let event = ArenaEvent::ArenaAborted(ArenaAborted {
            instance_id: 9,
            players_present: 5,
            timestamp: current_timestamp(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ArenaAborted");
        assert_eq!(json["players_present"], 5);
        assert_eq!(event.event_type(), "ArenaAborted");
    }
}
