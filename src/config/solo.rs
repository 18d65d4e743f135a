//! Solo 3v3 queue settings

use serde::{Deserialize, Serialize};

/// Tunables for team assembly, match start and leave penalties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoloQueueSettings {
    /// Rating lost when leaving a match that is in progress
    pub rating_penalty_leave_during_match: i32,
    /// Rating lost when leaving during preparation, declining the invite or
    /// logging out while invited
    pub rating_penalty_leave_before_match_start: i32,
    /// End the arena unrated when someone never entered it
    pub stop_game_incomplete: bool,
    /// Refuse players with too many points in forbidden talent trees
    pub block_forbidden_talents: bool,
    /// Forbidden talent points at which a player is refused
    pub forbidden_talent_threshold: u32,
    /// Split assembled players by MMR instead of queue order
    pub balance_teams_by_mmr: bool,
    /// MMR assumed for players without a solo team membership
    pub default_matchmaker_rating: u32,
}

impl Default for SoloQueueSettings {
    fn default() -> Self {
        Self {
            rating_penalty_leave_during_match: 24,
            rating_penalty_leave_before_match_start: 50,
            stop_game_incomplete: true,
            block_forbidden_talents: false,
            forbidden_talent_threshold: 36,
            balance_teams_by_mmr: false,
            default_matchmaker_rating: 1500,
        }
    }
}

impl SoloQueueSettings {
    /// Rating loss for a departure in the given phase
    pub fn rating_penalty(&self, is_in_progress: bool) -> i32 {
        if is_in_progress {
            self.rating_penalty_leave_during_match
        } else {
            self.rating_penalty_leave_before_match_start
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_penalties() {
        let settings = SoloQueueSettings::default();
        assert_eq!(settings.rating_penalty(true), 24);
        assert_eq!(settings.rating_penalty(false), 50);
        assert!(settings.stop_game_incomplete);
        assert!(!settings.block_forbidden_talents);
    }
}
