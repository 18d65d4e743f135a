//! Groups waiting in the battleground queue

use crate::types::{ArenaType, GroupId, GroupQueueType, InstanceId, PlayerGuid, TeamSide};
use crate::utils::current_timestamp;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A queued group; solo queuers are groups of one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedGroup {
    pub id: GroupId,
    /// Members in join order; the first is the leader
    pub players: Vec<PlayerGuid>,
    pub team: TeamSide,
    pub queue_type: GroupQueueType,
    pub arena_type: ArenaType,
    pub is_rated: bool,
    pub joined_at: DateTime<Utc>,
    /// Instance the group has been invited to, if any
    pub invited_to_instance: Option<InstanceId>,
}

impl QueuedGroup {
    /// A single player queued for a rated or skirmish solo match
    pub fn solo(id: GroupId, player: PlayerGuid, is_rated: bool) -> Self {
        Self {
            id,
            players: vec![player],
            team: TeamSide::Alliance,
            queue_type: if is_rated {
                GroupQueueType::PremadeAlliance
            } else {
                GroupQueueType::NormalAlliance
            },
            arena_type: ArenaType::SoloThreeVThree,
            is_rated,
            joined_at: current_timestamp(),
            invited_to_instance: None,
        }
    }

    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn leader(&self) -> Option<PlayerGuid> {
        self.players.first().copied()
    }

    pub fn is_invited(&self) -> bool {
        self.invited_to_instance.is_some()
    }

    /// Time spent in the queue as of `now`, never negative
    pub fn wait_time(&self, now: DateTime<Utc>) -> Duration {
        (now - self.joined_at).max(Duration::zero())
    }
}

/// Move a group to the horde side of the match
///
/// Rated groups take the premade horde queue, skirmish groups the normal one.
pub fn switch_team(group: &mut QueuedGroup) -> &mut QueuedGroup {
    group.team = TeamSide::Horde;
    group.queue_type = if group.is_rated {
        GroupQueueType::PremadeHorde
    } else {
        GroupQueueType::NormalHorde
    };
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solo_group() {
        let group = QueuedGroup::solo(1, 100, true);
        assert_eq!(group.size(), 1);
        assert_eq!(group.leader(), Some(100));
        assert_eq!(group.team, TeamSide::Alliance);
        assert_eq!(group.queue_type, GroupQueueType::PremadeAlliance);
        assert!(!group.is_invited());
    }

    #[test]
    fn test_wait_time() {
        let mut group = QueuedGroup::solo(1, 100, true);
        let now = current_timestamp();
        group.joined_at = now - Duration::seconds(90);
        assert_eq!(group.wait_time(now).num_seconds(), 90);

        // Clock skew never yields a negative wait
        group.joined_at = now + Duration::seconds(5);
        assert_eq!(group.wait_time(now), Duration::zero());
    }

    #[test]
    fn test_switch_team_rated() {
        let mut group = QueuedGroup::solo(1, 100, true);
        switch_team(&mut group);
        assert_eq!(group.team, TeamSide::Horde);
        assert_eq!(group.queue_type, GroupQueueType::PremadeHorde);
    }

    #[test]
    fn test_switch_team_skirmish() {
        let mut group = QueuedGroup::solo(1, 100, false);
        assert_eq!(group.queue_type, GroupQueueType::NormalAlliance);
        switch_team(&mut group);
        assert_eq!(group.team, TeamSide::Horde);
        assert_eq!(group.queue_type, GroupQueueType::NormalHorde);
    }
}
