//! Role-balanced team assembly
//!
//! A solo match is two damage dealers and one healer per side. Candidates
//! are gathered from the queue in join order, then split into the two
//! sides either in that order or by matchmaking rating.

use crate::queue::battleground_queue::BattlegroundQueue;
use crate::types::{BracketId, GroupId, PlayerGuid, TalentCategory, TeamSide};
use serde::{Deserialize, Serialize};

/// Damage dealers needed for a match
pub const DPS_PER_MATCH: usize = 4;

/// Healers needed for a match
pub const HEALERS_PER_MATCH: usize = 2;

/// A single queued player with the role they fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub group_id: GroupId,
    pub guid: PlayerGuid,
    pub category: TalentCategory,
}

/// Candidates bucketed by role, each capped at what one match needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleBuckets {
    pub dps: Vec<Candidate>,
    pub healers: Vec<Candidate>,
}

impl RoleBuckets {
    /// Offer a candidate; it is kept only if its role still has room
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if candidate.category.is_dps() {
            if self.dps.len() < DPS_PER_MATCH {
                self.dps.push(candidate);
                return true;
            }
        } else if self.healers.len() < HEALERS_PER_MATCH {
            self.healers.push(candidate);
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.dps.len() == DPS_PER_MATCH && self.healers.len() == HEALERS_PER_MATCH
    }
}

/// Gather solo candidates from the alliance side of a bracket
///
/// Groups already invited, groups of more than one player, and players the
/// `resolve` callback cannot find or classify are skipped.
pub fn collect_candidates(
    queue: &BattlegroundQueue,
    bracket: BracketId,
    mut resolve: impl FnMut(PlayerGuid) -> Option<TalentCategory>,
) -> RoleBuckets {
    let mut buckets = RoleBuckets::default();

    for group in queue.queued_groups(bracket, TeamSide::Alliance) {
        if group.is_invited() || group.size() != 1 {
            continue;
        }

        let Some(guid) = group.leader() else {
            continue;
        };
        let Some(category) = resolve(guid) else {
            continue;
        };

        buckets.offer(Candidate {
            group_id: group.id,
            guid,
            category,
        });
    }

    buckets
}

/// Which candidates play on which side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub alliance: [Candidate; 3],
    pub horde: [Candidate; 3],
}

impl TeamSplit {
    /// Queue-order split: first two damage dealers and first healer on the
    /// alliance side, the rest on the horde side
    pub fn in_queue_order(buckets: &RoleBuckets) -> Option<Self> {
        if !buckets.is_complete() {
            return None;
        }
        let dps = &buckets.dps;
        let healers = &buckets.healers;

        Some(Self {
            alliance: [dps[0], dps[1], healers[0]],
            horde: [dps[2], dps[3], healers[1]],
        })
    }

    /// Split minimising the MMR gap between the sides
    ///
    /// The first healer stays on the alliance side; every pairing of damage
    /// dealers is tried and the first with the smallest gap wins, so equal
    /// gaps keep queue order.
    pub fn balanced_by_mmr(buckets: &RoleBuckets, mmr: impl Fn(&Candidate) -> u32) -> Option<Self> {
        if !buckets.is_complete() {
            return None;
        }
        let dps = &buckets.dps;
        let healers = &buckets.healers;

        const PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let mut best: Option<(i64, (usize, usize))> = None;

        for (a, b) in PAIRS {
            let alliance_sum = i64::from(mmr(&dps[a])) + i64::from(mmr(&dps[b]))
                + i64::from(mmr(&healers[0]));
            let horde_sum: i64 = (0..DPS_PER_MATCH)
                .filter(|i| *i != a && *i != b)
                .map(|i| i64::from(mmr(&dps[i])))
                .sum::<i64>()
                + i64::from(mmr(&healers[1]));
            let gap = (alliance_sum - horde_sum).abs();

            if best.map_or(true, |(best_gap, _)| gap < best_gap) {
                best = Some((gap, (a, b)));
            }
        }

        let (_, (a, b)) = best?;
        let mut rest = (0..DPS_PER_MATCH).filter(|i| *i != a && *i != b);
        let (c, d) = (rest.next()?, rest.next()?);

        Some(Self {
            alliance: [dps[a], dps[b], healers[0]],
            horde: [dps[c], dps[d], healers[1]],
        })
    }

    /// Candidates for a side
    pub fn side(&self, side: TeamSide) -> &[Candidate] {
        match side {
            TeamSide::Alliance => &self.alliance,
            TeamSide::Horde => &self.horde,
            TeamSide::Neutral => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::group::QueuedGroup;
    use std::collections::HashMap;

    fn candidate(id: u64, category: TalentCategory) -> Candidate {
        Candidate {
            group_id: id,
            guid: id * 10,
            category,
        }
    }

    fn complete_buckets() -> RoleBuckets {
        let mut buckets = RoleBuckets::default();
        for id in 1..=4 {
            buckets.offer(candidate(id, TalentCategory::Melee));
        }
        buckets.offer(candidate(5, TalentCategory::Healer));
        buckets.offer(candidate(6, TalentCategory::Healer));
        buckets
    }

    #[test]
    fn test_buckets_cap_each_role() {
        let mut buckets = RoleBuckets::default();
        for id in 1..=5 {
            buckets.offer(candidate(id, TalentCategory::Range));
        }
        for id in 6..=8 {
            buckets.offer(candidate(id, TalentCategory::Healer));
        }

        assert_eq!(buckets.dps.len(), 4);
        assert_eq!(buckets.healers.len(), 2);
        assert!(buckets.is_complete());
        assert!(!buckets.offer(candidate(9, TalentCategory::Melee)));
    }

    #[test]
    fn test_collect_skips_ineligible_groups() {
        let mut queue = BattlegroundQueue::new(crate::types::ArenaType::SoloThreeVThree);

        let mut invited = QueuedGroup::solo(1, 10, true);
        invited.invited_to_instance = Some(3);
        queue.enqueue(1, invited).unwrap();

        let mut pair = QueuedGroup::solo(2, 20, true);
        pair.players.push(21);
        queue.enqueue(1, pair).unwrap();

        queue.enqueue(1, QueuedGroup::solo(3, 30, true)).unwrap();
        queue.enqueue(1, QueuedGroup::solo(4, 40, true)).unwrap();

        let mut horde = QueuedGroup::solo(5, 50, true);
        horde.team = TeamSide::Horde;
        queue.enqueue(1, horde).unwrap();

        let categories: HashMap<u64, TalentCategory> =
            [(10, TalentCategory::Melee), (20, TalentCategory::Melee), (30, TalentCategory::Healer), (50, TalentCategory::Melee)]
                .into_iter()
                .collect();

        // 40 is offline
        let buckets = collect_candidates(&queue, 1, |guid| categories.get(&guid).copied());

        assert!(buckets.dps.is_empty());
        assert_eq!(buckets.healers.len(), 1);
        assert_eq!(buckets.healers[0].guid, 30);
    }

    #[test]
    fn test_queue_order_split() {
        let split = TeamSplit::in_queue_order(&complete_buckets()).unwrap();

        let alliance: Vec<u64> = split.alliance.iter().map(|c| c.group_id).collect();
        let horde: Vec<u64> = split.horde.iter().map(|c| c.group_id).collect();
        assert_eq!(alliance, vec![1, 2, 5]);
        assert_eq!(horde, vec![3, 4, 6]);
    }

    #[test]
    fn test_incomplete_buckets_do_not_split() {
        let mut buckets = complete_buckets();
        buckets.healers.pop();

        assert!(TeamSplit::in_queue_order(&buckets).is_none());
        assert!(TeamSplit::balanced_by_mmr(&buckets, |_| 1500).is_none());
    }

    #[test]
    fn test_balanced_split_minimises_gap() {
        let mmrs: HashMap<u64, u32> = [
            (1, 2000),
            (2, 1900),
            (3, 1100),
            (4, 1000),
            (5, 1500),
            (6, 1500),
        ]
        .into_iter()
        .collect();

        let split = TeamSplit::balanced_by_mmr(&complete_buckets(), |c| mmrs[&c.group_id]).unwrap();

        let mut alliance: Vec<u64> = split.alliance.iter().map(|c| c.group_id).collect();
        alliance.sort();
        // 2000 + 1000 vs 1900 + 1100 is the only zero-gap pairing
        assert_eq!(alliance, vec![1, 4, 5]);
        assert_eq!(split.horde[2].group_id, 6);
    }

    #[test]
    fn test_balanced_split_ties_keep_queue_order() {
        let split = TeamSplit::balanced_by_mmr(&complete_buckets(), |_| 1500).unwrap();
        assert_eq!(split, TeamSplit::in_queue_order(&complete_buckets()).unwrap());
    }
}
