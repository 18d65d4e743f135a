//! The host's battleground queue as seen by the solo queue
//!
//! Queued groups are kept per level bracket and per side, in join order.
//! The two selection pools hold the groups picked for the next match.

use crate::error::{ArenaError, Result};
use crate::queue::group::QueuedGroup;
use crate::queue::selection::SelectionPool;
use crate::types::{ArenaType, BracketId, GroupId, InstanceId, PlayerGuid, TeamSide};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct BattlegroundQueue {
    arena_type: ArenaType,
    brackets: BTreeMap<BracketId, [Vec<QueuedGroup>; 2]>,
    selection_pools: [SelectionPool; 2],
}

impl BattlegroundQueue {
    pub fn new(arena_type: ArenaType) -> Self {
        Self {
            arena_type,
            brackets: BTreeMap::new(),
            selection_pools: Default::default(),
        }
    }

    pub fn arena_type(&self) -> ArenaType {
        self.arena_type
    }

    /// Append a group to its side of a bracket
    pub fn enqueue(&mut self, bracket: BracketId, group: QueuedGroup) -> Result<()> {
        if group.arena_type != self.arena_type {
            return Err(ArenaError::InternalError {
                message: format!(
                    "Group {} queued for {} in the {} queue",
                    group.id, group.arena_type, self.arena_type
                ),
            }
            .into());
        }

        let side = group.team.index().ok_or_else(|| ArenaError::InternalError {
            message: format!("Group {} has no playable side", group.id),
        })?;

        if self.group(group.id).is_some() {
            return Err(ArenaError::InternalError {
                message: format!("Group {} is already queued", group.id),
            }
            .into());
        }

        self.brackets.entry(bracket).or_default()[side].push(group);
        Ok(())
    }

    /// Groups queued on one side of a bracket, in join order
    pub fn queued_groups(&self, bracket: BracketId, side: TeamSide) -> &[QueuedGroup] {
        match (self.brackets.get(&bracket), side.index()) {
            (Some(sides), Some(index)) => &sides[index],
            _ => &[],
        }
    }

    pub fn group(&self, group_id: GroupId) -> Option<&QueuedGroup> {
        self.brackets
            .values()
            .flat_map(|sides| sides.iter().flatten())
            .find(|group| group.id == group_id)
    }

    pub fn group_mut(&mut self, group_id: GroupId) -> Result<&mut QueuedGroup> {
        self.brackets
            .values_mut()
            .flat_map(|sides| sides.iter_mut().flatten())
            .find(|group| group.id == group_id)
            .ok_or_else(|| ArenaError::GroupNotFound { group_id }.into())
    }

    /// Remove a group from whichever bracket holds it
    pub fn remove_group(&mut self, group_id: GroupId) -> Option<QueuedGroup> {
        for sides in self.brackets.values_mut() {
            for groups in sides.iter_mut() {
                if let Some(pos) = groups.iter().position(|g| g.id == group_id) {
                    return Some(groups.remove(pos));
                }
            }
        }
        None
    }

    /// Record that a group was invited into an instance
    pub fn mark_invited(&mut self, group_id: GroupId, instance_id: InstanceId) -> Result<()> {
        self.group_mut(group_id)?.invited_to_instance = Some(instance_id);
        Ok(())
    }

    /// Group holding a player, if queued
    pub fn group_of_player(&self, guid: PlayerGuid) -> Option<&QueuedGroup> {
        self.brackets
            .values()
            .flat_map(|sides| sides.iter().flatten())
            .find(|group| group.players.contains(&guid))
    }

    pub fn selection_pool(&self, side: TeamSide) -> Option<&SelectionPool> {
        side.index().map(|index| &self.selection_pools[index])
    }

    pub fn reset_selection_pools(&mut self) {
        for pool in self.selection_pools.iter_mut() {
            pool.init();
        }
    }

    /// Add a queued group to one side's selection pool
    pub fn select_group(
        &mut self,
        side: TeamSide,
        group_id: GroupId,
        desired_count: usize,
    ) -> Result<bool> {
        let index = side.index().ok_or_else(|| ArenaError::InternalError {
            message: "Cannot select groups for the neutral side".to_string(),
        })?;
        let group = self
            .group(group_id)
            .ok_or(ArenaError::GroupNotFound { group_id })?
            .clone();

        Ok(self.selection_pools[index].add_group(&group, desired_count))
    }

    /// Total players waiting across all brackets and sides
    pub fn queued_player_count(&self) -> usize {
        self.brackets
            .values()
            .flat_map(|sides| sides.iter().flatten())
            .map(|group| group.size())
            .sum()
    }
}
