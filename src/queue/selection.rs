//! Per-side selection pools

use crate::queue::group::QueuedGroup;
use crate::types::GroupId;
use serde::{Deserialize, Serialize};

/// Groups picked for one side of an upcoming match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPool {
    selected: Vec<GroupId>,
    player_count: usize,
}

impl SelectionPool {
    /// Clear the pool before a new selection round
    pub fn init(&mut self) {
        self.selected.clear();
        self.player_count = 0;
    }

    /// Try to add a group toward `desired_count` players
    ///
    /// The group is taken when it is not already invited and fits. Returns
    /// whether the pool still wants players afterwards or took this group.
    pub fn add_group(&mut self, group: &QueuedGroup, desired_count: usize) -> bool {
        let size = group.size();
        if !group.is_invited() && desired_count >= self.player_count + size {
            self.selected.push(group.id);
            self.player_count += size;
            return true;
        }

        self.player_count < desired_count
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn selected_groups(&self) -> &[GroupId] {
        &self.selected
    }
}
