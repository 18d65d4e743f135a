//! Battleground queue model and solo team assembly
//!
//! This module models the parts of the host queue the solo arena touches:
//! queued groups, the per-side selection pools, and the role-based split of
//! individual queuers into two teams.

pub mod assembly;
pub mod battleground_queue;
pub mod group;
pub mod selection;

// Re-export commonly used types
pub use assembly::{collect_candidates, Candidate, RoleBuckets, TeamSplit};
pub use battleground_queue::BattlegroundQueue;
pub use group::{switch_team, QueuedGroup};
pub use selection::SelectionPool;
