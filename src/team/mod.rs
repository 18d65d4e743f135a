//! Arena teams, their repository, and leave penalties
//!
//! This module holds the team model shared by persistent and temporary
//! teams, the repository seam onto the host's team manager, and the rating
//! bookkeeping applied when a player abandons a solo match.

pub mod arena_team;
pub mod penalty;
pub mod repository;

// Re-export commonly used types
pub use arena_team::{average_mmr, ArenaTeam, ArenaTeamMember, ArenaTeamStats};
pub use penalty::{apply_leave_penalty, LeavePhase, RatingPenalty};
pub use repository::{ArenaTeamRepository, InMemoryArenaTeamRepository};
