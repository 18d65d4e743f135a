//! Error types for the solo arena module
//!
//! Operations return `anyhow::Result` and raise the domain variants below
//! for failures callers may want to match on.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific solo queue scenarios
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("Arena team not found: {team_id}")]
    TeamNotFound { team_id: u32 },

    #[error("Arena team already exists: {team_id}")]
    TeamAlreadyExists { team_id: u32 },

    #[error("Queued group not found: {group_id}")]
    GroupNotFound { group_id: u64 },

    #[error("Invalid talent data: {reason}")]
    InvalidTalentData { reason: String },

    #[error("Invalid scenario: {reason}")]
    InvalidScenario { reason: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
