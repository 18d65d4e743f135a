//! Solo Arena - individual queueing for 3v3 arena matches
//!
//! This crate assembles role-balanced teams of three from players who queue
//! alone, manages the temporary arena teams those matches play under, and
//! applies rating penalties to players who leave early.

pub mod battleground;
pub mod config;
pub mod error;
pub mod events;
pub mod metrics;
pub mod player;
pub mod queue;
pub mod rating;
pub mod simulation;
pub mod solo;
pub mod talent;
pub mod team;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{ArenaError, Result};
pub use types::*;

// Re-export key components
pub use events::EventPublisher;
pub use solo::{HostServices, SoloQueueManager, StartCheck};
pub use team::{ArenaTeamRepository, InMemoryArenaTeamRepository};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
