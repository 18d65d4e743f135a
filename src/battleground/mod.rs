//! Battleground instance interface
//!
//! The host runs the instance; the solo arena only reads its roster and
//! arena teams, flips it unrated, or ends it.

pub mod instance;

pub use instance::{ArenaInstance, Battleground, BattlegroundStatus};
