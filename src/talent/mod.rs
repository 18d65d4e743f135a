//! Talent data access and role classification
//!
//! The host supplies the talent table; this module turns a player's learned
//! talents into a [`crate::types::TalentCategory`] and counts points spent in
//! forbidden trees.

pub mod classifier;
pub mod store;

pub use classifier::{CategoryPoints, TalentClassifier};
pub use store::{InMemoryTalentStore, TalentEntry, TalentStore};
