//! Talent data table interface and an in-memory implementation

use crate::error::ArenaError;
use crate::types::MAX_TALENT_RANK;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the talent table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentEntry {
    pub talent_id: u32,
    /// Talent tree this talent belongs to
    pub tab_id: u32,
    /// Spell id taught by each rank, 0 for unused ranks
    pub rank_ids: [u32; MAX_TALENT_RANK],
}

/// Host talent table, addressed by row id
pub trait TalentStore: Send + Sync {
    /// Number of row slots; valid ids are `0..num_rows()`
    fn num_rows(&self) -> u32;

    /// Row for an id, `None` for gaps in the table
    fn lookup_entry(&self, talent_id: u32) -> Option<&TalentEntry>;
}

/// Sparse in-memory talent table
#[derive(Debug, Clone, Default)]
pub struct InMemoryTalentStore {
    rows: BTreeMap<u32, TalentEntry>,
}

impl InMemoryTalentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries, rejecting duplicate ids
    pub fn from_entries(
        entries: impl IntoIterator<Item = TalentEntry>,
    ) -> crate::error::Result<Self> {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry)?;
        }
        Ok(store)
    }

    /// Add a row; `u32::MAX` is rejected since `num_rows` could not cover it
    pub fn insert(&mut self, entry: TalentEntry) -> crate::error::Result<()> {
        if entry.talent_id == u32::MAX {
            return Err(ArenaError::InvalidTalentData {
                reason: format!("Talent id {} out of range", entry.talent_id),
            }
            .into());
        }

        if self.rows.contains_key(&entry.talent_id) {
            return Err(ArenaError::InvalidTalentData {
                reason: format!("Duplicate talent id {}", entry.talent_id),
            }
            .into());
        }

        self.rows.insert(entry.talent_id, entry);
        Ok(())
    }

    /// Number of rows actually present
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TalentStore for InMemoryTalentStore {
    fn num_rows(&self) -> u32 {
        self.rows
            .last_key_value()
            .map(|(id, _)| id + 1)
            .unwrap_or(0)
    }

    fn lookup_entry(&self, talent_id: u32) -> Option<&TalentEntry> {
        self.rows.get(&talent_id)
    }
}
