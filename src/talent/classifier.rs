//! Role classification and forbidden-talent checks
//!
//! Points are counted per talent row: every rank spell the player holds in
//! the active specialisation contributes `rank + 1` to each category whose
//! tree list contains the row's tree.

use crate::config::TalentTabSettings;
use crate::player::ArenaPlayer;
use crate::talent::store::TalentStore;
use crate::types::{TalentCategory, MAX_TALENT_RANK};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Talent points spent per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPoints {
    pub melee: u32,
    pub range: u32,
    pub healer: u32,
}

impl CategoryPoints {
    pub fn get(&self, category: TalentCategory) -> u32 {
        match category {
            TalentCategory::Melee => self.melee,
            TalentCategory::Range => self.range,
            TalentCategory::Healer => self.healer,
        }
    }

    fn add(&mut self, category: TalentCategory, points: u32) {
        match category {
            TalentCategory::Melee => self.melee += points,
            TalentCategory::Range => self.range += points,
            TalentCategory::Healer => self.healer += points,
        }
    }

    /// Category with the most points; earlier categories win ties and melee
    /// is chosen when nothing is spent
    pub fn dominant(&self) -> TalentCategory {
        let mut best = TalentCategory::Melee;
        let mut best_points = 0;

        for category in TalentCategory::ALL {
            let points = self.get(category);
            if points > best_points {
                best = category;
                best_points = points;
            }
        }

        best
    }
}

/// Talent tree lookup tables built from configuration
#[derive(Debug, Clone)]
pub struct TalentClassifier {
    melee: HashSet<u32>,
    range: HashSet<u32>,
    healer: HashSet<u32>,
    forbidden: HashSet<u32>,
}

impl TalentClassifier {
    pub fn new(settings: &TalentTabSettings) -> Self {
        Self {
            melee: settings.melee.iter().copied().collect(),
            range: settings.range.iter().copied().collect(),
            healer: settings.healer.iter().copied().collect(),
            forbidden: settings.forbidden.iter().copied().collect(),
        }
    }

    fn tabs(&self, category: TalentCategory) -> &HashSet<u32> {
        match category {
            TalentCategory::Melee => &self.melee,
            TalentCategory::Range => &self.range,
            TalentCategory::Healer => &self.healer,
        }
    }

    /// Call `visit(tab_id, points)` for every talent rank the player holds
    fn for_each_held_rank(
        player: &ArenaPlayer,
        store: &dyn TalentStore,
        mut visit: impl FnMut(u32, u32),
    ) {
        for talent_id in 0..store.num_rows() {
            let Some(entry) = store.lookup_entry(talent_id) else {
                continue;
            };

            for rank in (0..MAX_TALENT_RANK).rev() {
                let spell_id = entry.rank_ids[rank];
                if spell_id == 0 {
                    continue;
                }

                if player.has_talent(spell_id, player.active_spec) {
                    visit(entry.tab_id, rank as u32 + 1);
                }
            }
        }
    }

    /// Points the player has spent per role
    pub fn category_points(&self, player: &ArenaPlayer, store: &dyn TalentStore) -> CategoryPoints {
        let mut points = CategoryPoints::default();

        Self::for_each_held_rank(player, store, |tab_id, rank_points| {
            for category in TalentCategory::ALL {
                if self.tabs(category).contains(&tab_id) {
                    points.add(category, rank_points);
                }
            }
        });

        points
    }

    /// Role the player fills in a solo match
    pub fn classify(&self, player: &ArenaPlayer, store: &dyn TalentStore) -> TalentCategory {
        let points = self.category_points(player, store);
        let category = points.dominant();

        debug!(
            "Classified player {} as {} (melee: {}, range: {}, healer: {})",
            player.guid, category, points.melee, points.range, points.healer
        );

        category
    }

    /// Points the player has spent in forbidden trees
    pub fn forbidden_points(&self, player: &ArenaPlayer, store: &dyn TalentStore) -> u32 {
        let mut total = 0;

        Self::for_each_held_rank(player, store, |tab_id, rank_points| {
            if self.forbidden.contains(&tab_id) {
                total += rank_points;
            }
        });

        total
    }
}

impl Default for TalentClassifier {
    fn default() -> Self {
        Self::new(&TalentTabSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::talent::store::{InMemoryTalentStore, TalentEntry};

    const ARMS: u32 = 161;
    const FIRE: u32 = 41;
    const HOLY_PRIEST: u32 = 202;

    /// Five-rank talents; spell id = talent_id * 100 + rank
    fn five_rank(talent_id: u32, tab_id: u32) -> TalentEntry {
        let mut rank_ids = [0; MAX_TALENT_RANK];
        for (rank, id) in rank_ids.iter_mut().enumerate() {
            *id = talent_id * 100 + rank as u32;
        }
        TalentEntry {
            talent_id,
            tab_id,
            rank_ids,
        }
    }

    fn test_store() -> InMemoryTalentStore {
        InMemoryTalentStore::from_entries([
            five_rank(1, ARMS),
            five_rank(2, ARMS),
            five_rank(3, FIRE),
            five_rank(4, HOLY_PRIEST),
            five_rank(5, HOLY_PRIEST),
            TalentEntry {
                talent_id: 6,
                tab_id: 999,
                rank_ids: [600, 0, 0, 0, 0],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_no_talents_defaults_to_melee() {
        let classifier = TalentClassifier::default();
        let player = ArenaPlayer::new(1, "Blank");

        let points = classifier.category_points(&player, &test_store());
        assert_eq!(points, CategoryPoints::default());
        assert_eq!(
            classifier.classify(&player, &test_store()),
            TalentCategory::Melee
        );
    }

    #[test]
    fn test_rank_weighting() {
        let classifier = TalentClassifier::default();
        // Rank 5 of talent 3 (fire) is worth 5 points
        let player = ArenaPlayer::new(1, "Mage").with_talents(0, [304]);

        let points = classifier.category_points(&player, &test_store());
        assert_eq!(points.range, 5);
        assert_eq!(points.melee, 0);
        assert_eq!(
            classifier.classify(&player, &test_store()),
            TalentCategory::Range
        );
    }

    #[test]
    fn test_healer_wins_majority() {
        let classifier = TalentClassifier::default();
        let player = ArenaPlayer::new(1, "Priest").with_talents(0, [404, 504, 102]);

        let points = classifier.category_points(&player, &test_store());
        assert_eq!(points.healer, 10);
        assert_eq!(points.melee, 3);
        assert_eq!(
            classifier.classify(&player, &test_store()),
            TalentCategory::Healer
        );
    }

    #[test]
    fn test_tie_prefers_earlier_category() {
        let classifier = TalentClassifier::default();
        // 5 melee points, 5 healer points
        let player = ArenaPlayer::new(1, "Hybrid").with_talents(0, [104, 404]);

        assert_eq!(
            classifier.classify(&player, &test_store()),
            TalentCategory::Melee
        );
    }

    #[test]
    fn test_only_active_spec_counts() {
        let classifier = TalentClassifier::default();
        let mut player = ArenaPlayer::new(1, "Dual")
            .with_talents(0, [104])
            .with_talents(1, [404, 504]);

        assert_eq!(
            classifier.classify(&player, &test_store()),
            TalentCategory::Melee
        );

        player.active_spec = 1;
        assert_eq!(
            classifier.classify(&player, &test_store()),
            TalentCategory::Healer
        );
    }

    #[test]
    fn test_unknown_tab_ignored() {
        let classifier = TalentClassifier::default();
        let player = ArenaPlayer::new(1, "Odd").with_talents(0, [600]);

        assert_eq!(
            classifier.category_points(&player, &test_store()),
            CategoryPoints::default()
        );
    }

    #[test]
    fn test_forbidden_points() {
        let classifier = TalentClassifier::default();
        let player = ArenaPlayer::new(1, "Priest").with_talents(0, [404, 502, 104]);

        assert_eq!(classifier.forbidden_points(&player, &test_store()), 8);
    }
}
