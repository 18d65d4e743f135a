//! Talent tree tables used for role classification
//!
//! Values are TalentTab ids from the client talent data.

use serde::{Deserialize, Serialize};

/// Talent trees per role plus the trees refused in solo arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentTabSettings {
    pub melee: Vec<u32>,
    pub range: Vec<u32>,
    pub healer: Vec<u32>,
    pub forbidden: Vec<u32>,
}

impl Default for TalentTabSettings {
    fn default() -> Self {
        Self {
            melee: vec![
                383, // Paladin protection
                163, // Warrior protection
                161, // Warrior arms
                182, // Rogue assassination
                398, // Death knight blood
                164, // Warrior fury
                181, // Rogue combat
                183, // Rogue subtlety
                381, // Paladin retribution
                399, // Death knight frost
                400, // Death knight unholy
                263, // Shaman enhancement
                281, // Druid feral
            ],
            range: vec![
                81,  // Mage arcane
                41,  // Mage fire
                61,  // Mage frost
                361, // Hunter beast mastery
                363, // Hunter marksmanship
                362, // Hunter survival
                302, // Warlock affliction
                303, // Warlock demonology
                301, // Warlock destruction
                261, // Shaman elemental
                283, // Druid balance
                203, // Priest shadow
            ],
            healer: vec![
                201, // Priest discipline
                202, // Priest holy
                382, // Paladin holy
                262, // Shaman restoration
                282, // Druid restoration
            ],
            forbidden: vec![201, 202, 382, 262, 282],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_role_tables_are_disjoint() {
        let settings = TalentTabSettings::default();
        let melee: HashSet<_> = settings.melee.iter().collect();
        let range: HashSet<_> = settings.range.iter().collect();
        let healer: HashSet<_> = settings.healer.iter().collect();

        assert!(melee.is_disjoint(&range));
        assert!(melee.is_disjoint(&healer));
        assert!(range.is_disjoint(&healer));
        assert_eq!(melee.len() + range.len() + healer.len(), 30);
    }
}
