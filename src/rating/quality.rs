//! Match quality estimate for an assembled solo match
//!
//! Each side is reduced to the mean MMR of its players and compared with the
//! Elo expectation from the `skillratings` crate.

use crate::utils::integer_mean;
use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score, EloRating};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchQuality {
    pub alliance_mmr: u32,
    pub horde_mmr: u32,
    /// Expected chance the alliance side wins, 0.0 to 1.0
    pub alliance_win_probability: f64,
}

impl MatchQuality {
    /// Compare the two sides' player MMRs
    pub fn from_mmrs(alliance: &[u32], horde: &[u32]) -> Self {
        let alliance_mmr = integer_mean(alliance);
        let horde_mmr = integer_mean(horde);

        let (alliance_win_probability, _) = expected_score(
            &EloRating {
                rating: f64::from(alliance_mmr),
            },
            &EloRating {
                rating: f64::from(horde_mmr),
            },
        );

        Self {
            alliance_mmr,
            horde_mmr,
            alliance_win_probability,
        }
    }

    /// 1.0 for a coin flip, approaching 0.0 for a foregone conclusion
    pub fn fairness(&self) -> f64 {
        1.0 - (self.alliance_win_probability - 0.5).abs() * 2.0
    }
}
