//! Utility functions for the solo arena module

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Subtract a rating loss, flooring the result at zero
///
/// A negative loss raises the rating.
pub fn apply_rating_loss(rating: u32, loss: i32) -> u32 {
    let adjusted = i64::from(rating) - i64::from(loss);
    adjusted.clamp(0, i64::from(u32::MAX)) as u32
}

/// Integer mean, zero for an empty input
pub fn integer_mean(values: &[u32]) -> u32 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
    (sum / values.len() as u64) as u32
}
