//! Per-user statistics derived from score records.

use super::ScoreRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one user's games. Empty history yields `None`s and zero games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub highest_score: Option<i64>,
    pub last_score: Option<i64>,
    pub average_score: Option<i64>,
    pub total_games: usize,
    pub last_played: Option<DateTime<Utc>>,
}

/// Best score among `records`, or `None` if there are none.
pub fn highest_score(records: &[ScoreRecord]) -> Option<i64> {
    records.iter().map(|r| r.score).max()
}

/// Compute stats over one user's records (in any order).
pub fn user_stats(records: &[ScoreRecord]) -> UserStats {
    let Some(latest) = newest(records.iter()) else {
        return UserStats::default();
    };
    UserStats {
        highest_score: highest_score(records),
        last_score: Some(latest.score),
        average_score: Some(rounded_mean(records)),
        total_games: records.len(),
        last_played: Some(latest.created_at),
    }
}

/// Mean score rounded half-up (87.5 becomes 88). Summed wide so any mix of
/// `i64` scores averages without overflow.
fn rounded_mean(records: &[ScoreRecord]) -> i64 {
    let sum: i128 = records.iter().map(|r| i128::from(r.score)).sum();
    let count = records.len() as i128;
    let rounded = (2 * sum + count).div_euclid(2 * count);
    // the mean of i64 values rounds back into i64 range
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Most recent record; the earliest in slice order wins a timestamp tie.
pub(crate) fn newest<'a>(
    records: impl IntoIterator<Item = &'a ScoreRecord>,
) -> Option<&'a ScoreRecord> {
    records.into_iter().reduce(|best, r| if r.created_at > best.created_at { r } else { best })
}
