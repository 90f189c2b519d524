//! Leaderboard aggregation over all users and score records.

use super::{LeaderboardSource, ScoreRecord, stats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shown for records whose user no longer resolves.
pub const UNKNOWN_USERNAME: &str = "Unknown";

/// One user's summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub user_id: String,
    pub username: String,
    pub best_score: i64,
    pub last_score: i64,
    pub last_played: DateTime<Utc>,
}

/// Group records by user, rank by best score (descending), keep `limit` rows.
///
/// Groups appear in order of each user's first record; the sort is stable,
/// so equal best scores keep that order.
pub fn aggregate_leaderboard(source: &LeaderboardSource, limit: usize) -> Vec<LeaderboardRow> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ScoreRecord>> = HashMap::new();
    for record in &source.scores {
        groups
            .entry(record.user_id.as_str())
            .or_insert_with(|| {
                order.push(record.user_id.as_str());
                Vec::new()
            })
            .push(record);
    }

    let usernames: HashMap<&str, &str> = source
        .users
        .iter()
        .map(|u| (u.id.as_str(), u.username.as_str()))
        .collect();

    let mut rows: Vec<LeaderboardRow> = order
        .into_iter()
        .filter_map(|user_id| {
            let group = groups.get(user_id)?;
            let best_score = group.iter().map(|r| r.score).max()?;
            let newest = stats::newest(group.iter().copied())?;
            Some(LeaderboardRow {
                user_id: user_id.to_string(),
                username: usernames
                    .get(user_id)
                    .copied()
                    .unwrap_or(UNKNOWN_USERNAME)
                    .to_string(),
                best_score,
                last_score: newest.score,
                last_played: newest.created_at,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.best_score.cmp(&a.best_score));
    rows.truncate(limit);
    rows
}
