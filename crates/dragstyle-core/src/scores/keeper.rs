//! Read-side queries over a [`ScoreBackend`].
//!
//! Query failures never reach the caller: they are logged and reported as an
//! empty result, so a broken store shows an empty history rather than an error.

use super::{
    LeaderboardRow, ScoreBackend, ScoreRecord, User, UserStats, aggregate_leaderboard,
    highest_score, user_stats,
};
use crate::element::CanvasElement;
use crate::storage::StorageResult;

/// Score history, statistics and leaderboard built on any backend.
pub struct ScoreKeeper<B: ScoreBackend> {
    backend: B,
}

impl<B: ScoreBackend> ScoreKeeper<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn create_or_get_user(&self, username: &str) -> StorageResult<User> {
        self.backend.create_or_get_user(username).await
    }

    pub async fn save_score(
        &self,
        user_id: &str,
        score: i64,
        snapshot: Vec<CanvasElement>,
    ) -> StorageResult<ScoreRecord> {
        self.backend.save_score(user_id, score, snapshot).await
    }

    /// Records for `user_id`, newest first. Empty on failure.
    pub async fn user_scores(&self, user_id: &str) -> Vec<ScoreRecord> {
        match self.backend.list_user_scores(user_id).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to load scores for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }

    /// Best score of `user_id`, or `None` if they have no records.
    pub async fn highest_score(&self, user_id: &str) -> Option<i64> {
        highest_score(&self.user_scores(user_id).await)
    }

    pub async fn user_stats(&self, user_id: &str) -> UserStats {
        user_stats(&self.user_scores(user_id).await)
    }

    /// Top `limit` players by best score. Empty on failure.
    pub async fn leaderboard(&self, limit: usize) -> Vec<LeaderboardRow> {
        match self.backend.list_all_for_leaderboard().await {
            Ok(source) => aggregate_leaderboard(&source, limit),
            Err(e) => {
                log::error!("Failed to load leaderboard: {}", e);
                Vec::new()
            }
        }
    }
}
