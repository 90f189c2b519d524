//! Users, score records and the score persistence capability.
//!
//! [`ScoreBackend`] is the seam between game logic and wherever scores
//! live. Game code receives a backend explicitly; it never looks one up.

mod keeper;
mod leaderboard;
mod local;
mod model;
#[cfg(feature = "remote")]
mod remote;
mod stats;

pub use keeper::ScoreKeeper;
pub use leaderboard::{LeaderboardRow, UNKNOWN_USERNAME, aggregate_leaderboard};
pub use local::{CURRENT_USER_KEY, LocalScoreStore, SCORES_KEY, USERS_KEY};
pub use model::{
    LeaderboardSource, MAX_USERNAME_CHARS, ScoreRecord, User, ValidationError, normalize_username,
    validate_username,
};
#[cfg(feature = "remote")]
pub use remote::RemoteScoreStore;
pub use stats::{UserStats, highest_score, user_stats};

use crate::element::CanvasElement;
use crate::storage::StorageResult;
use std::future::Future;
use std::pin::Pin;

/// Boxed future for backend operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Score persistence capability.
///
/// Local and network-backed stores are interchangeable behind this trait.
pub trait ScoreBackend {
    /// Find the user whose normalized name matches `username`, refreshing
    /// their last login, or create them.
    fn create_or_get_user(&self, username: &str) -> BoxFuture<'_, StorageResult<User>>;

    /// Append an immutable score record. `user_id` is not checked.
    fn save_score(
        &self,
        user_id: &str,
        score: i64,
        snapshot: Vec<CanvasElement>,
    ) -> BoxFuture<'_, StorageResult<ScoreRecord>>;

    /// Records for one user, newest first.
    fn list_user_scores(&self, user_id: &str) -> BoxFuture<'_, StorageResult<Vec<ScoreRecord>>>;

    /// Every user and every record, for leaderboard aggregation.
    fn list_all_for_leaderboard(&self) -> BoxFuture<'_, StorageResult<LeaderboardSource>>;
}
