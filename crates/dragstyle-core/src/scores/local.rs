//! Score store backed by a local key/value [`Storage`].
//!
//! Each operation reads the whole collection it touches, edits an in-memory
//! copy and writes the collection back in one `save`. This is safe for a
//! single session; concurrent sessions writing the same storage overwrite
//! each other (last writer wins).
//!
//! Collections are decoded entry by entry. An entry that fails to decode is
//! skipped on read but written back untouched, so one odd record never
//! costs the rest of the log.

use super::{BoxFuture, LeaderboardSource, ScoreBackend, ScoreRecord, User, normalize_username};
use crate::clock::{Clock, SystemClock, fresh_id};
use crate::element::CanvasElement;
use crate::storage::{Storage, StorageError, StorageResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Key of the user collection.
pub const USERS_KEY: &str = "users";
/// Key of the append-only score log.
pub const SCORES_KEY: &str = "scores";
/// Key of the logged-in user pointer.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Local score store over any [`Storage`] backend.
pub struct LocalScoreStore<S: Storage> {
    storage: S,
    clock: Box<dyn Clock>,
}

impl<S: Storage> LocalScoreStore<S> {
    /// Create a store that timestamps with the system clock.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    pub fn with_clock(storage: S, clock: impl Clock + 'static) -> Self {
        Self {
            storage,
            clock: Box::new(clock),
        }
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Look up a user by name, creating them on first login.
    ///
    /// Also records the user as the current session.
    pub fn get_or_create_user(&self, username: &str) -> StorageResult<User> {
        let normalized = normalize_username(username);
        let now = self.clock.now();
        let mut entries = self.read_entries(USERS_KEY);

        let existing = entries.iter().enumerate().find_map(|(index, entry)| {
            serde_json::from_value::<User>(entry.clone())
                .ok()
                .filter(|u| u.normalized_username == normalized)
                .map(|u| (index, u))
        });
        let user = match existing {
            Some((index, mut user)) => {
                user.last_login = now;
                log::info!("User {} logged in", user.id);
                entries[index] = to_entry(&user)?;
                user
            }
            None => {
                let user = User {
                    id: fresh_id(now),
                    username: username.trim().to_string(),
                    normalized_username: normalized,
                    created_at: now,
                    last_login: now,
                };
                log::info!("Created user {} ({})", user.id, user.username);
                entries.push(to_entry(&user)?);
                user
            }
        };

        self.write_value(USERS_KEY, &entries)?;
        self.write_value(CURRENT_USER_KEY, &user)?;
        Ok(user)
    }

    /// Append a score record.
    pub fn append_score(
        &self,
        user_id: &str,
        score: i64,
        layout_snapshot: Vec<CanvasElement>,
    ) -> StorageResult<ScoreRecord> {
        let now = self.clock.now();
        let record = ScoreRecord {
            id: fresh_id(now),
            user_id: user_id.to_string(),
            score,
            created_at: now,
            layout_snapshot,
        };
        let mut entries = self.read_entries(SCORES_KEY);
        entries.push(to_entry(&record)?);
        self.write_value(SCORES_KEY, &entries)?;
        log::info!("Saved score {} for user {}", score, user_id);
        Ok(record)
    }

    /// All records for `user_id`, newest first.
    pub fn user_scores(&self, user_id: &str) -> Vec<ScoreRecord> {
        let mut records: Vec<ScoreRecord> = self
            .read_collection::<ScoreRecord>(SCORES_KEY)
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Every stored user.
    pub fn users(&self) -> Vec<User> {
        self.read_collection(USERS_KEY)
    }

    /// Every stored score record, in insertion order.
    pub fn scores(&self) -> Vec<ScoreRecord> {
        self.read_collection(SCORES_KEY)
    }

    /// The user of the last login, if the session has not been ended.
    pub fn current_user(&self) -> Option<User> {
        self.read_value(CURRENT_USER_KEY)
    }

    /// Forget the current session. Users and scores are kept.
    pub fn clear_current_user(&self) -> StorageResult<()> {
        self.storage.delete(CURRENT_USER_KEY)
    }

    /// Decode a collection, skipping entries that do not decode.
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_entries(key)
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Skipping unreadable entry {} under '{}': {}", index, key, e);
                    None
                }
            })
            .collect()
    }

    /// Raw entries of a collection. Missing, unreadable or non-array data
    /// reads as empty.
    fn read_entries(&self, key: &str) -> Vec<Value> {
        self.read_value(key).unwrap_or_default()
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.load(key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::error!("Failed to read '{}', treating as empty: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Corrupted data under '{}', treating as empty: {}", key, e);
                None
            }
        }
    }

    fn write_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(key, &json)
    }
}

fn to_entry<T: Serialize>(value: &T) -> StorageResult<Value> {
    serde_json::to_value(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

impl<S: Storage> ScoreBackend for LocalScoreStore<S> {
    fn create_or_get_user(&self, username: &str) -> BoxFuture<'_, StorageResult<User>> {
        let username = username.to_string();
        Box::pin(async move { self.get_or_create_user(&username) })
    }

    fn save_score(
        &self,
        user_id: &str,
        score: i64,
        snapshot: Vec<CanvasElement>,
    ) -> BoxFuture<'_, StorageResult<ScoreRecord>> {
        let user_id = user_id.to_string();
        Box::pin(async move { self.append_score(&user_id, score, snapshot) })
    }

    fn list_user_scores(&self, user_id: &str) -> BoxFuture<'_, StorageResult<Vec<ScoreRecord>>> {
        let user_id = user_id.to_string();
        Box::pin(async move { Ok(self.user_scores(&user_id)) })
    }

    fn list_all_for_leaderboard(&self) -> BoxFuture<'_, StorageResult<LeaderboardSource>> {
        Box::pin(async move {
            Ok(LeaderboardSource {
                users: self.users(),
                scores: self.scores(),
            })
        })
    }
}
