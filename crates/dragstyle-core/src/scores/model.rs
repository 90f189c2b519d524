//! Persisted users and score records, and login validation.

use crate::element::CanvasElement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted username, in characters, after trimming.
pub const MAX_USERNAME_CHARS: usize = 20;

/// A player identity. One record per normalized username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Name as first typed (trimmed).
    pub username: String,
    /// Lowercased, trimmed name used for identity.
    pub normalized_username: String,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// One saved game result. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: String,
    /// Owning user. May not resolve to any stored user.
    pub user_id: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
    /// Copy of the canvas at save time.
    #[serde(default)]
    pub layout_snapshot: Vec<CanvasElement>,
}

/// Everything a leaderboard is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardSource {
    pub users: Vec<User>,
    pub scores: Vec<ScoreRecord>,
}

/// Login form rejections. `Display` is the message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a username.")]
    EmptyUsername,
    #[error("Username must be {max} characters or less.", max = MAX_USERNAME_CHARS)]
    UsernameTooLong,
}

/// Identity key for a username: trimmed and lowercased.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Check a raw login entry, returning the trimmed name.
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if trimmed.chars().count() > MAX_USERNAME_CHARS {
        return Err(ValidationError::UsernameTooLong);
    }
    Ok(trimmed.to_string())
}
