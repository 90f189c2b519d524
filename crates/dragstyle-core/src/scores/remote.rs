//! Score store backed by the HTTP score service.
//!
//! The service exposes three endpoints relative to a base URL:
//! `login.php` (POST `{username}`), `save-score.php` (POST `{user_id, score}`)
//! and `get-scores.php?user_id=` (GET, newest ten). Every response carries a
//! `success` flag and, on failure, a `message`.

use super::{BoxFuture, LeaderboardSource, ScoreBackend, ScoreRecord, User, normalize_username};
use crate::clock::{Clock, SystemClock, fresh_id};
use crate::element::CanvasElement;
use crate::storage::{StorageError, StorageResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// MySQL `DATETIME` text format used by the service.
const SERVICE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<WireUser>,
    #[serde(default)]
    scores: Option<Vec<WireScore>>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: Value,
    username: String,
}

#[derive(Debug, Deserialize)]
struct WireScore {
    score: Value,
    created_at: String,
}

/// Network score store.
pub struct RemoteScoreStore {
    client: reqwest::Client,
    base_url: String,
    clock: Box<dyn Clock>,
}

impl RemoteScoreStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_clock(base_url, SystemClock)
    }

    pub fn with_clock(base_url: impl Into<String>, clock: impl Clock + 'static) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            clock: Box::new(clock),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> StorageResult<Envelope> {
        let response = request
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;
        parse_envelope(&body)
    }

    async fn login(&self, username: String) -> StorageResult<User> {
        let body = serde_json::json!({ "username": username.trim() });
        let envelope = self
            .send(self.client.post(self.endpoint("login.php")).json(&body))
            .await?;
        let user = envelope
            .user
            .ok_or_else(|| StorageError::Serialization("login response has no user".into()))?;
        let now = self.clock.now();
        log::info!("Remote login for {}", user.username);
        Ok(User {
            id: id_text(&user.id)?,
            normalized_username: normalize_username(&user.username),
            username: user.username,
            created_at: now,
            last_login: now,
        })
    }

    async fn submit(
        &self,
        user_id: String,
        score: i64,
        snapshot: Vec<CanvasElement>,
    ) -> StorageResult<ScoreRecord> {
        let body = serde_json::json!({ "user_id": user_id, "score": score });
        self.send(self.client.post(self.endpoint("save-score.php")).json(&body))
            .await?;
        let now = self.clock.now();
        log::info!("Saved score {} for user {} remotely", score, user_id);
        Ok(ScoreRecord {
            id: fresh_id(now),
            user_id,
            score,
            created_at: now,
            layout_snapshot: snapshot,
        })
    }

    async fn fetch_scores(&self, user_id: String) -> StorageResult<Vec<ScoreRecord>> {
        let envelope = self
            .send(
                self.client
                    .get(self.endpoint("get-scores.php"))
                    .query(&[("user_id", user_id.as_str())]),
            )
            .await?;
        envelope
            .scores
            .unwrap_or_default()
            .into_iter()
            .map(|wire| score_record(&user_id, wire))
            .collect()
    }
}

impl ScoreBackend for RemoteScoreStore {
    fn create_or_get_user(&self, username: &str) -> BoxFuture<'_, StorageResult<User>> {
        Box::pin(self.login(username.to_string()))
    }

    fn save_score(
        &self,
        user_id: &str,
        score: i64,
        snapshot: Vec<CanvasElement>,
    ) -> BoxFuture<'_, StorageResult<ScoreRecord>> {
        Box::pin(self.submit(user_id.to_string(), score, snapshot))
    }

    fn list_user_scores(&self, user_id: &str) -> BoxFuture<'_, StorageResult<Vec<ScoreRecord>>> {
        Box::pin(self.fetch_scores(user_id.to_string()))
    }

    fn list_all_for_leaderboard(&self) -> BoxFuture<'_, StorageResult<LeaderboardSource>> {
        Box::pin(async {
            Err(StorageError::Unsupported(
                "the score service has no leaderboard endpoint".into(),
            ))
        })
    }
}

/// Decode a response body, turning `success: false` into an error.
fn parse_envelope(body: &str) -> StorageResult<Envelope> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| StorageError::Serialization(e.to_string()))?;
    if !envelope.success {
        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| "request failed".to_string());
        return Err(StorageError::Remote(message));
    }
    Ok(envelope)
}

/// Ids arrive as numbers or numeric strings depending on the query path.
fn id_text(value: &Value) -> StorageResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(StorageError::Serialization(format!("unexpected id: {other}"))),
    }
}

fn score_value(value: &Value) -> StorageResult<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| StorageError::Serialization(format!("unexpected score: {value}")))
}

fn parse_service_time(text: &str) -> StorageResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, SERVICE_DATETIME)
        .map(|naive| naive.and_utc())
        .map_err(|e| StorageError::Serialization(format!("bad timestamp '{text}': {e}")))
}

fn score_record(user_id: &str, wire: WireScore) -> StorageResult<ScoreRecord> {
    let created_at = parse_service_time(&wire.created_at)?;
    Ok(ScoreRecord {
        id: fresh_id(created_at),
        user_id: user_id.to_string(),
        score: score_value(&wire.score)?,
        created_at,
        layout_snapshot: Vec::new(),
    })
}
