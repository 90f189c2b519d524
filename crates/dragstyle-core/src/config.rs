//! Runtime configuration read from the environment.

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "DRAGSTYLE_DATA_DIR";
pub const LEADERBOARD_LIMIT_VAR: &str = "DRAGSTYLE_LEADERBOARD_LIMIT";
pub const REMOTE_URL_VAR: &str = "DRAGSTYLE_REMOTE_URL";

/// Rows shown on the leaderboard unless configured otherwise.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

const APP_DIR_NAME: &str = "dragstyle";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the persisted collections.
    pub data_dir: PathBuf,
    pub leaderboard_limit: usize,
    /// Base URL of the score service. `None` keeps scores local.
    pub remote_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            remote_url: None,
        }
    }
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names. Missing or unparsable
    /// values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            data_dir: non_empty(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            leaderboard_limit: parse_or(
                non_empty(LEADERBOARD_LIMIT_VAR),
                DEFAULT_LEADERBOARD_LIMIT,
            ),
            remote_url: non_empty(REMOTE_URL_VAR).map(|v| v.trim().to_string()),
        }
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Platform data directory for the game (e.g. `~/.local/share/dragstyle`).
#[cfg(not(target_arch = "wasm32"))]
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(target_arch = "wasm32")]
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(APP_DIR_NAME)
}
