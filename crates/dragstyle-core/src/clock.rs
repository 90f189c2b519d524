//! Time source for persisted timestamps and identifiers.

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" for the score store.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock: every reading returns the current instant and then
/// advances it by a fixed step.
#[derive(Debug)]
pub struct ManualClock {
    next_millis: AtomicI64,
    step_millis: i64,
}

impl ManualClock {
    /// Start at `start`, advancing one millisecond per reading.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, Duration::milliseconds(1))
    }

    pub fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next_millis: AtomicI64::new(start.timestamp_millis()),
            step_millis: step.num_milliseconds(),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next_millis.fetch_add(self.step_millis, Ordering::Relaxed);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Identifier derived from a creation timestamp.
///
/// Two records created within the same millisecond share an id.
pub fn fresh_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}
