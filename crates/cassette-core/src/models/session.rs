use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A browsing session. Rotates after an idle gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            started_at: now,
            last_seen_at: now,
        }
    }

    /// True once `now - last_seen_at` exceeds `idle_timeout`. A gap exactly
    /// equal to the timeout still counts as active.
    pub fn is_expired(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        let gap_ms = (now - self.last_seen_at).num_milliseconds();
        gap_ms > idle_timeout.as_millis() as i64
    }
}

/// The pageview currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePageview {
    pub route: String,
    pub started_at: DateTime<Utc>,
    pub session_id: String,
}

impl ActivePageview {
    /// Whole seconds on the page, floored at zero.
    pub fn duration_seconds(&self, now: DateTime<Utc>) -> i64 {
        let ms = (now - self.started_at).num_milliseconds().max(0);
        (ms as f64 / 1000.0).round() as i64
    }
}
