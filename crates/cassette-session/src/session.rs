//! Idle-rotated sessions over volatile storage.

use std::time::Duration;

use cassette_core::constants::{SESSION_ID_KEY, SESSION_ID_PREFIX, SESSION_LAST_SEEN_KEY};
use cassette_core::models::Session;
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::storage::{Lookup, SafeStorage};

/// Tracks the current session. Storage is the source of truth for the id
/// and last-seen time; the start time is only known for sessions this
/// tracker has seen.
#[derive(Debug)]
pub struct SessionTracker {
    volatile: SafeStorage,
    idle_timeout: Duration,
    cached: Option<Session>,
}

impl SessionTracker {
    pub fn new(volatile: SafeStorage, idle_timeout: Duration) -> Self {
        Self {
            volatile,
            idle_timeout,
            cached: None,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Resolve the session for `now`, refreshing or rotating it.
    pub fn current(&mut self, now: DateTime<Utc>) -> Session {
        let stored_id = self.volatile.lookup(SESSION_ID_KEY);
        let stored_seen = self.volatile.lookup(SESSION_LAST_SEEN_KEY);
        if stored_id.is_unavailable() || stored_seen.is_unavailable() {
            return ephemeral_session(now);
        }

        if let (Lookup::Found(id), Lookup::Found(seen)) = (stored_id, stored_seen) {
            if let Some(last_seen_at) = parse_millis(&seen) {
                let started_at = self
                    .cached
                    .as_ref()
                    .filter(|s| s.id == id)
                    .map_or(last_seen_at, |s| s.started_at);
                let mut session = Session {
                    id,
                    started_at,
                    last_seen_at,
                };
                if !session.is_expired(now, self.idle_timeout) && !id_is_blank(&session.id) {
                    session.last_seen_at = now;
                    self.volatile
                        .set(SESSION_LAST_SEEN_KEY, &now.timestamp_millis().to_string());
                    self.cached = Some(session.clone());
                    return session;
                }
            }
        }

        self.rotate(now)
    }

    pub fn clear_cache(&mut self) {
        self.cached = None;
    }

    fn rotate(&mut self, now: DateTime<Utc>) -> Session {
        let session = Session::new(mint_session_id(), now);
        let persisted = self.volatile.set(SESSION_ID_KEY, &session.id)
            && self
                .volatile
                .set(SESSION_LAST_SEEN_KEY, &now.timestamp_millis().to_string());
        if !persisted {
            return ephemeral_session(now);
        }
        debug!(session_id = %session.id, "session started");
        self.cached = Some(session.clone());
        session
    }
}

fn mint_session_id() -> String {
    format!("{SESSION_ID_PREFIX}{}", uuid::Uuid::new_v4().simple())
}

/// Time-derived session used when volatile storage is unusable. Never
/// persisted.
fn ephemeral_session(now: DateTime<Utc>) -> Session {
    Session::new(
        format!("{SESSION_ID_PREFIX}{}", now.timestamp_millis()),
        now,
    )
}

fn parse_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis: i64 = raw.trim().parse().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}

fn id_is_blank(id: &str) -> bool {
    id.trim().is_empty()
}
