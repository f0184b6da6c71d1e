//! IdentityResolver: anonymous ids, sessions, and the alias guard behind
//! one owner.

use std::sync::Arc;

use cassette_core::config::SessionConfig;
use cassette_core::constants::{ANONYMOUS_ID_PREFIX, DISTINCT_ID_KEY};
use cassette_core::models::Session;
use cassette_core::traits::KeyValueStore;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::deduplication::{self, AliasGuard};
use crate::session::SessionTracker;
use crate::storage::{Lookup, SafeStorage};

/// Resolves who the visitor is and which session they are in.
///
/// Durable storage holds the anonymous id and alias guards; volatile
/// storage holds the session. Either may be missing or failing, in which
/// case values are minted in memory and the caller never sees an error.
#[derive(Debug)]
pub struct IdentityResolver {
    durable: SafeStorage,
    sessions: SessionTracker,
    aliases: AliasGuard,
    ephemeral_anonymous_id: Option<String>,
}

impl IdentityResolver {
    pub fn new(durable: SafeStorage, volatile: SafeStorage, config: &SessionConfig) -> Self {
        Self {
            aliases: AliasGuard::new(durable.clone()),
            sessions: SessionTracker::new(volatile, config.idle_timeout()),
            durable,
            ephemeral_anonymous_id: None,
        }
    }

    pub fn with_stores(
        durable: Arc<dyn KeyValueStore>,
        volatile: Arc<dyn KeyValueStore>,
        config: &SessionConfig,
    ) -> Self {
        Self::new(
            SafeStorage::new(durable, "durable"),
            SafeStorage::new(volatile, "volatile"),
            config,
        )
    }

    /// Resolver with no storage at all: everything is ephemeral.
    pub fn in_memory_only(config: &SessionConfig) -> Self {
        Self::new(
            SafeStorage::absent("durable"),
            SafeStorage::absent("volatile"),
            config,
        )
    }

    /// The persisted anonymous id, minting and persisting one if absent.
    pub fn anonymous_id(&mut self) -> String {
        if let Some(id) = &self.ephemeral_anonymous_id {
            return id.clone();
        }

        match self.durable.lookup(DISTINCT_ID_KEY) {
            Lookup::Found(id) if !id.trim().is_empty() => return id,
            Lookup::Found(_) | Lookup::Missing => {}
            Lookup::Unavailable => return self.remember_ephemeral(mint_anonymous_id()),
        }

        let id = mint_anonymous_id();
        if self.durable.set(DISTINCT_ID_KEY, &id) {
            debug!("anonymous id minted");
            id
        } else {
            self.remember_ephemeral(id)
        }
    }

    pub fn session_id(&mut self, now: DateTime<Utc>) -> String {
        self.sessions.current(now).id
    }

    pub fn current_session(&mut self, now: DateTime<Utc>) -> Session {
        self.sessions.current(now)
    }

    pub fn alias_guard_key(&self, anonymous_id: &str, user_id: &str) -> String {
        deduplication::alias_guard_key(anonymous_id, user_id)
    }

    pub fn should_emit_alias(&self, anonymous_id: &str, user_id: &str) -> bool {
        self.aliases.should_emit(anonymous_id, user_id)
    }

    /// Returns whether the guard reached durable storage.
    pub fn mark_alias_emitted(&mut self, anonymous_id: &str, user_id: &str) -> bool {
        self.aliases.mark_emitted(anonymous_id, user_id)
    }

    /// Clear in-memory state. Persisted values are left alone.
    pub fn reset(&mut self) {
        self.ephemeral_anonymous_id = None;
        self.sessions.clear_cache();
        self.aliases.clear_memory();
    }

    fn remember_ephemeral(&mut self, id: String) -> String {
        warn!("durable storage unusable, anonymous id is ephemeral");
        self.ephemeral_anonymous_id = Some(id.clone());
        id
    }
}

fn mint_anonymous_id() -> String {
    format!("{ANONYMOUS_ID_PREFIX}{}", uuid::Uuid::new_v4().simple())
}
