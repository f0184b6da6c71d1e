//! Alias-merge deduplication.
//!
//! An anonymous id is merged into a user id at most once. The guard is a
//! durable marker per (anonymous, user) pair, mirrored in memory so the
//! process keeps the at-most-once property when durable writes fail.

use std::collections::HashSet;

use cassette_core::constants::ALIAS_GUARD_PREFIX;
use tracing::debug;

use crate::storage::{Lookup, SafeStorage};

/// Deterministic storage key for the (anonymous, user) pair.
///
/// The pair is hashed so raw user ids never appear in storage keys.
pub fn alias_guard_key(anonymous_id: &str, user_id: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(anonymous_id.as_bytes());
    hasher.update(&[0u8]);
    hasher.update(user_id.as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("{ALIAS_GUARD_PREFIX}{}", &hex.as_str()[..32])
}

/// Single-flag guard per pair. Not a compare-and-set: two writers racing
/// on the same durable store can both observe "unset".
#[derive(Debug)]
pub struct AliasGuard {
    durable: SafeStorage,
    emitted: HashSet<String>,
}

impl AliasGuard {
    pub fn new(durable: SafeStorage) -> Self {
        Self {
            durable,
            emitted: HashSet::new(),
        }
    }

    /// False when the ids are equal or the pair was already merged.
    pub fn should_emit(&self, anonymous_id: &str, user_id: &str) -> bool {
        if anonymous_id == user_id {
            return false;
        }
        let key = alias_guard_key(anonymous_id, user_id);
        if self.emitted.contains(&key) {
            return false;
        }
        !matches!(self.durable.lookup(&key), Lookup::Found(_))
    }

    /// Record the merge. Returns whether the marker reached durable storage;
    /// the in-memory marker is set either way.
    pub fn mark_emitted(&mut self, anonymous_id: &str, user_id: &str) -> bool {
        let key = alias_guard_key(anonymous_id, user_id);
        let persisted = self.durable.set(&key, "1");
        if !persisted {
            debug!(key = %key, "alias guard held in memory only");
        }
        self.emitted.insert(key);
        persisted
    }

    /// Forget in-memory markers. Durable markers stay.
    pub fn clear_memory(&mut self) {
        self.emitted.clear();
    }
}
