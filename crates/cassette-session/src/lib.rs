//! # cassette-session
//!
//! Identity and session resolution for the analytics pipeline:
//! lazily minted anonymous ids, idle-rotated sessions, and the durable
//! guard that keeps an alias merge to at most one emission per
//! (anonymous, user) pair. Storage sits behind [`KeyValueStore`]
//! adapters; [`SafeStorage`] turns their failures into graceful
//! degradation.
//!
//! [`KeyValueStore`]: cassette_core::traits::KeyValueStore

pub mod deduplication;
pub mod manager;
pub mod session;
pub mod storage;

pub use deduplication::{alias_guard_key, AliasGuard};
pub use manager::IdentityResolver;
pub use session::SessionTracker;
pub use storage::{FileStore, Lookup, MemoryStore, SafeStorage, UnavailableStore};
