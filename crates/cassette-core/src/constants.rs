/// Library version, reported as `$lib_version` on every event.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `$lib` tag for events sent from a client context.
pub const CLIENT_LIB: &str = "cassette-web";

/// `$lib` tag for events sent from the server mirror.
pub const SERVER_LIB: &str = "cassette-server";

/// Path appended to the collector host.
pub const CAPTURE_PATH: &str = "/capture/";

/// Prefix of every anonymous distinct id.
pub const ANONYMOUS_ID_PREFIX: &str = "anon:";

/// Prefix of minted session ids.
pub const SESSION_ID_PREFIX: &str = "sess_";

// --- Storage keys ---

/// Durable key holding the anonymous distinct id.
pub const DISTINCT_ID_KEY: &str = "cassette.analytics.distinct_id";
/// Durable key prefix for alias-merge guards, one entry per (anon, user) pair.
pub const ALIAS_GUARD_PREFIX: &str = "cassette.analytics.alias:";
/// Volatile key holding the current session id.
pub const SESSION_ID_KEY: &str = "cassette.analytics.session_id";
/// Volatile key holding the session's last-seen time in epoch millis.
pub const SESSION_LAST_SEEN_KEY: &str = "cassette.analytics.session_last_seen";

// --- System property keys attached after sanitizing ---

pub const PROP_LIB: &str = "$lib";
pub const PROP_LIB_VERSION: &str = "$lib_version";
pub const PROP_SESSION_ID: &str = "$session_id";
pub const PROP_ANON_DISTINCT_ID: &str = "$anon_distinct_id";
pub const PROP_ALIAS: &str = "alias";
pub const PROP_INTERNAL_ACTOR: &str = "internal_actor";

/// Per-event opt-in flag read by the suppression policy, never sent.
pub const PROP_ALLOW_IN_DEV: &str = "analytics_allow_in_dev";
