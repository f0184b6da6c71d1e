//! Keys allowed to leave the process, and how each one is canonicalized.

/// How a key's value is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// URL path only.
    Route,
    /// Lowercase hostname only.
    Domain,
    /// Closed platform enum, `unknown` by default.
    Platform,
    /// Closed element-type enum, dropped if unrecognized.
    ElementType,
    /// Scalar cleaning only.
    Plain,
}

pub const ROUTE_KEYS: &[&str] = &["route", "previous_route", "page"];
pub const DOMAIN_KEYS: &[&str] = &["domain", "referrer_domain", "link_domain"];
pub const PLATFORM_KEYS: &[&str] = &["platform", "source_platform", "target_platform"];
pub const ELEMENT_TYPE_KEYS: &[&str] =
    &["element_type", "source_element_type", "target_element_type"];

/// Scalar keys without a canonicalizer.
pub const PLAIN_KEYS: &[&str] = &[
    // placement
    "surface",
    "source_surface",
    // outcome
    "status",
    "success",
    "core_action",
    "error_code",
    "error_kind",
    // actor
    "is_authenticated",
    "account_type",
    "internal_actor",
    "user_id",
    "org_id",
    "role",
    "plan",
    // timing
    "duration_ms",
    "duration_seconds",
    "leave_reason",
    // counts and positions
    "result_count",
    "track_count",
    "position",
    "step",
    // interaction
    "method",
    "cta",
    "variant",
    "experiment",
    "feature",
    "is_public",
    // entity references
    "post_id",
    "playlist_id",
    "link_id",
];

/// Every built-in allow-listed key.
pub fn default_allowed_keys() -> impl Iterator<Item = &'static str> {
    ROUTE_KEYS
        .iter()
        .chain(DOMAIN_KEYS)
        .chain(PLATFORM_KEYS)
        .chain(ELEMENT_TYPE_KEYS)
        .chain(PLAIN_KEYS)
        .copied()
}

pub fn key_kind(key: &str) -> KeyKind {
    if ROUTE_KEYS.contains(&key) {
        KeyKind::Route
    } else if DOMAIN_KEYS.contains(&key) {
        KeyKind::Domain
    } else if PLATFORM_KEYS.contains(&key) {
        KeyKind::Platform
    } else if ELEMENT_TYPE_KEYS.contains(&key) {
        KeyKind::ElementType
    } else {
        KeyKind::Plain
    }
}
