//! # cassette-privacy
//!
//! Property sanitizer for outgoing analytics events. Only allow-listed keys
//! leave the process; keys that look like free text are dropped even when
//! allow-listed; routes, domains, platforms, and element types are reduced
//! to canonical forms.

pub mod allow_list;
pub mod canonical;
pub mod engine;
pub mod patterns;

pub use canonical::{ElementType, Platform};
pub use engine::{SanitizeReport, Sanitizer};
