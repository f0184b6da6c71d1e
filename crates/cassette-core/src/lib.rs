//! # cassette-core
//!
//! Foundation crate for the Cassette analytics pipeline.
//! Defines the property model, account types, event envelopes, errors,
//! config, constants, and the capability traits every adapter implements.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{AnalyticsConfig, Environment};
pub use errors::{CassetteError, CassetteResult};
pub use models::{AccountType, EventEnvelope, Properties, PropertyValue};
