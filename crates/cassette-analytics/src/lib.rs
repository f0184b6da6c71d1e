//! # cassette-analytics
//!
//! The analytics event pipeline. A client capture runs
//! suppression → context merge → normalization → sanitizing → identity →
//! delivery; the server mirror runs the same middle stages and waits for
//! one collector round trip.

pub mod client;
pub mod context;
pub mod normalizer;
pub mod pageview;
pub mod server;
pub mod suppression;
pub mod tracing_setup;

pub use client::Analytics;
pub use context::ContextStore;
pub use pageview::{PageviewTracker, RouteChange};
pub use server::ServerAnalytics;
pub use suppression::{SuppressionPolicy, SuppressionReason};
