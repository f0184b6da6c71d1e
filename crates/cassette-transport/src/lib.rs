//! # cassette-transport
//!
//! Delivery of capture requests to the remote collector.
//!
//! - [`protocol`]: the JSON body posted to `<host>/capture/`.
//! - [`http_client`]: the blocking [`Collector`] seam and its reqwest implementation.
//! - [`beacon`] / [`fetch`]: the two client-side fire-and-forget primitives.
//! - [`client`]: [`ClientTransport`], beacon first with a detached fallback.
//! - [`recording`]: in-memory adapters for tests.

pub mod beacon;
pub mod client;
pub mod fetch;
pub mod http_client;
pub mod protocol;
pub mod recording;

pub use beacon::{BackgroundBeacon, Beacon};
pub use client::ClientTransport;
pub use fetch::DetachedFetch;
pub use http_client::{Collector, HttpCollector};
pub use protocol::CaptureRequest;
pub use recording::{RecordingBeacon, RecordingCollector};
