use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Delivery transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Timeout for one collector round trip.
    pub request_timeout_secs: u64,
    /// Pending events the background beacon holds before refusing.
    pub beacon_queue_capacity: usize,
    /// How long dropping the beacon waits for queued requests before
    /// leaving the worker to finish on its own.
    pub shutdown_grace_ms: u64,
    /// Detached fallback requests allowed in flight at once.
    pub max_in_flight_fetches: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            beacon_queue_capacity: defaults::DEFAULT_BEACON_QUEUE_CAPACITY,
            shutdown_grace_ms: defaults::DEFAULT_SHUTDOWN_GRACE_MS,
            max_in_flight_fetches: defaults::DEFAULT_MAX_IN_FLIGHT_FETCHES,
        }
    }
}

impl TransportConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
