//! Detached fetch: the fallback when no beacon takes the request.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use cassette_core::errors::error_code::CassetteErrorCode;
use cassette_core::errors::TransportError;
use tracing::debug;

use crate::http_client::Collector;
use crate::protocol::CaptureRequest;

/// Posts each request on its own detached thread, with at most
/// `max_in_flight` threads alive at once.
///
/// Contract: no cancellation and no confirmation. The spawned thread is
/// never joined; its failure is logged at debug level and discarded.
#[derive(Clone)]
pub struct DetachedFetch {
    collector: Arc<dyn Collector>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: usize,
}

/// Releases an in-flight slot when the fetch thread ends.
struct Slot(Arc<AtomicUsize>);

impl Drop for Slot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl DetachedFetch {
    pub fn new(collector: Arc<dyn Collector>, max_in_flight: usize) -> Self {
        Self {
            collector,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start the fetch. Refused when the in-flight limit is reached or the
    /// thread cannot be spawned.
    pub fn dispatch(&self, request: CaptureRequest) -> Result<(), TransportError> {
        let slot = self.acquire()?;
        let collector = Arc::clone(&self.collector);
        thread::Builder::new()
            .name("cassette-fetch".into())
            .spawn(move || {
                let _slot = slot;
                if let Err(e) = collector.post(&request) {
                    debug!(
                        event = %request.event,
                        code = e.error_code(),
                        error = %e,
                        "detached delivery failed"
                    );
                }
            })
            .map(|_detached| ())
            .map_err(|e| TransportError::QueueRejected {
                reason: format!("fetch thread could not start: {e}"),
            })
    }

    fn acquire(&self) -> Result<Slot, TransportError> {
        self.in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_in_flight).then_some(n + 1)
            })
            .map(|_| Slot(Arc::clone(&self.in_flight)))
            .map_err(|n| TransportError::QueueRejected {
                reason: format!("{n} detached fetches already in flight"),
            })
    }
}

impl std::fmt::Debug for DetachedFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetachedFetch")
            .field("in_flight", &self.in_flight())
            .field("max_in_flight", &self.max_in_flight)
            .finish_non_exhaustive()
    }
}
