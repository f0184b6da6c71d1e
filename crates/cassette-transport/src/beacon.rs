//! Beacon delivery: hand the request to something that outlives the caller.

use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use cassette_core::config::TransportConfig;
use cassette_core::errors::error_code::CassetteErrorCode;
use tracing::debug;

use crate::http_client::Collector;
use crate::protocol::CaptureRequest;

const SHUTDOWN_POLL: Duration = Duration::from_millis(5);

/// Fire-and-forget primitive. `send` only reports whether the request was
/// taken; delivery is never confirmed.
pub trait Beacon: Send + Sync {
    fn send(&self, request: CaptureRequest) -> bool;
}

/// Bounded queue drained by one worker thread posting through a
/// [`Collector`]. A full or closed queue refuses the request.
///
/// Dropping the beacon closes the queue and waits at most the shutdown
/// grace for the worker to drain it. Past the grace the worker is detached
/// and keeps draining on its own.
pub struct BackgroundBeacon {
    sender: Option<SyncSender<CaptureRequest>>,
    worker: Option<JoinHandle<()>>,
    shutdown_grace: Duration,
}

impl BackgroundBeacon {
    pub fn spawn(
        collector: Arc<dyn Collector>,
        capacity: usize,
        shutdown_grace: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::sync_channel::<CaptureRequest>(capacity.max(1));
        let worker = thread::Builder::new()
            .name("cassette-beacon".into())
            .spawn(move || {
                for request in receiver {
                    if let Err(e) = collector.post(&request) {
                        debug!(
                            event = %request.event,
                            code = e.error_code(),
                            error = %e,
                            "beacon delivery failed"
                        );
                    }
                }
            });
        match worker {
            Ok(handle) => Self {
                sender: Some(sender),
                worker: Some(handle),
                shutdown_grace,
            },
            Err(e) => {
                debug!(error = %e, "beacon worker could not start");
                Self {
                    sender: None,
                    worker: None,
                    shutdown_grace,
                }
            }
        }
    }

    pub fn from_config(collector: Arc<dyn Collector>, config: &TransportConfig) -> Self {
        Self::spawn(
            collector,
            config.beacon_queue_capacity,
            config.shutdown_grace(),
        )
    }

    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }
}

impl Beacon for BackgroundBeacon {
    fn send(&self, request: CaptureRequest) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        match sender.try_send(request) {
            Ok(()) => true,
            Err(TrySendError::Full(request)) => {
                debug!(event = %request.event, "beacon queue full");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

impl Drop for BackgroundBeacon {
    fn drop(&mut self) {
        self.sender.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        let deadline = Instant::now() + self.shutdown_grace;
        while !worker.is_finished() {
            if Instant::now() >= deadline {
                debug!("beacon still draining at shutdown, detaching worker");
                return;
            }
            thread::sleep(SHUTDOWN_POLL);
        }
        let _ = worker.join();
    }
}

impl std::fmt::Debug for BackgroundBeacon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundBeacon")
            .field("running", &self.is_running())
            .field("shutdown_grace", &self.shutdown_grace)
            .finish()
    }
}
