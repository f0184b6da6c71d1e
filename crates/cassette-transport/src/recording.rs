//! In-memory transport adapters. Record what would have been sent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use cassette_core::errors::TransportError;

use crate::beacon::Beacon;
use crate::http_client::Collector;
use crate::protocol::CaptureRequest;

#[derive(Debug, Default)]
struct Log {
    requests: Mutex<Vec<CaptureRequest>>,
}

impl Log {
    fn push(&self, request: CaptureRequest) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
    }

    fn snapshot(&self) -> Vec<CaptureRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&self) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

/// Beacon that records accepted requests. While refusing, nothing is
/// recorded and `send` returns false.
#[derive(Debug, Default)]
pub struct RecordingBeacon {
    log: Log,
    refusing: AtomicBool,
}

impl RecordingBeacon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        let beacon = Self::default();
        beacon.set_refusing(true);
        beacon
    }

    pub fn set_refusing(&self, refusing: bool) {
        self.refusing.store(refusing, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<CaptureRequest> {
        self.log.snapshot()
    }

    /// Event names in send order.
    pub fn events(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.event).collect()
    }

    pub fn clear(&self) {
        self.log.clear();
    }
}

impl Beacon for RecordingBeacon {
    fn send(&self, request: CaptureRequest) -> bool {
        if self.refusing.load(Ordering::SeqCst) {
            return false;
        }
        self.log.push(request);
        true
    }
}

/// Collector that records every request it is asked to post, including
/// the ones it then fails.
#[derive(Debug, Default)]
pub struct RecordingCollector {
    log: Log,
    failing: Mutex<Option<u16>>,
}

impl RecordingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector that answers every request with `status`.
    pub fn failing_with(status: u16) -> Self {
        let collector = Self::default();
        collector.fail_with(Some(status));
        collector
    }

    pub fn fail_with(&self, status: Option<u16>) {
        *self.failing.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }

    pub fn requests(&self) -> Vec<CaptureRequest> {
        self.log.snapshot()
    }

    pub fn events(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.event).collect()
    }
}

impl Collector for RecordingCollector {
    fn post(&self, request: &CaptureRequest) -> Result<(), TransportError> {
        self.log.push(request.clone());
        match *self.failing.lock().unwrap_or_else(|e| e.into_inner()) {
            Some(status) => Err(TransportError::Status { status }),
            None => Ok(()),
        }
    }
}
