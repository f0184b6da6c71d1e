//! Client-side delivery.

use std::sync::Arc;

use cassette_core::errors::TransportError;
use tracing::trace;

use crate::beacon::Beacon;
use crate::fetch::DetachedFetch;
use crate::protocol::CaptureRequest;

/// Synchronous fire-and-forget delivery. Tries the beacon first and falls
/// back to a detached fetch. Success means "accepted for sending",
/// nothing more.
#[derive(Clone, Default)]
pub struct ClientTransport {
    beacon: Option<Arc<dyn Beacon>>,
    fallback: Option<DetachedFetch>,
}

impl ClientTransport {
    pub fn new(beacon: Option<Arc<dyn Beacon>>, fallback: Option<DetachedFetch>) -> Self {
        Self { beacon, fallback }
    }

    pub fn with_beacon(beacon: Arc<dyn Beacon>) -> Self {
        Self::new(Some(beacon), None)
    }

    pub fn with_fallback(fallback: DetachedFetch) -> Self {
        Self::new(None, Some(fallback))
    }

    /// A transport that accepts nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn try_send(&self, request: CaptureRequest) -> Result<(), TransportError> {
        if let Some(beacon) = &self.beacon {
            if beacon.send(request.clone()) {
                return Ok(());
            }
            trace!(event = %request.event, "beacon refused, using detached fetch");
        }
        match &self.fallback {
            Some(fetch) => fetch.dispatch(request),
            None => Err(TransportError::QueueRejected {
                reason: "no delivery primitive accepted the event".to_string(),
            }),
        }
    }

    pub fn send(&self, request: CaptureRequest) -> bool {
        self.try_send(request).is_ok()
    }
}

impl std::fmt::Debug for ClientTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientTransport")
            .field("beacon", &self.beacon.is_some())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
