//! Blocking collector seam and its HTTP implementation.

use std::time::Duration;

use cassette_core::config::{CollectorConfig, TransportConfig};
use cassette_core::errors::TransportError;
use tracing::debug;

use crate::protocol::CaptureRequest;

/// Something that accepts one capture request per round trip.
pub trait Collector: Send + Sync {
    fn post(&self, request: &CaptureRequest) -> Result<(), TransportError>;
}

fn net_err(e: reqwest::Error) -> TransportError {
    TransportError::Network {
        reason: e.to_string(),
    }
}

/// reqwest-backed collector. One attempt per request; non-2xx responses
/// are errors and response bodies are ignored.
#[derive(Debug, Clone)]
pub struct HttpCollector {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpCollector {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(net_err)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Collector for `<host>/capture/`.
    pub fn from_config(
        collector: &CollectorConfig,
        transport: &TransportConfig,
    ) -> Result<Self, TransportError> {
        Self::new(collector.capture_url(), transport.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Collector for HttpCollector {
    fn post(&self, request: &CaptureRequest) -> Result<(), TransportError> {
        let body = request.to_json()?;
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(net_err)?;

        let status = response.status();
        debug!(event = %request.event, status = status.as_u16(), "collector responded");
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
            })
        }
    }
}
