//! Capture wire protocol.

use cassette_core::errors::TransportError;
use cassette_core::models::{EventEnvelope, Properties};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST <host>/capture/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub api_key: String,
    pub event: String,
    pub distinct_id: String,
    pub properties: Properties,
    /// RFC 3339, millisecond precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CaptureRequest {
    pub fn new(
        api_key: impl Into<String>,
        distinct_id: impl Into<String>,
        envelope: EventEnvelope,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            event: envelope.event,
            distinct_id: distinct_id.into(),
            properties: envelope.properties,
            timestamp: Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::Serialization {
            reason: e.to_string(),
        })
    }
}
