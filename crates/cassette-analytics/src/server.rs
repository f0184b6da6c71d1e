//! Server Mirror: the pipeline for trusted backend contexts.

use std::sync::Arc;

use cassette_core::config::AnalyticsConfig;
use cassette_core::constants::{
    PROP_ALLOW_IN_DEV, PROP_INTERNAL_ACTOR, PROP_LIB, PROP_LIB_VERSION, SERVER_LIB, VERSION,
};
use cassette_core::errors::{CassetteErrorCode, TransportError};
use cassette_core::models::{is_internal_account, EventEnvelope, Properties, PropertyValue};
use cassette_core::traits::{Clock, SystemClock};
use cassette_core::{CassetteError, CassetteResult};
use cassette_privacy::Sanitizer;
use cassette_transport::{CaptureRequest, Collector, HttpCollector};
use tracing::{debug, warn};

use crate::normalizer;
use crate::server_capture_span;
use crate::suppression::SuppressionPolicy;

/// Server-side capture with an explicit distinct id. Waits for one
/// collector round trip and reports its outcome.
pub struct ServerAnalytics {
    config: AnalyticsConfig,
    sanitizer: Sanitizer,
    suppression: SuppressionPolicy,
    collector: Option<Arc<dyn Collector>>,
    clock: Arc<dyn Clock>,
}

impl ServerAnalytics {
    pub fn new(
        config: AnalyticsConfig,
        collector: Arc<dyn Collector>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_collector(config, Some(collector), clock)
    }

    /// Mirror posting to the configured server collector.
    pub fn from_config(config: AnalyticsConfig) -> Self {
        let collector = match server_collector(&config) {
            Ok(collector) => Some(collector),
            Err(e) => {
                warn!(
                    code = e.error_code(),
                    error = %e,
                    "collector unavailable, server analytics disabled"
                );
                None
            }
        };
        Self::with_collector(config, collector, Arc::new(SystemClock))
    }

    fn with_collector(
        config: AnalyticsConfig,
        collector: Option<Arc<dyn Collector>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sanitizer: Sanitizer::from_config(&config.privacy),
            suppression: SuppressionPolicy::from_config(&config),
            collector,
            config,
            clock,
        }
    }

    pub fn has_collector(&self) -> bool {
        self.collector.is_some()
    }

    /// Returns true only when the collector accepted the event.
    pub fn capture(&self, distinct_id: &str, event: &str, properties: Properties) -> bool {
        let event = event.trim();
        let _span = server_capture_span!(event).entered();
        match self.try_capture(distinct_id.trim(), event, properties) {
            Ok(accepted) => accepted,
            Err(CassetteError::Transport(TransportError::MissingCredential)) => {
                debug!(event, "no server credential");
                false
            }
            Err(e) => {
                warn!(event, code = e.error_code(), error = %e, "server capture failed");
                false
            }
        }
    }

    fn try_capture(
        &self,
        distinct_id: &str,
        event: &str,
        mut properties: Properties,
    ) -> CassetteResult<bool> {
        let api_key = self
            .config
            .server
            .credential()
            .ok_or(TransportError::MissingCredential)?;
        if distinct_id.is_empty() || event.is_empty() {
            return Ok(false);
        }
        let Some(collector) = &self.collector else {
            return Ok(false);
        };

        let allow_in_dev = properties
            .remove(PROP_ALLOW_IN_DEV)
            .and_then(|v| v.as_bool());
        let route = properties.get("route").and_then(PropertyValue::as_str);
        if let Some(reason) = self.suppression.reason(route, allow_in_dev) {
            debug!(event, reason = reason.as_str(), "event suppressed");
            return Ok(false);
        }

        let internal_actor = is_internal_account(properties.get("account_type"));
        normalizer::canonicalize_account_type(&mut properties);
        let normalized = normalizer::with_core_action(event, properties);
        let mut clean = self.sanitizer.sanitize(&normalized);
        clean.insert(PROP_INTERNAL_ACTOR.into(), PropertyValue::Bool(internal_actor));
        clean.insert(PROP_LIB.into(), PropertyValue::from(SERVER_LIB));
        clean.insert(PROP_LIB_VERSION.into(), PropertyValue::from(VERSION));

        let envelope = EventEnvelope::new(event, clean);
        let request = CaptureRequest::new(api_key, distinct_id, envelope, self.clock.now());
        collector.post(&request)?;
        Ok(true)
    }
}

fn server_collector(config: &AnalyticsConfig) -> CassetteResult<Arc<dyn Collector>> {
    config.validate()?;
    let collector = HttpCollector::from_config(&config.server, &config.transport)?;
    Ok(Arc::new(collector))
}

impl std::fmt::Debug for ServerAnalytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerAnalytics")
            .field("environment", &self.config.environment)
            .field("has_collector", &self.collector.is_some())
            .finish_non_exhaustive()
    }
}
