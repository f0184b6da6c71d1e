//! Client pipeline.

use std::sync::Arc;

use cassette_core::config::AnalyticsConfig;
use cassette_core::errors::{CassetteErrorCode, TransportError};
use cassette_core::constants::{
    CLIENT_LIB, PROP_ALIAS, PROP_ALLOW_IN_DEV, PROP_ANON_DISTINCT_ID, PROP_INTERNAL_ACTOR,
    PROP_LIB, PROP_LIB_VERSION, PROP_SESSION_ID, VERSION,
};
use cassette_core::models::event_names::{CREATE_ALIAS, IDENTIFY};
use cassette_core::models::{
    is_internal_account, AccountType, EventEnvelope, Properties, PropertyValue,
};
use cassette_core::traits::{Clock, KeyValueStore, SystemClock};
use cassette_core::CassetteResult;
use cassette_privacy::canonical::{canonicalize_domain, canonicalize_route};
use cassette_privacy::Sanitizer;
use cassette_session::IdentityResolver;
use cassette_transport::{
    BackgroundBeacon, CaptureRequest, ClientTransport, Collector, DetachedFetch, HttpCollector,
};
use tracing::{debug, info, warn};

use crate::context::ContextStore;
use crate::normalizer;
use crate::pageview::PageviewTracker;
use crate::suppression::SuppressionPolicy;
use crate::{capture_span, identify_span, pageview_span};

/// Traits copied into context by [`Analytics::identify`].
const IDENTITY_TRAITS: &[&str] = &["org_id", "role", "plan"];

/// The client-side analytics pipeline.
///
/// Every entry point returns `bool` and never fails: storage problems
/// degrade to ephemeral ids, transport problems to `false`.
pub struct Analytics {
    config: AnalyticsConfig,
    context: ContextStore,
    resolver: IdentityResolver,
    sanitizer: Sanitizer,
    suppression: SuppressionPolicy,
    pageviews: PageviewTracker,
    transport: ClientTransport,
    clock: Arc<dyn Clock>,
}

impl Analytics {
    pub fn new(
        config: AnalyticsConfig,
        resolver: IdentityResolver,
        transport: ClientTransport,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sanitizer: Sanitizer::from_config(&config.privacy),
            suppression: SuppressionPolicy::from_config(&config),
            context: ContextStore::new(),
            pageviews: PageviewTracker::new(),
            config,
            resolver,
            transport,
            clock,
        }
    }

    /// Pipeline posting to the configured client collector through a
    /// background beacon, with a detached fetch as fallback.
    pub fn from_config(
        config: AnalyticsConfig,
        durable: Arc<dyn KeyValueStore>,
        volatile: Arc<dyn KeyValueStore>,
    ) -> Self {
        let resolver = IdentityResolver::with_stores(durable, volatile, &config.session);
        let transport = client_transport(&config).unwrap_or_else(|e| {
            warn!(
                code = e.error_code(),
                error = %e,
                "collector unavailable, client analytics disabled"
            );
            ClientTransport::disabled()
        });
        Self::new(config, resolver, transport, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn context(&self) -> &ContextStore {
        &self.context
    }

    pub fn resolver_mut(&mut self) -> &mut IdentityResolver {
        &mut self.resolver
    }

    /// Overlay ambient properties. `Null` clears a key.
    pub fn set_context(&mut self, properties: Properties) -> bool {
        self.context.set(properties);
        true
    }

    /// Store the referrer's host as `referrer_domain`. Returns false, leaving
    /// context untouched, when no host can be extracted.
    pub fn set_referrer(&mut self, referrer: &str) -> bool {
        match canonicalize_domain(referrer) {
            Some(domain) => {
                self.context
                    .set_value("referrer_domain", PropertyValue::Text(domain));
                true
            }
            None => false,
        }
    }

    /// Capture a named event. Returns whether it was accepted for sending.
    pub fn capture(&mut self, event: &str, properties: Properties) -> bool {
        let event = event.trim();
        let _span = capture_span!(event).entered();
        let distinct_id = self.distinct_id();
        self.dispatch(event, properties, &distinct_id, Properties::new())
    }

    /// Attach the visitor to `user_id`, merging the anonymous id into it at
    /// most once per pair. Returns whether the identity-set event was
    /// accepted for sending.
    pub fn identify(&mut self, user_id: &str, traits: Properties) -> bool {
        let _span = identify_span!().entered();
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return false;
        }

        let anonymous_id = self.resolver.anonymous_id();
        self.apply_identity(user_id, &traits);

        if self.resolver.should_emit_alias(&anonymous_id, user_id) {
            let mut system = Properties::new();
            system.insert(PROP_ALIAS.into(), PropertyValue::from(anonymous_id.as_str()));
            if self.dispatch(CREATE_ALIAS, Properties::new(), user_id, system) {
                let durable = self.resolver.mark_alias_emitted(&anonymous_id, user_id);
                info!(durable, "alias merge emitted");
            }
        }

        let mut system = Properties::new();
        system.insert(
            PROP_ANON_DISTINCT_ID.into(),
            PropertyValue::from(anonymous_id.as_str()),
        );
        self.dispatch(IDENTIFY, traits, user_id, system)
    }

    /// Record a route change. Emits `page_leave` for the previous route
    /// before `$pageview` for the new one. Returns false, emitting nothing,
    /// when the route is already active.
    pub fn track_pageview(&mut self, route: &str) -> bool {
        let Some(route) = canonicalize_route(route) else {
            return false;
        };
        let _span = pageview_span!(route).entered();
        let now = self.clock.now();
        let session_id = self.resolver.session_id(now);
        let Some(change) = self.pageviews.enter(&route, now, &session_id) else {
            return false;
        };
        if self.pageviews.bind_unload_handler() {
            debug!("unload handler bound");
        }
        self.context
            .set_value("route", PropertyValue::from(route.as_str()));

        if let Some(leave) = change.leave {
            self.emit(leave);
        }
        self.emit(change.pageview)
    }

    /// Flush the final `page_leave` on unload.
    pub fn page_unload(&mut self) -> bool {
        let now = self.clock.now();
        match self.pageviews.unload(now) {
            Some(leave) => self.emit(leave),
            None => false,
        }
    }

    /// Clear all in-memory state. Persisted storage is untouched.
    pub fn reset(&mut self) {
        self.context.reset();
        self.resolver.reset();
        self.pageviews.reset();
    }

    /// The id events are attributed to: the context user when
    /// authenticated, otherwise the anonymous id.
    pub fn distinct_id(&mut self) -> String {
        let authenticated = self
            .context
            .get("is_authenticated")
            .is_some_and(PropertyValue::is_truthy);
        if authenticated {
            if let Some(user_id) = self.context.get("user_id").and_then(property_text) {
                return user_id;
            }
        }
        self.resolver.anonymous_id()
    }

    fn emit(&mut self, envelope: EventEnvelope) -> bool {
        let distinct_id = self.distinct_id();
        self.dispatch(&envelope.event, envelope.properties, &distinct_id, Properties::new())
    }

    fn apply_identity(&mut self, user_id: &str, traits: &Properties) {
        let account_type = traits
            .get("account_type")
            .or_else(|| self.context.get("account_type"))
            .map(AccountType::from_value)
            .unwrap_or_default();

        let mut updates = Properties::new();
        updates.insert("user_id".into(), PropertyValue::from(user_id));
        updates.insert("is_authenticated".into(), PropertyValue::Bool(true));
        updates.insert("account_type".into(), PropertyValue::from(account_type.as_str()));
        updates.insert(
            PROP_INTERNAL_ACTOR.into(),
            PropertyValue::Bool(account_type.is_internal()),
        );
        for key in IDENTITY_TRAITS {
            if let Some(value) = traits.get(*key) {
                updates.insert((*key).to_string(), value.clone());
            }
        }
        self.context.set(updates);
    }

    fn dispatch(
        &mut self,
        event: &str,
        properties: Properties,
        distinct_id: &str,
        system: Properties,
    ) -> bool {
        match self.try_dispatch(event, properties, distinct_id, system) {
            Ok(accepted) => accepted,
            Err(e) => {
                debug!(event, code = e.error_code(), error = %e, "event not sent");
                false
            }
        }
    }

    /// suppression → context merge → normalize → sanitize → system
    /// properties → transport. `Ok(false)` means the event was dropped on
    /// purpose.
    fn try_dispatch(
        &mut self,
        event: &str,
        mut properties: Properties,
        distinct_id: &str,
        system: Properties,
    ) -> CassetteResult<bool> {
        let api_key = self
            .config
            .client
            .credential()
            .map(str::to_string)
            .ok_or(TransportError::MissingCredential)?;
        if event.is_empty() {
            return Ok(false);
        }

        let allow_in_dev = properties
            .remove(PROP_ALLOW_IN_DEV)
            .and_then(|v| v.as_bool());
        let route = self.current_route(&properties);
        if let Some(reason) = self.suppression.reason(route.as_deref(), allow_in_dev) {
            debug!(event, reason = reason.as_str(), "event suppressed");
            return Ok(false);
        }

        let mut merged = self.context.merged_with(properties);
        let internal_actor = is_internal_account(merged.get("account_type"));
        normalizer::canonicalize_account_type(&mut merged);
        let normalized = normalizer::with_core_action(event, merged);
        let (mut clean, report) = self.sanitizer.sanitize_with_report(&normalized);
        if report.dropped_count() > 0 {
            debug!(
                event,
                dropped = report.dropped_count(),
                forbidden = ?report.forbidden,
                unlisted = ?report.unlisted,
                "properties dropped"
            );
        }

        let now = self.clock.now();
        let session_id = self.resolver.session_id(now);
        clean.extend(system);
        clean.insert(PROP_SESSION_ID.into(), PropertyValue::Text(session_id));
        clean.insert(PROP_INTERNAL_ACTOR.into(), PropertyValue::Bool(internal_actor));
        clean.insert(PROP_LIB.into(), PropertyValue::from(CLIENT_LIB));
        clean.insert(PROP_LIB_VERSION.into(), PropertyValue::from(VERSION));

        let envelope = EventEnvelope::new(event, clean);
        let request = CaptureRequest::new(api_key, distinct_id, envelope, now);
        self.transport.try_send(request)?;
        Ok(true)
    }

    /// Route used for suppression: the event's own, then context, then
    /// the active pageview.
    fn current_route(&self, properties: &Properties) -> Option<String> {
        properties
            .get("route")
            .or_else(|| self.context.get("route"))
            .and_then(PropertyValue::as_str)
            .map(str::to_string)
            .or_else(|| self.pageviews.active().map(|a| a.route.clone()))
    }
}

/// Beacon-first transport posting to the client collector.
fn client_transport(config: &AnalyticsConfig) -> CassetteResult<ClientTransport> {
    config.validate()?;
    let collector: Arc<dyn Collector> = Arc::new(HttpCollector::from_config(
        &config.client,
        &config.transport,
    )?);
    let beacon = BackgroundBeacon::from_config(Arc::clone(&collector), &config.transport);
    let fallback = DetachedFetch::new(collector, config.transport.max_in_flight_fetches);
    Ok(ClientTransport::new(Some(Arc::new(beacon)), Some(fallback)))
}

fn property_text(value: &PropertyValue) -> Option<String> {
    match value {
        PropertyValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        PropertyValue::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("environment", &self.config.environment)
            .field("context_keys", &self.context.snapshot().len())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
