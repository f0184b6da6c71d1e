mod common;

use cassette_analytics::Analytics;
use cassette_core::config::{AnalyticsConfig, Environment};
use cassette_core::constants::{ALIAS_GUARD_PREFIX, DISTINCT_ID_KEY};
use cassette_core::models::PropertyValue;
use cassette_core::properties;
use cassette_core::traits::{KeyValueStore, ManualClock};
use cassette_session::{IdentityResolver, MemoryStore};
use cassette_transport::{ClientTransport, DetachedFetch, RecordingBeacon, RecordingCollector};
use common::{harness, harness_with, production_config, t0};
use std::sync::Arc;

// ── capture ──────────────────────────────────────────────────────────────

#[test]
fn capture_without_credential_returns_false_and_sends_nothing() {
    let mut config = production_config();
    config.client.api_key = None;
    let mut h = harness_with(config);
    assert!(!h.analytics.capture("post_created", properties! {}));
    assert!(h.beacon.requests().is_empty());
}

#[test]
fn capture_with_blank_credential_returns_false() {
    let mut config = production_config();
    config.client.api_key = Some("   ".into());
    let mut h = harness_with(config);
    assert!(!h.analytics.capture("post_created", properties! {}));
}

#[test]
fn capture_rejects_empty_event_name() {
    let mut h = harness();
    assert!(!h.analytics.capture("  ", properties! {}));
    assert!(h.beacon.requests().is_empty());
}

#[test]
fn capture_builds_full_request() {
    let mut h = harness();
    assert!(h.analytics.capture(
        "link_converted",
        properties! {
            "route" => "https://cassette.app/convert?url=secret#x",
            "platform" => "Apple Music",
            "description" => "my private note",
            "custom_field" => "dropped",
        },
    ));

    let requests = h.beacon.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.api_key, "phc_client");
    assert_eq!(req.event, "link_converted");
    assert!(req.distinct_id.starts_with("anon:"));
    assert!(req.timestamp.is_some());

    let p = &req.properties;
    assert_eq!(p["route"], PropertyValue::from("/convert"));
    assert_eq!(p["platform"], PropertyValue::from("apple"));
    assert_eq!(p["status"], PropertyValue::from("succeeded"));
    assert_eq!(p["success"], PropertyValue::Bool(true));
    assert_eq!(p["core_action"], PropertyValue::Bool(true));
    assert_eq!(p["$lib"], PropertyValue::from("cassette-web"));
    assert_eq!(p["internal_actor"], PropertyValue::Bool(false));
    assert!(p.contains_key("$lib_version"));
    assert!(p["$session_id"].as_str().unwrap().starts_with("sess_"));
    assert!(!p.contains_key("description"));
    assert!(!p.contains_key("custom_field"));
}

#[test]
fn caller_cannot_inject_system_properties() {
    let mut h = harness();
    h.analytics.capture(
        "post_shared",
        properties! { "$lib" => "spoofed", "$session_id" => "sess_fake", "alias" => "x" },
    );
    let p = &h.beacon.requests()[0].properties;
    assert_eq!(p["$lib"], PropertyValue::from("cassette-web"));
    assert_ne!(p["$session_id"], PropertyValue::from("sess_fake"));
    assert!(!p.contains_key("alias"));
}

#[test]
fn context_is_merged_beneath_event_properties() {
    let mut h = harness();
    h.analytics
        .set_context(properties! { "surface" => "feed", "plan" => "pro" });
    h.analytics
        .capture("share_sheet_opened", properties! { "surface" => "post" });
    let p = &h.beacon.requests()[0].properties;
    assert_eq!(p["surface"], PropertyValue::from("post"));
    assert_eq!(p["plan"], PropertyValue::from("pro"));
}

#[test]
fn internal_route_is_suppressed_for_internal_staff_too() {
    let mut h = harness();
    h.analytics
        .set_context(properties! { "account_type" => "cassette_team" });
    assert!(!h.analytics.capture("admin_opened", properties! { "route" => "/admin/users" }));
    assert!(h.beacon.requests().is_empty());
}

#[test]
fn suppression_uses_context_route_when_event_has_none() {
    let mut h = harness();
    h.analytics.set_context(properties! { "route" => "/internal/tools" });
    assert!(!h.analytics.capture("tool_used", properties! {}));
}

#[test]
fn development_requires_opt_in() {
    let mut config = production_config();
    config.environment = Environment::Development;
    let mut h = harness_with(config);

    assert!(!h.analytics.capture("post_created", properties! {}));
    assert!(h.analytics.capture(
        "post_created",
        properties! { "analytics_allow_in_dev" => true, "route" => "/home" },
    ));
    let p = &h.beacon.requests()[0].properties;
    assert!(!p.contains_key("analytics_allow_in_dev"));
}

#[test]
fn environment_opt_in_enables_development_capture() {
    let mut config = production_config();
    config.environment = Environment::Development;
    config.allow_in_dev = true;
    let mut h = harness_with(config);
    assert!(h.analytics.capture("post_created", properties! {}));
}

#[test]
fn internal_actor_follows_account_type() {
    let mut h = harness();
    h.analytics.capture("post_created", properties! { "account_type" => 2 });
    let p = &h.beacon.requests()[0].properties;
    assert_eq!(p["internal_actor"], PropertyValue::Bool(true));
    assert_eq!(p["account_type"], PropertyValue::from("cassette_team"));
}

#[test]
fn transport_refusal_reduces_to_false() {
    let mut h = harness();
    h.beacon.set_refusing(true);
    assert!(!h.analytics.capture("post_created", properties! {}));
}

// ── identify ─────────────────────────────────────────────────────────────

#[test]
fn identify_twice_emits_one_alias_and_two_identifies() {
    let mut h = harness();
    let anon = h.analytics.resolver_mut().anonymous_id();

    assert!(h.analytics.identify("user-42", properties! {}));
    assert!(h.analytics.identify("user-42", properties! {}));

    assert_eq!(
        h.beacon.events(),
        vec!["$create_alias", "$identify", "$identify"]
    );
    let requests = h.beacon.requests();
    assert_eq!(requests[0].distinct_id, "user-42");
    assert_eq!(requests[0].properties["alias"], PropertyValue::from(anon.as_str()));
    assert_eq!(
        requests[1].properties["$anon_distinct_id"],
        PropertyValue::from(anon.as_str())
    );
    assert_eq!(h.durable.keys_with_prefix(ALIAS_GUARD_PREFIX).len(), 1);
}

#[test]
fn identify_guard_survives_reload() {
    let mut h = harness();
    h.analytics.identify("user-42", properties! {});

    let beacon = Arc::new(RecordingBeacon::new());
    let config = production_config();
    let resolver = IdentityResolver::with_stores(
        h.durable.clone(),
        Arc::new(MemoryStore::new()),
        &config.session,
    );
    let mut reloaded = Analytics::new(
        config,
        resolver,
        ClientTransport::with_beacon(beacon.clone()),
        Arc::new(ManualClock::new(t0())),
    );
    reloaded.identify("user-42", properties! {});
    assert_eq!(beacon.events(), vec!["$identify"]);
}

#[test]
fn identify_with_matching_anonymous_id_never_aliases() {
    let mut h = harness();
    h.durable.set(DISTINCT_ID_KEY, "user-42").unwrap();
    assert!(h.analytics.identify("user-42", properties! {}));
    assert_eq!(h.beacon.events(), vec!["$identify"]);
}

#[test]
fn identify_rejects_empty_user_id() {
    let mut h = harness();
    assert!(!h.analytics.identify(" ", properties! {}));
    assert!(h.beacon.requests().is_empty());
}

#[test]
fn refused_alias_is_retried_on_next_identify() {
    let mut h = harness();
    h.beacon.set_refusing(true);
    assert!(!h.analytics.identify("user-42", properties! {}));

    h.beacon.set_refusing(false);
    h.analytics.identify("user-42", properties! {});
    assert_eq!(h.beacon.events(), vec!["$create_alias", "$identify"]);
}

#[test]
fn identify_updates_context_and_attribution() {
    let mut h = harness();
    h.analytics.identify(
        "user-42",
        properties! { "account_type" => "Cassette Team", "org_id" => "org_9", "role" => "editor" },
    );

    let ctx = h.analytics.context();
    assert_eq!(ctx.get("user_id"), Some(&PropertyValue::from("user-42")));
    assert_eq!(ctx.get("is_authenticated"), Some(&PropertyValue::Bool(true)));
    assert_eq!(ctx.get("account_type"), Some(&PropertyValue::from("cassette_team")));
    assert_eq!(ctx.get("internal_actor"), Some(&PropertyValue::Bool(true)));
    assert_eq!(ctx.get("org_id"), Some(&PropertyValue::from("org_9")));
    assert_eq!(ctx.get("role"), Some(&PropertyValue::from("editor")));

    h.beacon.clear();
    h.analytics.capture("post_created", properties! {});
    assert_eq!(h.beacon.requests()[0].distinct_id, "user-42");
}

#[test]
fn identify_without_credential_still_updates_context() {
    let mut h = harness_with(AnalyticsConfig {
        environment: Environment::Production,
        ..AnalyticsConfig::default()
    });
    assert!(!h.analytics.identify("user-42", properties! {}));
    assert_eq!(
        h.analytics.context().get("user_id"),
        Some(&PropertyValue::from("user-42"))
    );
    assert!(h.durable.keys_with_prefix(ALIAS_GUARD_PREFIX).is_empty());
}

// ── referrer & reset ─────────────────────────────────────────────────────

#[test]
fn referrer_domain_is_canonicalized() {
    let mut h = harness();
    assert!(h.analytics.set_referrer("https://User:pw@Open.Spotify.com:443/track/1?si=x"));
    assert_eq!(
        h.analytics.context().get("referrer_domain"),
        Some(&PropertyValue::from("open.spotify.com"))
    );
    assert!(!h.analytics.set_referrer("   "));
}

#[test]
fn reset_clears_in_memory_state_only() {
    let mut h = harness();
    let anon = h.analytics.resolver_mut().anonymous_id();
    h.analytics.identify("user-42", properties! {});
    h.analytics.track_pageview("/home");
    h.analytics.reset();

    assert!(h.analytics.context().is_empty());
    assert_eq!(h.analytics.resolver_mut().anonymous_id(), anon);
    assert_eq!(h.analytics.distinct_id(), anon);

    h.beacon.clear();
    assert!(h.analytics.track_pageview("/home"));
    assert_eq!(h.beacon.events(), vec!["$pageview"]);
}

#[test]
fn capture_is_refused_when_every_delivery_path_is_full() {
    let config = production_config();
    let beacon = Arc::new(RecordingBeacon::refusing());
    let collector = Arc::new(RecordingCollector::new());
    let resolver = IdentityResolver::with_stores(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
        &config.session,
    );
    let mut analytics = Analytics::new(
        config,
        resolver,
        ClientTransport::new(Some(beacon.clone()), Some(DetachedFetch::new(collector, 0))),
        Arc::new(ManualClock::new(t0())),
    );

    assert!(!analytics.capture("post_created", properties! {}));
    beacon.set_refusing(false);
    assert!(analytics.capture("post_created", properties! {}));
    assert_eq!(beacon.events(), vec!["post_created"]);
}

#[test]
fn from_config_with_unusable_host_disables_delivery() {
    let mut config = production_config();
    config.client.host = "ftp://collector.test".to_string();
    let mut analytics = Analytics::from_config(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
    );
    assert!(!analytics.capture("post_created", properties! {}));
    assert!(analytics.set_context(properties! { "plan" => "pro" }));
}
