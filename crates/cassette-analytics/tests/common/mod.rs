#![allow(dead_code)]

use std::sync::Arc;

use cassette_analytics::Analytics;
use cassette_core::config::{AnalyticsConfig, CollectorConfig, Environment};
use cassette_core::traits::ManualClock;
use cassette_session::{IdentityResolver, MemoryStore};
use cassette_transport::{ClientTransport, RecordingBeacon};
use chrono::{DateTime, TimeZone, Utc};

pub struct Harness {
    pub analytics: Analytics,
    pub beacon: Arc<RecordingBeacon>,
    pub clock: Arc<ManualClock>,
    pub durable: Arc<MemoryStore>,
    pub volatile: Arc<MemoryStore>,
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap()
}

pub fn production_config() -> AnalyticsConfig {
    AnalyticsConfig {
        environment: Environment::Production,
        client: CollectorConfig::new("phc_client", "https://collector.test"),
        ..AnalyticsConfig::default()
    }
}

pub fn harness() -> Harness {
    harness_with(production_config())
}

pub fn harness_with(config: AnalyticsConfig) -> Harness {
    let durable = Arc::new(MemoryStore::new());
    let volatile = Arc::new(MemoryStore::new());
    let beacon = Arc::new(RecordingBeacon::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let resolver =
        IdentityResolver::with_stores(durable.clone(), volatile.clone(), &config.session);
    let analytics = Analytics::new(
        config,
        resolver,
        ClientTransport::with_beacon(beacon.clone()),
        clock.clone(),
    );
    Harness {
        analytics,
        beacon,
        clock,
        durable,
        volatile,
    }
}
