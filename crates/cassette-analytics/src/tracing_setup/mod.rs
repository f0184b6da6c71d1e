//! Tracing initialization for hosts embedding the pipeline.

pub mod spans;

use std::sync::Once;

use cassette_core::config::{env_vars, ObservabilityConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

const FALLBACK_FILTER: &str = "cassette=info";

/// Initialize tracing from `CASSETTE_LOG`, falling back to `cassette=info`
/// when it is unset or invalid. Idempotent.
pub fn init_tracing() {
    init_tracing_with(&ObservabilityConfig::default());
}

/// Initialize tracing with the configured default level and format.
/// `CASSETTE_LOG` still wins when set.
pub fn init_tracing_with(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(env_vars::LOG).unwrap_or_else(|_| {
            EnvFilter::try_new(default_directive(&config.log_level))
                .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
        });

        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.json {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_thread_ids(true))
                .try_init()
        };
        // Another subscriber already installed by the host is fine.
        let _ = result;
    });
}

/// Scope a bare level to the cassette crates.
fn default_directive(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        FALLBACK_FILTER.to_string()
    } else if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("cassette={level}")
    }
}
