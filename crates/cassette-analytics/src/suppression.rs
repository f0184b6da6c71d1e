//! Suppression Policy: drop events before any pipeline work.

use cassette_core::config::{AnalyticsConfig, Environment};
use cassette_core::models::AccountType;
use cassette_privacy::canonical::canonicalize_route;

/// Route prefixes that never produce analytics.
pub const INTERNAL_ROUTE_PREFIXES: &[&str] = &["/admin", "/internal", "/demo", "/playground"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionReason {
    InternalRoute,
    /// Outside production without an opt-in.
    NonProduction,
}

impl SuppressionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InternalRoute => "internal_route",
            Self::NonProduction => "non_production",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressionPolicy {
    environment: Environment,
    env_opt_in: bool,
}

impl SuppressionPolicy {
    pub fn new(environment: Environment, env_opt_in: bool) -> Self {
        Self {
            environment,
            env_opt_in,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.environment, config.allow_in_dev)
    }

    /// Account type is accepted for call-site symmetry and never changes
    /// the outcome.
    pub fn should_suppress(
        &self,
        route: Option<&str>,
        _account_type: AccountType,
        allow_in_dev: Option<bool>,
    ) -> bool {
        self.reason(route, allow_in_dev).is_some()
    }

    pub fn reason(
        &self,
        route: Option<&str>,
        allow_in_dev: Option<bool>,
    ) -> Option<SuppressionReason> {
        if route.is_some_and(is_internal_route) {
            return Some(SuppressionReason::InternalRoute);
        }
        if self.environment.is_production() {
            return None;
        }
        let allowed = allow_in_dev.unwrap_or(self.env_opt_in);
        (!allowed).then_some(SuppressionReason::NonProduction)
    }
}

/// Whether the route's path equals or nests under an internal prefix.
/// Matching is case-insensitive.
pub fn is_internal_route(route: &str) -> bool {
    let Some(path) = canonicalize_route(route) else {
        return false;
    };
    let path = path.to_ascii_lowercase();
    INTERNAL_ROUTE_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
