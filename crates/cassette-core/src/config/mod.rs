pub mod collector_config;
pub mod defaults;
pub mod observability_config;
pub mod privacy_config;
pub mod session_config;
pub mod transport_config;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use collector_config::CollectorConfig;
pub use observability_config::ObservabilityConfig;
pub use privacy_config::PrivacyConfig;
pub use session_config::SessionConfig;
pub use transport_config::TransportConfig;

use crate::errors::ConfigError;

/// Environment variable names read by [`AnalyticsConfig::from_env`].
pub mod env_vars {
    pub const CLIENT_KEY: &str = "CASSETTE_PUBLIC_ANALYTICS_KEY";
    pub const CLIENT_HOST: &str = "CASSETTE_PUBLIC_ANALYTICS_HOST";
    pub const SERVER_KEY: &str = "CASSETTE_ANALYTICS_KEY";
    pub const SERVER_HOST: &str = "CASSETTE_ANALYTICS_HOST";
    pub const ENVIRONMENT: &str = "CASSETTE_ENV";
    pub const ALLOW_IN_DEV: &str = "CASSETTE_ANALYTICS_IN_DEV";
    pub const LOG: &str = "CASSETTE_LOG";
}

/// Deployment environment the pipeline runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
    Test,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidValue {
                field: env_vars::ENVIRONMENT.to_string(),
                message: format!("unknown environment '{other}'"),
            }),
        }
    }
}

/// Top-level configuration for the client pipeline and the server mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub environment: Environment,
    /// Environment-level opt-in to send events outside production.
    pub allow_in_dev: bool,
    /// Client-exposed credential.
    pub client: CollectorConfig,
    /// Server-only credential.
    pub server: CollectorConfig,
    pub privacy: PrivacyConfig,
    pub session: SessionConfig,
    pub transport: TransportConfig,
    pub observability: ObservabilityConfig,
}

impl AnalyticsConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().merge_env(lookup)
    }

    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Reject values the pipeline cannot run with. A blank host falls back
    /// to the default and is accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, collector) in [("client.host", &self.client), ("server.host", &self.server)] {
            let host = collector.host.trim();
            if !host.is_empty() && !host.starts_with("https://") && !host.starts_with("http://") {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("'{host}' is not an http(s) URL"),
                });
            }
        }
        if self.transport.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "transport.request_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Overlay environment variables on top of this config. Blank values are
    /// ignored; an unrecognized `CASSETTE_ENV` keeps the current environment.
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(env_vars::CLIENT_KEY) {
            self.client.api_key = Some(key);
        }
        if let Some(host) = non_blank(env_vars::CLIENT_HOST) {
            self.client.host = host;
        }
        if let Some(key) = non_blank(env_vars::SERVER_KEY) {
            self.server.api_key = Some(key);
        }
        if let Some(host) = non_blank(env_vars::SERVER_HOST) {
            self.server.host = host;
        }
        if let Some(env) = non_blank(env_vars::ENVIRONMENT) {
            if let Ok(parsed) = env.parse() {
                self.environment = parsed;
            }
        }
        if let Some(flag) = non_blank(env_vars::ALLOW_IN_DEV) {
            self.allow_in_dev = parse_flag(&flag);
        }
        if let Some(level) = non_blank(env_vars::LOG) {
            self.observability.log_level = level;
        }
        self
    }
}

/// `1`, `true`, `yes`, `on` (any case) are truthy; everything else is not.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
