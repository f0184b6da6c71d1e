use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::CAPTURE_PATH;

/// Credential and host for one collector audience (client-exposed or server-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Project API key. Blank counts as unset.
    pub api_key: Option<String>,
    /// Collector base URL.
    pub host: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: defaults::DEFAULT_COLLECTOR_HOST.to_string(),
        }
    }
}

impl CollectorConfig {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Self {
        let mut config = Self {
            api_key: Some(api_key.into()),
            host: host.into(),
        };
        if config.host.trim().is_empty() {
            config.host = defaults::DEFAULT_COLLECTOR_HOST.to_string();
        }
        config
    }

    /// The API key, if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Full capture endpoint, `<host>/capture/`.
    pub fn capture_url(&self) -> String {
        let host = self.host.trim();
        let host = if host.is_empty() {
            defaults::DEFAULT_COLLECTOR_HOST
        } else {
            host
        };
        format!("{}{}", host.trim_end_matches('/'), CAPTURE_PATH)
    }
}
