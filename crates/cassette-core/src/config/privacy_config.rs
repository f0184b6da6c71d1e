use serde::{Deserialize, Serialize};

use super::defaults;

/// Sanitizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Strings longer than this many characters are truncated.
    pub max_string_len: usize,
    /// Keys allowed in addition to the built-in allow-list. Forbidden
    /// patterns still apply to them.
    pub extra_allowed_keys: Vec<String>,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            max_string_len: defaults::DEFAULT_MAX_STRING_LEN,
            extra_allowed_keys: Vec::new(),
        }
    }
}
