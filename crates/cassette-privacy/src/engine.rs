use std::collections::HashSet;

use cassette_core::config::PrivacyConfig;
use cassette_core::models::{Properties, PropertyValue};

use crate::allow_list::{self, KeyKind};
use crate::canonical::{
    canonicalize_domain, canonicalize_element_type, canonicalize_platform, canonicalize_route,
    clean_text,
};
use crate::patterns;

/// Allow-list sanitizer for event properties.
///
/// A key survives only if it is allow-listed AND matches no forbidden
/// pattern. Surviving values are canonicalized by key kind, strings are
/// trimmed and capped, and nulls, empties, and non-finite numbers are
/// dropped. Sanitization is idempotent.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    allowed: HashSet<String>,
    max_string_len: usize,
}

/// Which keys were dropped and why. Holds keys only, never values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Not on the allow-list.
    pub unlisted: Vec<String>,
    /// Matched a forbidden pattern.
    pub forbidden: Vec<String>,
    /// Allowed key whose value was empty, null, non-finite, or unrecognized.
    pub empty_values: Vec<String>,
}

impl SanitizeReport {
    pub fn dropped_count(&self) -> usize {
        self.unlisted.len() + self.forbidden.len() + self.empty_values.len()
    }
}

impl Sanitizer {
    /// Sanitizer with the built-in allow-list and default string cap.
    pub fn new() -> Self {
        Self::from_config(&PrivacyConfig::default())
    }

    pub fn from_config(config: &PrivacyConfig) -> Self {
        let allowed = allow_list::default_allowed_keys()
            .map(str::to_string)
            .chain(config.extra_allowed_keys.iter().cloned())
            .collect();
        Self {
            allowed,
            max_string_len: config.max_string_len,
        }
    }

    /// Sanitizer with an explicit allow-list replacing the built-in one.
    /// Forbidden patterns still apply.
    pub fn with_allowed_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: keys.into_iter().map(Into::into).collect(),
            max_string_len: PrivacyConfig::default().max_string_len,
        }
    }

    pub fn max_string_len(&self) -> usize {
        self.max_string_len
    }

    /// Whether a key may leave the process.
    pub fn is_allowed(&self, key: &str) -> bool {
        self.allowed.contains(key) && !patterns::is_forbidden_key(key)
    }

    pub fn sanitize(&self, properties: &Properties) -> Properties {
        self.sanitize_with_report(properties).0
    }

    /// Sanitize and report which keys were dropped.
    pub fn sanitize_with_report(&self, properties: &Properties) -> (Properties, SanitizeReport) {
        let mut report = SanitizeReport::default();
        let mut clean = Properties::new();

        for (key, value) in properties {
            if patterns::is_forbidden_key(key) {
                report.forbidden.push(key.clone());
                continue;
            }
            if !self.allowed.contains(key) {
                report.unlisted.push(key.clone());
                continue;
            }
            match self.clean_value(allow_list::key_kind(key), value) {
                Some(v) => {
                    clean.insert(key.clone(), v);
                }
                None => report.empty_values.push(key.clone()),
            }
        }

        (clean, report)
    }

    fn clean_value(&self, kind: KeyKind, value: &PropertyValue) -> Option<PropertyValue> {
        if value.is_null() {
            return None;
        }
        match kind {
            KeyKind::Route => value
                .as_str()
                .and_then(canonicalize_route)
                .and_then(|route| self.text(&route)),
            KeyKind::Domain => value
                .as_str()
                .and_then(canonicalize_domain)
                .and_then(|host| self.text(&host)),
            KeyKind::Platform => Some(PropertyValue::Text(
                canonicalize_platform(value).as_str().to_string(),
            )),
            KeyKind::ElementType => canonicalize_element_type(value)
                .map(|element| PropertyValue::Text(element.as_str().to_string())),
            KeyKind::Plain => self.scalar(value),
        }
    }

    fn scalar(&self, value: &PropertyValue) -> Option<PropertyValue> {
        match value {
            PropertyValue::Null => None,
            PropertyValue::Bool(b) => Some(PropertyValue::Bool(*b)),
            PropertyValue::Integer(i) => Some(PropertyValue::Integer(*i)),
            PropertyValue::Number(n) if n.is_finite() => Some(PropertyValue::Number(*n)),
            PropertyValue::Number(_) => None,
            PropertyValue::Text(s) => self.text(s),
        }
    }

    fn text(&self, raw: &str) -> Option<PropertyValue> {
        clean_text(raw, self.max_string_len).map(PropertyValue::Text)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}
