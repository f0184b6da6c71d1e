//! Shared Context: the ambient property overlay.

use cassette_core::models::{Properties, PropertyValue};

/// Ambient properties merged beneath every event. Last write wins;
/// writing `Null` clears a key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextStore {
    values: Properties,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, updates: Properties) {
        for (key, value) in updates {
            self.set_value(key, value);
        }
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: PropertyValue) {
        let key = key.into();
        if value.is_null() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn snapshot(&self) -> Properties {
        self.values.clone()
    }

    /// Context beneath `overrides`; overriding keys win.
    pub fn merged_with(&self, overrides: Properties) -> Properties {
        let mut merged = self.values.clone();
        merged.extend(overrides);
        merged
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
