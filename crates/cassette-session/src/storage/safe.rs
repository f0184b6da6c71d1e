use std::fmt;
use std::sync::Arc;

use cassette_core::errors::error_code::CassetteErrorCode;
use cassette_core::traits::KeyValueStore;
use tracing::warn;

/// Outcome of a read through [`SafeStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    Missing,
    /// The backing store failed or does not exist.
    Unavailable,
}

impl Lookup {
    pub fn found(self) -> Option<String> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing | Self::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Store wrapper that never propagates failures. Errors are logged with
/// their code and surface as [`Lookup::Unavailable`] or `false`.
#[derive(Clone)]
pub struct SafeStorage {
    inner: Option<Arc<dyn KeyValueStore>>,
    label: &'static str,
}

impl SafeStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, label: &'static str) -> Self {
        Self {
            inner: Some(store),
            label,
        }
    }

    /// No backing store at all. Every read is `Unavailable`.
    pub fn absent(label: &'static str) -> Self {
        Self { inner: None, label }
    }

    pub fn has_backing(&self) -> bool {
        self.inner.is_some()
    }

    pub fn lookup(&self, key: &str) -> Lookup {
        let Some(store) = &self.inner else {
            return Lookup::Unavailable;
        };
        match store.get(key) {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::Missing,
            Err(e) => {
                warn!(
                    store = self.label,
                    key,
                    code = e.error_code(),
                    error = %e,
                    "storage read failed"
                );
                Lookup::Unavailable
            }
        }
    }

    /// Returns whether the value was persisted.
    pub fn set(&self, key: &str, value: &str) -> bool {
        let Some(store) = &self.inner else {
            return false;
        };
        match store.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    store = self.label,
                    key,
                    code = e.error_code(),
                    error = %e,
                    "storage write failed"
                );
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        let Some(store) = &self.inner else {
            return false;
        };
        match store.remove(key) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    store = self.label,
                    key,
                    code = e.error_code(),
                    error = %e,
                    "storage remove failed"
                );
                false
            }
        }
    }
}

impl fmt::Debug for SafeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeStorage")
            .field("label", &self.label)
            .field("has_backing", &self.has_backing())
            .finish()
    }
}
