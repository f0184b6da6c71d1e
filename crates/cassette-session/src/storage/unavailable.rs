use cassette_core::errors::StorageError;
use cassette_core::traits::KeyValueStore;

/// A store that refuses every operation: disabled storage, privacy mode,
/// or a context with no storage at all.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err(&self) -> StorageError {
        StorageError::Unavailable {
            reason: self.reason.clone(),
        }
    }
}

impl Default for UnavailableStore {
    fn default() -> Self {
        Self::new("storage disabled")
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(self.err())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(self.err())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(self.err())
    }
}
