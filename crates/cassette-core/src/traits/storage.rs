use crate::errors::StorageError;

/// String key/value storage capability.
///
/// Two flavours back the pipeline: a durable store (anonymous id, alias
/// guards) and a volatile per-tab store (session). Implementations report
/// failures honestly; degrading to ephemeral values is the caller's job.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
