//! Stable error codes for structured log fields.

/// Every error enum implements this to expose a stable code string.
pub trait CassetteErrorCode {
    /// Returns the code string (e.g., "STORAGE_UNAVAILABLE").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const STORAGE_IO: &str = "STORAGE_IO";
pub const STORAGE_CORRUPT: &str = "STORAGE_CORRUPT";
pub const MISSING_CREDENTIAL: &str = "MISSING_CREDENTIAL";
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
pub const HTTP_STATUS: &str = "HTTP_STATUS";
pub const QUEUE_REJECTED: &str = "QUEUE_REJECTED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
