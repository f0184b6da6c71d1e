use super::error_code::{self, CassetteErrorCode};

/// Key/value storage errors. Callers degrade to ephemeral values.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage contents corrupt: {reason}")]
    Corrupt { reason: String },
}

impl CassetteErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::STORAGE_UNAVAILABLE,
            Self::Io { .. } => error_code::STORAGE_IO,
            Self::Corrupt { .. } => error_code::STORAGE_CORRUPT,
        }
    }
}
