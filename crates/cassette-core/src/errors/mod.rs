mod config_error;
pub mod error_code;
mod storage_error;
mod transport_error;

pub use config_error::ConfigError;
pub use error_code::CassetteErrorCode;
pub use storage_error::StorageError;
pub use transport_error::TransportError;

/// Error carried through the pipeline internals.
///
/// Never crosses a public entry point: the client and server pipelines reduce
/// it to a `false` return and a log line carrying its code.
#[derive(Debug, thiserror::Error)]
pub enum CassetteError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CassetteErrorCode for CassetteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type CassetteResult<T> = Result<T, CassetteError>;
