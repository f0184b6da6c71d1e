use super::error_code::{self, CassetteErrorCode};

/// Delivery errors. Always reduced to `false` at the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no collector credential configured")]
    MissingCredential,

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("collector responded with HTTP {status}")]
    Status { status: u16 },

    #[error("delivery queue rejected the event: {reason}")]
    QueueRejected { reason: String },

    #[error("request serialization failed: {reason}")]
    Serialization { reason: String },
}

impl CassetteErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCredential => error_code::MISSING_CREDENTIAL,
            Self::Network { .. } => error_code::NETWORK_ERROR,
            Self::Status { .. } => error_code::HTTP_STATUS,
            Self::QueueRejected { .. } => error_code::QUEUE_REJECTED,
            Self::Serialization { .. } => error_code::SERIALIZATION_ERROR,
        }
    }
}
