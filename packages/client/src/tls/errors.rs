//! TLS-specific error types for detailed error handling

use crate::error::{self, Error};

/// TLS-specific error types for detailed error handling
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("Certificate parsing failed: {0}")]
    CertificateParsing(String),
    #[error("No trusted root certificates available")]
    EmptyRootStore,
    #[error("Invalid server name '{0}'")]
    InvalidServerName(String),
    #[error("TLS handshake failed: {0}")]
    Handshake(String),
    #[error("Server did not negotiate h2 via ALPN (got {0})")]
    AlpnMismatch(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TlsError> for Error {
    fn from(err: TlsError) -> Self {
        error::connect(err)
    }
}
