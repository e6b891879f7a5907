//! TLS for `https://` sessions
//!
//! Builds a rustls client configuration that offers ALPN `h2` only and wraps
//! an established TCP stream.

pub mod errors;
pub(crate) mod tls_manager;

pub use errors::TlsError;
pub use tls_manager::{TlsConfig, TlsManager};
