//! TLS connection manager

use std::io::BufReader;
use std::sync::Arc;

use rustls::{ClientConfig, RootCertStore};
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use super::errors::TlsError;
use crate::constants::ALPN_H2;

/// Root store selection for `https://` sessions
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Load the operating system's trust store
    pub use_system_certs: bool,
    /// Add the bundled Mozilla roots (also used as a fallback when the system
    /// store cannot be loaded)
    pub use_webpki_roots: bool,
    /// Extra PEM-encoded roots, e.g. a private CA
    pub custom_root_certs: Vec<String>,
    /// Server name for SNI and certificate checks, when it differs from the host
    pub server_name: Option<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            use_system_certs: true,
            use_webpki_roots: true,
            custom_root_certs: Vec::new(),
            server_name: None,
        }
    }
}

impl TlsConfig {
    /// Trust only the given PEM roots
    #[must_use]
    pub fn with_only_roots(pem: impl Into<String>) -> Self {
        Self {
            use_system_certs: false,
            use_webpki_roots: false,
            custom_root_certs: vec![pem.into()],
            server_name: None,
        }
    }

    #[must_use]
    pub fn add_root_certificate(mut self, pem: impl Into<String>) -> Self {
        self.custom_root_certs.push(pem.into());
        self
    }

    #[must_use]
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = Some(name.into());
        self
    }
}

/// Wraps TCP streams in TLS using one prepared client configuration
#[derive(Clone)]
pub struct TlsManager {
    connector: TlsConnector,
    server_name: Option<String>,
}

impl std::fmt::Debug for TlsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsManager")
            .field("server_name", &self.server_name)
            .finish_non_exhaustive()
    }
}

impl TlsManager {
    /// Build the client configuration for `config`
    ///
    /// # Errors
    ///
    /// Returns `TlsError` if a custom root cannot be parsed or if no roots are
    /// left to trust.
    pub fn with_config(config: &TlsConfig) -> Result<Self, TlsError> {
        let client_config = create_client_config(config)?;
        Ok(Self {
            connector: TlsConnector::from(Arc::new(client_config)),
            server_name: config.server_name.clone(),
        })
    }

    /// Perform the TLS handshake over `tcp_stream` and check that `h2` was
    /// negotiated.
    ///
    /// # Errors
    ///
    /// Returns `TlsError` on an invalid server name, a failed handshake, or a
    /// server that selected another application protocol.
    pub async fn connect(
        &self,
        host: &str,
        tcp_stream: TcpStream,
    ) -> Result<TlsStream<TcpStream>, TlsError> {
        let name = self.server_name.as_deref().unwrap_or(host);
        let server_name = ServerName::try_from(name.to_string())
            .map_err(|_| TlsError::InvalidServerName(name.to_string()))?;

        tracing::debug!("Starting TLS handshake with {}", name);

        let tls_stream = self
            .connector
            .connect(server_name, tcp_stream)
            .await
            .map_err(|e| TlsError::Handshake(e.to_string()))?;

        let (_, session) = tls_stream.get_ref();
        match session.alpn_protocol() {
            Some(protocol) if protocol == ALPN_H2 => {}
            Some(other) => {
                return Err(TlsError::AlpnMismatch(
                    String::from_utf8_lossy(other).into_owned(),
                ));
            }
            None => return Err(TlsError::AlpnMismatch("no protocol".to_string())),
        }

        tracing::debug!("TLS established with {} (alpn h2)", name);
        Ok(tls_stream)
    }
}

fn create_client_config(config: &TlsConfig) -> Result<ClientConfig, TlsError> {
    let mut root_store = RootCertStore::empty();
    let mut need_webpki_fallback = false;

    if config.use_system_certs {
        let cert_result = rustls_native_certs::load_native_certs();
        for cert in cert_result.certs {
            if let Err(e) = root_store.add(cert) {
                tracing::warn!("Failed to add system certificate: {}", e);
            }
        }

        if !cert_result.errors.is_empty() {
            for err in &cert_result.errors {
                tracing::warn!("Certificate load error: {}", err);
            }
            need_webpki_fallback = true;
        }

        tracing::debug!("Loaded {} system certificates", root_store.len());
    }

    if config.use_webpki_roots || need_webpki_fallback {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    for cert_pem in &config.custom_root_certs {
        let mut reader = BufReader::new(cert_pem.as_bytes());
        for cert in rustls_pemfile::certs(&mut reader) {
            let cert = cert.map_err(|e| TlsError::CertificateParsing(e.to_string()))?;
            root_store
                .add(cert)
                .map_err(|e| TlsError::CertificateParsing(e.to_string()))?;
        }
    }

    if root_store.is_empty() {
        return Err(TlsError::EmptyRootStore);
    }

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut client_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| TlsError::Internal(e.to_string()))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    client_config.alpn_protocols = vec![ALPN_H2.to_vec()];

    Ok(client_config)
}
