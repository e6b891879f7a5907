//! Target address parsing

use url::Url;

use crate::config::ConfigDefaults;
use crate::error::{self, BadScheme, Result};

/// Transport selected by the address scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// HTTP/2 with prior knowledge over plain TCP
    Http,
    /// HTTP/2 over TLS, negotiated with ALPN
    Https,
}

impl Scheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => ConfigDefaults::DEFAULT_PORT_HTTP,
            Scheme::Https => ConfigDefaults::DEFAULT_PORT_HTTPS,
        }
    }
}

/// A parsed session target: where to connect and what `:authority` to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
    scheme: Scheme,
    host: String,
    port: u16,
}

impl Target {
    /// Parse an `http://` or `https://` address
    ///
    /// Only scheme, host and port are used; a path in the address is ignored,
    /// requests carry their own `:path`.
    ///
    /// # Errors
    ///
    /// Returns a builder error for unparsable addresses, unsupported schemes
    /// and addresses without a host.
    pub fn parse(address: &str) -> Result<Self> {
        let url = Url::parse(address).map_err(error::builder)?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            _ => return Err(error::builder(BadScheme).with_address(url)),
        };

        let Some(host) = url.host_str() else {
            return Err(error::builder("address has no host").with_address(url));
        };
        let host = host.to_string();
        let port = url.port().unwrap_or_else(|| scheme.default_port());

        Ok(Self {
            url,
            scheme,
            host,
            port,
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Host as written in the address (IPv6 literals keep their brackets)
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host suitable for name resolution and TLS server names
    #[must_use]
    pub fn connect_host(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host[:port]`, omitting the port when it is the scheme default
    #[must_use]
    pub fn authority(&self) -> String {
        if self.port == self.scheme.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
