use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `h2fetch_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while connecting, exchanging a request
/// or reading a response body.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub address: Option<url::Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Invalid address or options
    Builder,
    /// Transport failure before or during connection establishment
    Connect,
    /// Failure on an individual request stream
    Stream,
    /// Buffered body grew past the configured limit
    LengthExceeded { limit: usize },
    /// Failure during graceful session shutdown
    Close,
    /// Body could not be decoded as UTF-8 text or JSON
    Decode,
    /// Request issued on a session that is not open
    SessionClosed,
    /// Body accessor called after the body was already taken
    BodyConsumed,
    /// A configured deadline elapsed
    Timeout,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                address: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: url::Url) -> Self {
        self.inner.address = Some(address);
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// Get the address associated with this error, if any
    #[must_use]
    pub fn address(&self) -> Option<&url::Url> {
        self.inner.address.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("h2fetch::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref address) = self.inner.address {
            f.field("address", address);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Builder => f.write_str("invalid address or options")?,
            Kind::Connect => f.write_str("error establishing session")?,
            Kind::Stream => f.write_str("request stream error")?,
            Kind::LengthExceeded { limit } => write!(f, "data length exceeded {limit} bytes")?,
            Kind::Close => f.write_str("error closing session")?,
            Kind::Decode => f.write_str("error decoding response body")?,
            Kind::SessionClosed => f.write_str("session is not open")?,
            Kind::BodyConsumed => f.write_str("response body already consumed")?,
            Kind::Timeout => f.write_str("operation timed out")?,
        }

        if let Some(ref address) = self.inner.address {
            write!(f, " for {address}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
