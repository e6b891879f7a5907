//! Core `FetchBuilder` structure and base functionality

use std::marker::PhantomData;
use std::time::Duration;

use h2fetch_client::{Error, Merge, SessionOptions, TimeoutConfig, TlsConfig};

use crate::FetchOptions;

/// Content types the builder knows how to label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    ApplicationJson,
    ApplicationOctetStream,
    TextPlain,
}

impl ContentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::TextPlain => "text/plain",
        }
    }
}

/// State marker indicating no body has been set
#[derive(Debug, Clone, Copy)]
pub struct BodyNotSet;

/// State marker indicating a body has been set
#[derive(Debug, Clone, Copy)]
pub struct BodySet;

/// Fluent front end for [`fetch`](crate::fetch)
///
/// A body can be attached once; the type parameter tracks whether it was.
#[derive(Debug)]
pub struct FetchBuilder<S = BodyNotSet> {
    pub(crate) options: FetchOptions,
    pub(crate) state: PhantomData<S>,
    /// First error hit while building, reported by `send`
    pub(crate) pending: Option<Error>,
    pub(crate) debug_enabled: bool,
}

impl FetchBuilder<BodyNotSet> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: FetchOptions::default(),
            state: PhantomData,
            pending: None,
            debug_enabled: false,
        }
    }

    /// Builder that sends and accepts JSON
    #[must_use]
    pub fn json() -> Self {
        Self::new()
            .accept(ContentType::ApplicationJson)
            .content_type(ContentType::ApplicationJson)
    }
}

impl Default for FetchBuilder<BodyNotSet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FetchBuilder<S> {
    /// Log the request and response status at `debug`
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Merge `session` over the options set so far: its TLS config replaces
    /// the current one, other fields only override what `session` sets.
    #[must_use]
    pub fn session(mut self, session: SessionOptions) -> Self {
        self.options.session = session.merge_over(self.options.session);
        self
    }

    #[must_use]
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.options.session.tls = tls;
        self
    }

    /// Cap buffered bodies at `max` bytes (`0` disables the cap)
    #[must_use]
    pub fn max_body_size(mut self, max: usize) -> Self {
        self.options.session.max_body_size = max;
        self
    }

    /// Apply `timeout` to connect, response headers and close
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.session.timeouts = TimeoutConfig::uniform(timeout);
        self
    }

    #[must_use]
    pub fn content_type(self, content_type: ContentType) -> Self {
        self.header("content-type", content_type.as_str())
    }

    /// The options assembled so far
    #[must_use]
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub(crate) fn transition<T>(self) -> FetchBuilder<T> {
        FetchBuilder {
            options: self.options,
            state: PhantomData,
            pending: self.pending,
            debug_enabled: self.debug_enabled,
        }
    }
}
