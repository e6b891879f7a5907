//! Session handle
//!
//! A `Session` owns exactly one connection. It hands out request streams while
//! the connection is open and performs the graceful close.

use std::sync::Arc;

use url::Url;

use crate::bridge::Lifecycle;
use crate::config::SessionOptions;
use crate::config::timeouts::timeout_config::with_deadline;
use crate::connect::connection::Connection;
use crate::error::{self, Result};
use crate::http::request::{self, RequestDescriptor};
use crate::http::response::Response;

/// Caller-visible lifecycle of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closing,
    Closed,
    Failed,
}

impl From<&Lifecycle> for SessionState {
    fn from(lifecycle: &Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Connecting => SessionState::Connecting,
            Lifecycle::Open => SessionState::Open,
            Lifecycle::Closing => SessionState::Closing,
            Lifecycle::Closed => SessionState::Closed,
            Lifecycle::Failed(_) => SessionState::Failed,
        }
    }
}

/// An established HTTP/2 session
#[derive(Debug)]
pub struct Session {
    connection: Arc<Connection>,
    options: SessionOptions,
}

impl Session {
    pub(crate) fn new(connection: Arc<Connection>, options: SessionOptions) -> Self {
        Self {
            connection,
            options,
        }
    }

    /// Issue one request and wait for its response headers.
    ///
    /// `descriptor` is merged over the defaults (`GET /`). The body, if any, is
    /// written and the request half closed before the response is awaited.
    /// Each call opens its own stream.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` once `close()` was called or the connection closed
    /// - `Stream` if the stream is reset or the connection fails before headers
    /// - `Builder` for headers that do not form a valid request
    /// - `Timeout` if the configured response deadline elapses
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<Response> {
        request::send(&self.connection, &self.options, descriptor).await
    }

    /// Gracefully shut the session down.
    ///
    /// No new requests are accepted once this is called. Streams already in
    /// flight run to completion; their bodies stay readable. Resolves once the
    /// connection has closed. Calling it again observes the same outcome.
    ///
    /// # Errors
    ///
    /// Returns a `Close` error if the connection fails instead of closing, or
    /// `Timeout` if the configured close deadline elapses.
    pub async fn close(&self) -> Result<()> {
        let listener = self.connection.listen("close");
        self.connection.shutdown();

        with_deadline(
            self.options.timeouts.close,
            listener.settle(|state| match state {
                Lifecycle::Closed => Some(Ok(())),
                Lifecycle::Failed(cause) => Some(Err(error::close(cause.clone()))),
                Lifecycle::Connecting | Lifecycle::Open | Lifecycle::Closing => None,
            }),
        )
        .await
        .map_err(|e| e.with_address(self.connection.target().url().clone()))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::from(&self.connection.lifecycle())
    }

    #[must_use]
    pub fn address(&self) -> &Url {
        self.connection.target().url()
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Live lifecycle listeners registered by pending `close()` calls
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.connection.listener_count()
    }
}
