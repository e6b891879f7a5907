//! Basic timeout configuration structures

use std::future::Future;
use std::time::Duration;

use crate::config::merge::Merge;
use crate::config::validation::{ConfigResult, ConfigValidator, Validator};
use crate::error::{self, Result};

/// Per-operation deadlines. `None` waits for as long as the transport does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Until the session is open (TCP, TLS and HTTP/2 preface)
    pub connect: Option<Duration>,
    /// Until response headers arrive
    pub response: Option<Duration>,
    /// Until a graceful close completes
    pub close: Option<Duration>,
}

impl TimeoutConfig {
    /// Apply the same deadline to every operation
    #[must_use]
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            connect: Some(timeout),
            response: Some(timeout),
            close: Some(timeout),
        }
    }

    #[must_use]
    pub fn with_connect(mut self, timeout: Duration) -> Self {
        self.connect = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_response(mut self, timeout: Duration) -> Self {
        self.response = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_close(mut self, timeout: Duration) -> Self {
        self.close = Some(timeout);
        self
    }
}

/// Each deadline set on the overlay replaces the base deadline.
impl Merge for TimeoutConfig {
    fn merge_over(self, base: Self) -> Self {
        Self {
            connect: self.connect.merge_over(base.connect),
            response: self.response.merge_over(base.response),
            close: self.close.merge_over(base.close),
        }
    }
}

impl Validator for TimeoutConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (timeout, name) in [
            (self.connect, "connect timeout"),
            (self.response, "response timeout"),
            (self.close, "close timeout"),
        ] {
            if let Some(timeout) = timeout {
                ConfigValidator::validate_timeout(timeout, name)?;
            }
        }
        Ok(())
    }
}

/// Await `future`, failing with a timeout error once `deadline` elapses.
///
/// The future is dropped on expiry, which runs its teardown.
pub(crate) async fn with_deadline<F, T>(deadline: Option<Duration>, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match deadline {
        Some(deadline) => tokio::time::timeout(deadline, future)
            .await
            .map_err(|_| error::timeout())?,
        None => future.await,
    }
}
