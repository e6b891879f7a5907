//! Event-to-future bridging over a session lifecycle
//!
//! The connection driver publishes every lifecycle transition on a watch
//! channel. Each awaiting operation (connect, close) registers one
//! [`LifecycleListener`] up front and settles on the first terminal state it
//! cares about. The listener is detached by `Drop`, so teardown happens
//! exactly once on every exit path: settlement, error, deadline or the future
//! being dropped.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{self, Result};

/// Shared cause of a failed connection, observable by every listener
pub type Failure = Arc<dyn StdError + Send + Sync>;

/// Lifecycle of one connection as published by its driver
#[derive(Clone)]
pub enum Lifecycle {
    Connecting,
    Open,
    Closing,
    Closed,
    Failed(Failure),
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Connecting => f.write_str("Connecting"),
            Lifecycle::Open => f.write_str("Open"),
            Lifecycle::Closing => f.write_str("Closing"),
            Lifecycle::Closed => f.write_str("Closed"),
            Lifecycle::Failed(cause) => write!(f, "Failed({cause})"),
        }
    }
}

/// One registration on a connection lifecycle
pub(crate) struct LifecycleListener {
    rx: watch::Receiver<Lifecycle>,
    settled: bool,
    operation: &'static str,
}

impl LifecycleListener {
    pub(crate) fn new(rx: watch::Receiver<Lifecycle>, operation: &'static str) -> Self {
        Self {
            rx,
            settled: false,
            operation,
        }
    }

    /// Wait until `on_event` maps a published state to an outcome.
    ///
    /// `on_event` sees the current state first, then every later transition.
    /// Consuming `self` makes settlement single-shot.
    pub(crate) async fn settle<T, F>(mut self, mut on_event: F) -> Result<T>
    where
        F: FnMut(&Lifecycle) -> Option<Result<T>>,
    {
        let outcome = loop {
            let current = self.rx.borrow_and_update().clone();
            if let Some(outcome) = on_event(&current) {
                break outcome;
            }
            if self.rx.changed().await.is_err() {
                break Err(error::stream("connection driver went away"));
            }
        };

        self.settled = true;
        outcome
    }
}

impl Drop for LifecycleListener {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("{} listener detached before settlement", self.operation);
        }
    }
}
