//! One HTTP/2 connection and the task that drives it
//!
//! The driver owns the `h2` connection future. It publishes `Open` once the
//! preface completes, then `Closed` or `Failed` when the connection future
//! finishes. Graceful shutdown is requested by dropping the request sender:
//! `h2` then sends GOAWAY as soon as every in-flight stream has completed.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use bytes::Bytes;
use h2::client::SendRequest;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::address::{Scheme, Target};
use crate::bridge::{Failure, Lifecycle, LifecycleListener};
use crate::config::SessionOptions;
use crate::error::{self, Result};
use crate::tls::TlsManager;

pub(crate) struct Connection {
    target: Target,
    lifecycle: watch::Sender<Lifecycle>,
    sender: Mutex<Option<SendRequest<Bytes>>>,
    driver: OnceLock<AbortHandle>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("target", &self.target)
            .field("lifecycle", &*self.lifecycle.borrow())
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Start establishing a connection to `target` in the background.
    ///
    /// Returns immediately in the `Connecting` state; register a listener to
    /// learn the outcome.
    ///
    /// # Errors
    ///
    /// Returns a connect error if the TLS configuration cannot be built.
    pub(crate) fn connect(target: Target, options: &SessionOptions) -> Result<Arc<Self>> {
        let tls = match target.scheme() {
            Scheme::Https => Some(TlsManager::with_config(&options.tls)?),
            Scheme::Http => None,
        };

        let (lifecycle, _) = watch::channel(Lifecycle::Connecting);
        let connection = Arc::new(Self {
            target: target.clone(),
            lifecycle,
            sender: Mutex::new(None),
            driver: OnceLock::new(),
        });

        let builder = options.settings.client_builder();
        let driver = tokio::spawn(establish(
            Arc::downgrade(&connection),
            target,
            builder,
            tls,
        ));
        let _ = connection.driver.set(driver.abort_handle());

        Ok(connection)
    }

    pub(crate) fn target(&self) -> &Target {
        &self.target
    }

    pub(crate) fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.borrow().clone()
    }

    /// Register a lifecycle listener for `operation`
    pub(crate) fn listen(&self, operation: &'static str) -> LifecycleListener {
        LifecycleListener::new(self.lifecycle.subscribe(), operation)
    }

    /// Number of live lifecycle listeners
    pub(crate) fn listener_count(&self) -> usize {
        self.lifecycle.receiver_count()
    }

    /// A request handle, provided the connection is open.
    pub(crate) fn sender(&self) -> Result<SendRequest<Bytes>> {
        match self.lifecycle() {
            Lifecycle::Open => {}
            Lifecycle::Failed(cause) => return Err(error::stream(cause)),
            _ => return Err(error::session_closed()),
        }

        self.sender_slot()
            .as_ref()
            .cloned()
            .ok_or_else(error::session_closed)
    }

    /// Stop accepting requests and let the connection wind down.
    ///
    /// Idempotent: later calls find no sender and leave the state alone.
    pub(crate) fn shutdown(&self) {
        let sender = self.sender_slot().take();
        if sender.is_some() {
            self.lifecycle.send_if_modified(|state| {
                if matches!(state, Lifecycle::Open) {
                    *state = Lifecycle::Closing;
                    true
                } else {
                    false
                }
            });
            tracing::debug!("Graceful shutdown requested for {}", self.target.url());
        }
    }

    /// Stop the driver outright; used when establishment is abandoned.
    pub(crate) fn abort(&self) {
        self.sender_slot().take();
        if let Some(driver) = self.driver.get() {
            driver.abort();
        }
    }

    fn sender_slot(&self) -> MutexGuard<'_, Option<SendRequest<Bytes>>> {
        self.sender.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open(&self, sender: SendRequest<Bytes>) {
        *self.sender_slot() = Some(sender);
        self.lifecycle.send_replace(Lifecycle::Open);
        tracing::debug!("Session open to {}", self.target.url());
    }

    fn finish(&self, outcome: std::result::Result<(), Failure>) {
        self.sender_slot().take();
        match outcome {
            Ok(()) => {
                tracing::debug!("Session to {} closed", self.target.url());
                self.lifecycle.send_replace(Lifecycle::Closed);
            }
            Err(cause) => {
                tracing::debug!("Session to {} failed: {}", self.target.url(), cause);
                self.lifecycle.send_replace(Lifecycle::Failed(cause));
            }
        }
    }
}

async fn establish(
    connection: Weak<Connection>,
    target: Target,
    builder: h2::client::Builder,
    tls: Option<TlsManager>,
) {
    tracing::debug!(
        "Connecting to {}:{} ({})",
        target.connect_host(),
        target.port(),
        target.scheme().as_str()
    );

    let tcp_stream = match TcpStream::connect((target.connect_host(), target.port())).await {
        Ok(stream) => stream,
        Err(e) => return fail(&connection, Arc::new(e)),
    };
    if let Err(e) = tcp_stream.set_nodelay(true) {
        tracing::debug!("Failed to set TCP_NODELAY: {}", e);
    }

    match tls {
        Some(tls) => match tls.connect(target.connect_host(), tcp_stream).await {
            Ok(tls_stream) => drive(connection, builder, tls_stream).await,
            Err(e) => fail(&connection, Arc::new(e)),
        },
        None => drive(connection, builder, tcp_stream).await,
    }
}

async fn drive<T>(connection: Weak<Connection>, builder: h2::client::Builder, io: T)
where
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (sender, h2_connection) = match builder.handshake::<T, Bytes>(io).await {
        Ok(pair) => pair,
        Err(e) => return fail(&connection, Arc::new(e)),
    };

    // Nobody is waiting any more: dropping the sender closes the connection.
    let Some(handle) = connection.upgrade() else {
        return;
    };
    handle.open(sender);
    drop(handle);

    let outcome = h2_connection.await.map_err(|e| Arc::new(e) as Failure);

    if let Some(handle) = connection.upgrade() {
        handle.finish(outcome);
    }
}

fn fail(connection: &Weak<Connection>, cause: Failure) {
    if let Some(handle) = connection.upgrade() {
        handle.finish(Err(cause));
    }
}
