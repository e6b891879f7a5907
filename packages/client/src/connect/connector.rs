//! `create_session`: address + options → open [`Session`]

use crate::bridge::Lifecycle;
use crate::config::timeouts::timeout_config::with_deadline;
use crate::config::{SessionOptions, Validator};
use crate::error::{self, Result};
use crate::session::Session;

use super::address::Target;
use super::connection::Connection;

/// Establish a session with `address` (`http://` or `https://`).
///
/// Resolves once the HTTP/2 preface has been exchanged. Failures after that
/// point are reported by the session's `request` and `close`.
///
/// # Errors
///
/// - `Builder` for an invalid address or invalid options
/// - `Connect` if TCP, TLS or the HTTP/2 handshake fails
/// - `Timeout` if `options.timeouts.connect` elapses first
pub async fn create_session(address: impl AsRef<str>, options: SessionOptions) -> Result<Session> {
    options.validate()?;
    let target = Target::parse(address.as_ref())?;
    let url = target.url().clone();

    let connection = Connection::connect(target, &options).map_err(|e| e.with_address(url.clone()))?;
    let listener = connection.listen("connect");

    let established = with_deadline(
        options.timeouts.connect,
        listener.settle(|state| match state {
            Lifecycle::Open => Some(Ok(())),
            Lifecycle::Failed(cause) => Some(Err(error::connect(cause.clone()))),
            Lifecycle::Closing | Lifecycle::Closed => {
                Some(Err(error::connect("connection closed during establishment")))
            }
            Lifecycle::Connecting => None,
        }),
    )
    .await;

    match established {
        Ok(()) => Ok(Session::new(connection, options)),
        Err(e) => {
            connection.abort();
            Err(e.with_address(url))
        }
    }
}
