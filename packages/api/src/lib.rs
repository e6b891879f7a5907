//! # h2fetch
//!
//! One-call HTTP/2 requests: [`fetch`] opens a session, issues a single
//! request, closes the session gracefully and hands back the response, whose
//! body stays readable after the close.
//!
//! ```no_run
//! # async fn run() -> h2fetch::Result<()> {
//! let response = h2fetch::FetchBuilder::new()
//!     .path("/v1/items")
//!     .header("accept", "application/json")
//!     .send("https://api.example.com")
//!     .await?;
//!
//! if response.ok() {
//!     println!("{}", response.json().await?);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

use bytes::Bytes;

pub use builder::{AcceptValue, BodyNotSet, BodySet, ContentType, FetchBuilder};
pub use h2fetch_client::constants;
pub use h2fetch_client::{
    BodyEvent, Error, H2Settings, RequestDescriptor, RequestHeaders, Response, ResponseBody,
    ResponseHeaders, Result, Session, SessionOptions, SessionState, TimeoutConfig, TlsConfig,
    create_session,
};

/// Everything [`fetch`] needs beyond the address
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Options for the one-shot session
    pub session: SessionOptions,
    /// Merged over `:method GET` and `:path /`
    pub headers: RequestHeaders,
    pub body: Option<Bytes>,
}

/// Connect to `address`, issue one request, close the session and return
/// the response.
///
/// A failed close is logged and otherwise ignored: the response already
/// arrived and its body remains readable.
///
/// # Errors
///
/// Fails with whatever [`create_session`] or [`Session::request`] fails with.
pub async fn fetch(address: impl AsRef<str>, options: FetchOptions) -> Result<Response> {
    let FetchOptions {
        session,
        headers,
        body,
    } = options;

    let session = create_session(address, session).await?;
    let descriptor = RequestDescriptor { headers, body };

    let response = match session.request(descriptor).await {
        Ok(response) => response,
        Err(e) => {
            if let Err(close_error) = session.close().await {
                tracing::debug!("Session close after failed request: {}", close_error);
            }
            return Err(e);
        }
    };

    if let Err(e) = session.close().await {
        tracing::debug!("Ignoring session close failure: {}", e);
    }

    Ok(response)
}
