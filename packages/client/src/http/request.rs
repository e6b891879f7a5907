//! Request descriptors and stream issuance
//!
//! A descriptor is partial: whatever it leaves out is filled from the
//! defaults (`GET /`, no body). Issuing it opens one stream on the session,
//! writes the optional body, half-closes and waits for response headers.

use bytes::Bytes;

use super::body::ResponseBody;
use super::headers::RequestHeaders;
use super::response::Response;
use crate::config::timeouts::timeout_config::with_deadline;
use crate::config::{Merge, SessionOptions};
use crate::connect::connection::Connection;
use crate::error::{self, Result};

/// Headers and an optional payload for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub headers: RequestHeaders,
    pub body: Option<Bytes>,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `GET /` without a body
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            headers: RequestHeaders::defaults(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Headers merge key by key, a body in the overlay replaces the base body.
impl Merge for RequestDescriptor {
    fn merge_over(self, base: Self) -> Self {
        Self {
            headers: self.headers.merge_over(base.headers),
            body: self.body.merge_over(base.body),
        }
    }
}

/// Open a stream for `descriptor` and resolve on its response headers.
pub(crate) async fn send(
    connection: &Connection,
    options: &SessionOptions,
    descriptor: RequestDescriptor,
) -> Result<Response> {
    let descriptor = descriptor.merge_over(RequestDescriptor::defaults());
    let address = connection.target().url().clone();

    let request = descriptor
        .headers
        .to_request(connection.target(), options.authority.as_deref())
        .map_err(|e| e.with_address(address.clone()))?;
    let sender = connection.sender()?;

    tracing::debug!("{} {}", request.method(), request.uri());

    let exchange = async move {
        let mut sender = sender.ready().await.map_err(error::stream)?;

        let end_of_stream = descriptor.body.is_none();
        let (response, mut send_stream) = sender
            .send_request(request, end_of_stream)
            .map_err(error::stream)?;

        if let Some(body) = descriptor.body {
            tracing::trace!("Writing request body of {} bytes", body.len());
            send_stream.send_data(body, true).map_err(error::stream)?;
        }

        let response = response.await.map_err(error::stream)?;
        let (parts, recv) = response.into_parts();
        tracing::debug!("Response headers received: {}", parts.status);

        let body = ResponseBody::spawn(recv, send_stream, options.max_body_size);
        Ok(Response::new(
            parts.status,
            &parts.headers,
            body,
            options.max_body_size,
        ))
    };

    with_deadline(options.timeouts.response, exchange)
        .await
        .map_err(|e| e.with_address(address))
}
