//! Received responses
//!
//! Status and headers are fixed when the response headers arrive. The body
//! is buffered lazily by exactly one of the text or JSON accessors; any later
//! accessor call fails with `BodyConsumed`.

use std::sync::{Mutex, PoisonError};

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::body::ResponseBody;
use super::headers::ResponseHeaders;
use super::reader;
use crate::error::{self, Result};

/// A response whose headers have arrived
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: ResponseHeaders,
    body: Mutex<Option<ResponseBody>>,
    max_body_size: usize,
}

impl Response {
    pub(crate) fn new(
        status: StatusCode,
        headers: &HeaderMap,
        body: ResponseBody,
        max_body_size: usize,
    ) -> Self {
        Self {
            status,
            headers: ResponseHeaders::from_parts(status, headers),
            body: Mutex::new(Some(body)),
            max_body_size,
        }
    }

    /// Numeric `:status`
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// `true` for statuses in `200..300`
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status.as_u16())
    }

    #[must_use]
    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    /// The body size cap used by [`text`](Self::text) and [`json`](Self::json)
    #[must_use]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Take the raw body event stream. Counts as consuming the body.
    ///
    /// # Errors
    ///
    /// `BodyConsumed` if the body was already taken.
    pub fn body(&self) -> Result<ResponseBody> {
        self.body
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(error::body_consumed)
    }

    /// Buffer the body as UTF-8 text under the session's size cap.
    ///
    /// # Errors
    ///
    /// See [`read_text`](reader::read_text); `BodyConsumed` on a second call.
    pub async fn text(&self) -> Result<String> {
        self.text_with_limit(self.max_body_size).await
    }

    /// Buffer the body as text with an explicit cap (`0` adds none).
    ///
    /// The session cap is enforced while the body is received, so this can
    /// only tighten it.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text).
    pub async fn text_with_limit(&self, max_size: usize) -> Result<String> {
        let body = self.body()?;
        reader::read_text(body, max_size).await
    }

    /// Buffer the body and parse it as JSON under the session's size cap.
    ///
    /// # Errors
    ///
    /// See [`read_json`](reader::read_json); `BodyConsumed` on a second call.
    pub async fn json(&self) -> Result<Value> {
        self.json_with_limit(self.max_body_size).await
    }

    /// Buffer and parse the body as JSON with an explicit cap.
    ///
    /// # Errors
    ///
    /// See [`json`](Self::json).
    pub async fn json_with_limit(&self, max_size: usize) -> Result<Value> {
        let body = self.body()?;
        reader::read_json(body, max_size).await
    }

    /// Buffer the body and deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// See [`json`](Self::json); `Decode` if the document does not match `T`.
    pub async fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.body()?;
        reader::read_json_as(body, self.max_body_size).await
    }
}
