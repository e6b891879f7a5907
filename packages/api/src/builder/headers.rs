//! Header management
//!
//! Names are case-insensitive; setting a header twice keeps the last value.
//! Pseudo-headers (`:method`, `:path`, `:authority`, `:scheme`) go through
//! the same map.

use h2fetch_client::constants::{HTTP2_HEADER_METHOD, HTTP2_HEADER_PATH};

use crate::builder::core::{ContentType, FetchBuilder};

/// Value for [`FetchBuilder::accept`]: a known content type or any string
#[derive(Debug, Clone)]
pub enum AcceptValue {
    String(String),
    ContentType(ContentType),
}

impl AcceptValue {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AcceptValue::String(s) => s,
            AcceptValue::ContentType(ct) => ct.as_str(),
        }
    }
}

impl From<&str> for AcceptValue {
    fn from(s: &str) -> Self {
        AcceptValue::String(s.to_string())
    }
}

impl From<String> for AcceptValue {
    fn from(s: String) -> Self {
        AcceptValue::String(s)
    }
}

impl From<ContentType> for AcceptValue {
    fn from(ct: ContentType) -> Self {
        AcceptValue::ContentType(ct)
    }
}

impl<S> FetchBuilder<S> {
    /// Set one header, replacing any earlier value for the same name
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name, value);
        self
    }

    /// Set several headers at once
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.options.headers.insert(name, value);
        }
        self
    }

    /// Request method, e.g. `"POST"`
    #[must_use]
    pub fn method(self, method: impl Into<String>) -> Self {
        self.header(HTTP2_HEADER_METHOD, method)
    }

    /// Request path including any query, e.g. `"/items?page=2"`
    #[must_use]
    pub fn path(self, path: impl Into<String>) -> Self {
        self.header(HTTP2_HEADER_PATH, path)
    }

    #[must_use]
    pub fn accept(self, accept: impl Into<AcceptValue>) -> Self {
        let accept = accept.into();
        self.header("accept", accept.as_str())
    }

    /// `authorization: Bearer <token>`
    #[must_use]
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    #[must_use]
    pub fn api_key(self, key: &str) -> Self {
        self.header("x-api-key", key)
    }
}
