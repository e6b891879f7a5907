//! Request and response header mappings
//!
//! Both mappings are keyed by lowercase header name and carry the HTTP/2
//! pseudo-headers (`:method`, `:path`, `:status`, ...) next to regular fields.

use std::collections::BTreeMap;

use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, Uri, Version};

use crate::config::Merge;
use crate::connect::Target;
use crate::constants::{
    DEFAULTS, HTTP2_HEADER_AUTHORITY, HTTP2_HEADER_METHOD, HTTP2_HEADER_PATH, HTTP2_HEADER_SCHEME,
    HTTP2_HEADER_STATUS,
};
use crate::error::{self, Result};

/// Outgoing header fields, pseudo-headers included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    fields: BTreeMap<String, String>,
}

impl RequestHeaders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `:method GET` and `:path /`
    #[must_use]
    pub fn defaults() -> Self {
        Self::new()
            .with(HTTP2_HEADER_METHOD, DEFAULTS.method)
            .with(HTTP2_HEADER_PATH, DEFAULTS.path)
    }

    /// Set `name` (case-insensitive) to `value`, replacing any previous value
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.fields
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    #[must_use]
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.get(HTTP2_HEADER_METHOD)
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.get(HTTP2_HEADER_PATH)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the `http::Request` handed to `h2`.
    ///
    /// The URI is absolute: `:scheme` and `:authority` default to the session
    /// target (or `authority_override`), `:path` to `/`.
    ///
    /// # Errors
    ///
    /// Returns a builder error for an invalid method, URI, header name or
    /// value, or an unknown pseudo-header.
    pub(crate) fn to_request(
        &self,
        target: &Target,
        authority_override: Option<&str>,
    ) -> Result<Request<()>> {
        let method = Method::from_bytes(self.method().unwrap_or(DEFAULTS.method).as_bytes())
            .map_err(error::builder)?;
        let path = self.path().unwrap_or(DEFAULTS.path);
        let scheme = self
            .get(HTTP2_HEADER_SCHEME)
            .unwrap_or(target.scheme().as_str());
        let authority = self
            .get(HTTP2_HEADER_AUTHORITY)
            .or(authority_override)
            .map_or_else(|| target.authority(), str::to_string);

        let uri = Uri::builder()
            .scheme(scheme)
            .authority(authority.as_str())
            .path_and_query(path)
            .build()
            .map_err(error::builder)?;

        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .version(Version::HTTP_2)
            .body(())
            .map_err(error::builder)?;

        let headers = request.headers_mut();
        for (name, value) in self.iter() {
            if name.starts_with(':') {
                match name {
                    HTTP2_HEADER_METHOD | HTTP2_HEADER_PATH | HTTP2_HEADER_SCHEME
                    | HTTP2_HEADER_AUTHORITY => continue,
                    other => {
                        return Err(error::builder(format!("unknown pseudo-header {other}")));
                    }
                }
            }
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(error::builder)?;
            let value = HeaderValue::from_str(value).map_err(error::builder)?;
            headers.append(name, value);
        }

        Ok(request)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RequestHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Key by key: every field present in the overlay replaces the base field,
/// fields only present in the base are kept.
impl Merge for RequestHeaders {
    fn merge_over(self, mut base: Self) -> Self {
        base.fields.extend(self.fields);
        base
    }
}

/// Received header fields, frozen at construction
///
/// Keys are unique: repeated fields are joined with `", "` in arrival order.
/// `:status` is included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeaders {
    fields: BTreeMap<String, String>,
}

impl ResponseHeaders {
    pub(crate) fn from_parts(status: StatusCode, headers: &HeaderMap) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(HTTP2_HEADER_STATUS.to_string(), status.as_str().to_string());

        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            fields
                .entry(name.as_str().to_string())
                .and_modify(|existing: &mut String| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }

        Self { fields }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target::parse("https://api.example.com:8443").unwrap()
    }

    #[test]
    fn names_are_case_insensitive() {
        let headers = RequestHeaders::new().with("Content-Type", "text/plain");
        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
    }

    #[test]
    fn caller_fields_win_and_default_fields_survive() {
        let caller = RequestHeaders::new()
            .with(":method", "POST")
            .with("x-trace", "abc");

        let merged = caller.merge_over(RequestHeaders::defaults());
        assert_eq!(merged.method(), Some("POST"));
        assert_eq!(merged.path(), Some("/"));
        assert_eq!(merged.get("x-trace"), Some("abc"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn request_uri_is_absolute() {
        let headers = RequestHeaders::defaults()
            .with(":path", "/v1/items?page=2")
            .with("accept", "application/json");
        let request = headers.to_request(&target(), None).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.uri().to_string(),
            "https://api.example.com:8443/v1/items?page=2"
        );
        assert_eq!(request.headers()["accept"], "application/json");
        assert!(request.headers().get(":path").is_none());
    }

    #[test]
    fn authority_header_beats_session_override() {
        let headers = RequestHeaders::defaults().with(":authority", "tenant.example.com");
        let request = headers
            .to_request(&target(), Some("override.example.com"))
            .unwrap();
        assert_eq!(request.uri().authority().unwrap(), "tenant.example.com");

        let request = RequestHeaders::defaults()
            .to_request(&target(), Some("override.example.com"))
            .unwrap();
        assert_eq!(request.uri().authority().unwrap(), "override.example.com");
    }

    #[test]
    fn unknown_pseudo_header_is_rejected() {
        let headers = RequestHeaders::defaults().with(":protocol", "websocket");
        assert!(headers.to_request(&target(), None).unwrap_err().is_builder());
    }

    #[test]
    fn invalid_method_is_rejected() {
        let headers = RequestHeaders::defaults().with(":method", "GE T");
        assert!(headers.to_request(&target(), None).unwrap_err().is_builder());
    }

    #[test]
    fn response_headers_join_repeated_fields() {
        let mut map = HeaderMap::new();
        map.append("vary", HeaderValue::from_static("accept"));
        map.append("vary", HeaderValue::from_static("origin"));
        map.insert("content-type", HeaderValue::from_static("application/json"));

        let headers = ResponseHeaders::from_parts(StatusCode::CREATED, &map);
        assert_eq!(headers.get(":status"), Some("201"));
        assert_eq!(headers.get("vary"), Some("accept, origin"));
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.len(), 3);
    }
}
