//! Request body handling

use bytes::Bytes;
use serde::Serialize;

use crate::builder::core::{BodyNotSet, BodySet, ContentType, FetchBuilder};

impl FetchBuilder<BodyNotSet> {
    /// Attach raw bytes, labelled `application/octet-stream` unless a content
    /// type is set
    #[must_use]
    pub fn body(self, body: impl Into<Bytes>) -> FetchBuilder<BodySet> {
        self.default_content_type(ContentType::ApplicationOctetStream)
            .attach(body.into())
    }

    fn attach(mut self, body: Bytes) -> FetchBuilder<BodySet> {
        if self.debug_enabled {
            tracing::debug!("Request body set ({} bytes)", body.len());
        }
        self.options.body = Some(body);
        self.transition()
    }

    /// Attach UTF-8 text, labelled `text/plain` unless a content type is set
    #[must_use]
    pub fn text_body(self, text: &str) -> FetchBuilder<BodySet> {
        self.default_content_type(ContentType::TextPlain)
            .attach(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Serialize `value` as JSON, labelled `application/json` unless a
    /// content type is set. A serialization failure is reported by `send`.
    #[must_use]
    pub fn json_body<T: Serialize + ?Sized>(mut self, value: &T) -> FetchBuilder<BodySet> {
        match serde_json::to_vec(value) {
            Ok(bytes) => self
                .default_content_type(ContentType::ApplicationJson)
                .attach(Bytes::from(bytes)),
            Err(e) => {
                tracing::debug!("JSON body serialization failed: {}", e);
                if self.pending.is_none() {
                    self.pending = Some(h2fetch_client::error::builder(e));
                }
                self.transition()
            }
        }
    }

    fn default_content_type(self, content_type: ContentType) -> Self {
        if self.options.headers.get("content-type").is_some() {
            self
        } else {
            self.content_type(content_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn json_body_serializes_and_labels() {
        let builder = FetchBuilder::new().json_body(&serde_json::json!({"a": 1}));
        let options = builder.options();
        assert_eq!(options.body.as_deref(), Some(&br#"{"a":1}"#[..]));
        assert_eq!(options.headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn raw_body_defaults_to_octet_stream() {
        let builder = FetchBuilder::new().body(vec![0u8, 1, 2]);
        assert_eq!(
            builder.options().headers.get("content-type"),
            Some("application/octet-stream")
        );
        assert_eq!(builder.options().body.as_deref(), Some(&[0u8, 1, 2][..]));
    }

    #[test]
    fn explicit_content_type_is_kept() {
        let builder = FetchBuilder::new()
            .header("Content-Type", "application/vnd.custom+json")
            .text_body("hi");
        assert_eq!(
            builder.options().headers.get("content-type"),
            Some("application/vnd.custom+json")
        );
    }

    #[test]
    fn unserializable_body_is_deferred() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1);
        let builder = FetchBuilder::new().json_body(&map);
        assert!(builder.pending.as_ref().is_some_and(h2fetch_client::Error::is_builder));
        assert!(builder.options().body.is_none());
    }
}
