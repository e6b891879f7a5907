//! Protocol constants and the process-wide defaults table
//!
//! Header names and reason codes are plain constants. The request defaults
//! are initialised once on first use and never mutated.

use once_cell::sync::Lazy;

pub const HTTP2_HEADER_METHOD: &str = ":method";
pub const HTTP2_HEADER_PATH: &str = ":path";
pub const HTTP2_HEADER_AUTHORITY: &str = ":authority";
pub const HTTP2_HEADER_SCHEME: &str = ":scheme";
pub const HTTP2_HEADER_STATUS: &str = ":status";
pub const HTTP2_HEADER_CONTENT_TYPE: &str = "content-type";

pub const HTTP2_METHOD_GET: &str = "GET";

/// Reason sent when a stream is closed after its body was fully read.
pub const NGHTTP2_NO_ERROR: h2::Reason = h2::Reason::NO_ERROR;

/// Reason sent when a stream is destroyed before completion.
pub const NGHTTP2_CANCEL: h2::Reason = h2::Reason::CANCEL;

/// ALPN protocol identifier negotiated over TLS.
pub const ALPN_H2: &[u8] = b"h2";

/// Read-only request defaults shared by every session.
#[derive(Debug)]
pub struct Defaults {
    pub method: &'static str,
    pub path: &'static str,
    /// `0` disables the body size cap.
    pub max_body_size: usize,
}

pub static DEFAULTS: Lazy<Defaults> = Lazy::new(|| Defaults {
    method: HTTP2_METHOD_GET,
    path: "/",
    max_body_size: 0,
});
