//! # h2fetch client
//!
//! Promise-style HTTP/2 sessions over a single multiplexed connection.
//!
//! A [`Session`] is established with [`create_session`], issues requests
//! with [`Session::request`] and is shut down with [`Session::close`], which
//! lets in-flight streams finish. Every
//! asynchronous operation resolves exactly once, from whichever lifecycle
//! event arrives first, and detaches its listeners when it does.
//!
//! ## Usage
//!
//! ```no_run
//! use h2fetch_client::{RequestDescriptor, SessionOptions, create_session};
//!
//! # async fn run() -> h2fetch_client::Result<()> {
//! let session = create_session("https://example.com", SessionOptions::default()).await?;
//! let response = session
//!     .request(RequestDescriptor::new().with_header(":path", "/status"))
//!     .await?;
//! session.close().await?;
//!
//! println!("{} {}", response.status(), response.text().await?);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod bridge;
pub mod config;
pub mod connect;
pub mod constants;
pub mod error;
pub mod http;
pub mod session;
pub mod tls;

pub use crate::bridge::Lifecycle;
pub use crate::config::{H2Settings, Merge, SessionOptions, TimeoutConfig};
pub use crate::connect::create_session;
pub use crate::error::{Error, Result};
pub use crate::http::{
    BodyEvent, RequestDescriptor, RequestHeaders, Response, ResponseBody, ResponseHeaders,
};
pub use crate::session::{Session, SessionState};
pub use crate::tls::TlsConfig;
