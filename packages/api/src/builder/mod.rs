//! Fluent request builder
//!
//! Collects method, path, headers, body and session options into
//! [`FetchOptions`](crate::FetchOptions), then runs [`fetch`](crate::fetch).

pub mod body;
pub mod core;
pub mod headers;
pub mod methods;

pub use self::core::{BodyNotSet, BodySet, ContentType, FetchBuilder};
pub use self::headers::AcceptValue;
