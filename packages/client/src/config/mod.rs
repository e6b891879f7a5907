//! Session and request configuration
//!
//! Typed option structs replace loosely-shaped option bags. Every struct has a
//! `Default`, fluent `with_*` setters, and a documented [`Merge`] rule.

pub mod merge;
pub mod protocol;
pub mod session;
pub mod timeouts;
pub mod validation;

pub use merge::Merge;
pub use protocol::H2Settings;
pub use session::SessionOptions;
pub use timeouts::TimeoutConfig;
pub use validation::{ConfigDefaults, ConfigResult, ConfigValidator, ConfigurationError, Validator};
