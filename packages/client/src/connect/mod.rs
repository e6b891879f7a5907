//! Session establishment
//!
//! Parses the target address, opens TCP (and TLS for `https://`), runs the
//! HTTP/2 preface on a background driver task and bridges the driver's
//! lifecycle into an awaitable `create_session`.

pub mod address;
pub(crate) mod connection;
pub mod connector;

pub use address::{Scheme, Target};
pub use connector::create_session;
