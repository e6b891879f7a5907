//! Deadlines layered over the connect, response and close bridges.

pub mod timeout_config;

pub use timeout_config::TimeoutConfig;
