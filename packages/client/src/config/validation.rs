//! Configuration validation utilities

use std::time::Duration;

use crate::error::{self, Error};

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid network address: {0}")]
    InvalidAddress(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        error::builder(err)
    }
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidTimeout` - if a deadline is zero or exceeds one hour
    /// - `InvalidAddress` - if an authority override is malformed
    /// - `InvalidParameter` - if a protocol setting is outside its legal range
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if:
    /// - The timeout duration is zero
    /// - The timeout duration exceeds 1 hour (3600 seconds)
    pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout.as_secs() > 3600 {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed 1 hour"
            )));
        }

        Ok(())
    }

    /// Validate numeric range
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the value is outside
    /// the specified range [min, max] (inclusive).
    pub fn validate_range<T>(value: T, min: T, max: T, name: &str) -> ConfigResult<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} must be between {min} and {max}, got {value}"
            )));
        }

        Ok(())
    }

    /// Validate an `:authority` override
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidAddress` if the value does not parse
    /// as an HTTP authority.
    pub fn validate_authority(authority: &str) -> ConfigResult<()> {
        authority
            .parse::<http::uri::Authority>()
            .map(|_| ())
            .map_err(|e| ConfigurationError::InvalidAddress(format!("{authority}: {e}")))
    }
}

/// Common configuration defaults
pub struct ConfigDefaults;

impl ConfigDefaults {
    pub const DEFAULT_PORT_HTTP: u16 = 80;
    pub const DEFAULT_PORT_HTTPS: u16 = 443;
}
