//! Connection options for [`create_session`](crate::create_session).

use super::merge::Merge;
use super::protocol::H2Settings;
use super::timeouts::TimeoutConfig;
use super::validation::{ConfigResult, ConfigValidator, Validator};
use crate::constants::DEFAULTS;
use crate::tls::TlsConfig;

/// Options that shape one session: transport security, protocol settings,
/// deadlines and the default body cap of its responses.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub tls: TlsConfig,
    pub settings: H2Settings,
    pub timeouts: TimeoutConfig,
    /// Replaces the `:authority` derived from the address
    pub authority: Option<String>,
    /// Limit applied by `Response::text()`/`json()`; `0` is unlimited
    pub max_body_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tls: TlsConfig::default(),
            settings: H2Settings::default(),
            timeouts: TimeoutConfig::default(),
            authority: None,
            max_body_size: DEFAULTS.max_body_size,
        }
    }
}

impl SessionOptions {
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: H2Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Cap buffered bodies at `max` bytes (`0` disables the cap)
    #[must_use]
    pub fn with_max_body_size(mut self, max: usize) -> Self {
        self.max_body_size = max;
        self
    }
}

/// Merge rules per field:
/// - `tls`: replaced wholesale by the overlay (root selection is one decision)
/// - `settings`, `timeouts`: merged field by field
/// - `authority`: overlay wins when set
/// - `max_body_size`: overlay wins when non-zero
impl Merge for SessionOptions {
    fn merge_over(self, base: Self) -> Self {
        Self {
            tls: self.tls,
            settings: self.settings.merge_over(base.settings),
            timeouts: self.timeouts.merge_over(base.timeouts),
            authority: self.authority.merge_over(base.authority),
            max_body_size: if self.max_body_size == 0 {
                base.max_body_size
            } else {
                self.max_body_size
            },
        }
    }
}

impl Validator for SessionOptions {
    fn validate(&self) -> ConfigResult<()> {
        self.settings.validate()?;
        self.timeouts.validate()?;
        if let Some(authority) = &self.authority {
            ConfigValidator::validate_authority(authority)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn defaults_have_no_body_cap_and_no_deadlines() {
        let options = SessionOptions::default();
        assert_eq!(options.max_body_size, 0);
        assert_eq!(options.timeouts, TimeoutConfig::default());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn merge_recurses_into_timeouts() {
        let base = SessionOptions::default()
            .with_timeouts(TimeoutConfig::default().with_connect(Duration::from_secs(3)))
            .with_max_body_size(1024);
        let overlay = SessionOptions::default()
            .with_timeouts(TimeoutConfig::default().with_close(Duration::from_secs(1)));

        let merged = overlay.merge_over(base);
        assert_eq!(merged.timeouts.connect, Some(Duration::from_secs(3)));
        assert_eq!(merged.timeouts.close, Some(Duration::from_secs(1)));
        assert_eq!(merged.max_body_size, 1024);
    }

    #[test]
    fn invalid_authority_fails_validation() {
        let options = SessionOptions::default().with_authority("bad authority");
        assert!(options.validate().is_err());
    }
}
