//! HTTP/2 protocol settings sent during the connection preface.

use super::merge::Merge;
use super::validation::{ConfigResult, ConfigValidator, Validator};

/// Largest legal flow-control window (2^31 - 1).
pub const MAX_WINDOW_SIZE: u32 = (1 << 31) - 1;

/// Frame size bounds from RFC 9113 section 4.2.
pub const MIN_FRAME_SIZE: u32 = 16_384;
pub const MAX_FRAME_SIZE: u32 = (1 << 24) - 1;

/// HTTP/2 settings applied to the `h2` client builder.
///
/// Every field is optional; `None` keeps the protocol default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct H2Settings {
    pub initial_window_size: Option<u32>,
    pub initial_connection_window_size: Option<u32>,
    pub max_frame_size: Option<u32>,
    pub max_concurrent_streams: Option<u32>,
    pub max_header_list_size: Option<u32>,
}

impl H2Settings {
    #[must_use]
    pub fn with_initial_window_size(mut self, size: u32) -> Self {
        self.initial_window_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_initial_connection_window_size(mut self, size: u32) -> Self {
        self.initial_connection_window_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_max_frame_size(mut self, size: u32) -> Self {
        self.max_frame_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_max_concurrent_streams(mut self, max: u32) -> Self {
        self.max_concurrent_streams = Some(max);
        self
    }

    #[must_use]
    pub fn with_max_header_list_size(mut self, max: u32) -> Self {
        self.max_header_list_size = Some(max);
        self
    }

    /// Build an `h2` client builder carrying these settings.
    ///
    /// Server push is always disabled: nothing in this client would consume
    /// pushed streams.
    #[must_use]
    pub fn client_builder(&self) -> h2::client::Builder {
        let mut builder = h2::client::Builder::new();
        builder.enable_push(false);

        if let Some(size) = self.initial_window_size {
            builder.initial_window_size(size);
        }
        if let Some(size) = self.initial_connection_window_size {
            builder.initial_connection_window_size(size);
        }
        if let Some(size) = self.max_frame_size {
            builder.max_frame_size(size);
        }
        if let Some(max) = self.max_concurrent_streams {
            builder.max_concurrent_streams(max);
        }
        if let Some(max) = self.max_header_list_size {
            builder.max_header_list_size(max);
        }

        builder
    }
}

/// Field-wise: each setting set on the overlay replaces the base value.
impl Merge for H2Settings {
    fn merge_over(self, base: Self) -> Self {
        Self {
            initial_window_size: self.initial_window_size.merge_over(base.initial_window_size),
            initial_connection_window_size: self
                .initial_connection_window_size
                .merge_over(base.initial_connection_window_size),
            max_frame_size: self.max_frame_size.merge_over(base.max_frame_size),
            max_concurrent_streams: self
                .max_concurrent_streams
                .merge_over(base.max_concurrent_streams),
            max_header_list_size: self
                .max_header_list_size
                .merge_over(base.max_header_list_size),
        }
    }
}

impl Validator for H2Settings {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(size) = self.initial_window_size {
            ConfigValidator::validate_range(size, 0, MAX_WINDOW_SIZE, "initial_window_size")?;
        }
        if let Some(size) = self.initial_connection_window_size {
            ConfigValidator::validate_range(
                size,
                0,
                MAX_WINDOW_SIZE,
                "initial_connection_window_size",
            )?;
        }
        if let Some(size) = self.max_frame_size {
            ConfigValidator::validate_range(size, MIN_FRAME_SIZE, MAX_FRAME_SIZE, "max_frame_size")?;
        }
        Ok(())
    }
}
