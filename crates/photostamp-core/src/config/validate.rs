//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.footer.band_height_fraction <= 0.0 || self.footer.band_height_fraction > 0.5 {
            return Err(ConfigError::Validation(
                "footer.band_height_fraction must be in (0, 0.5]".into(),
            ));
        }
        if self.footer.text_scale <= 0.0 || self.footer.text_scale > 1.0 {
            return Err(ConfigError::Validation(
                "footer.text_scale must be in (0, 1]".into(),
            ));
        }
        if self.footer.margin_fraction < 0.0 || self.footer.margin_fraction > 0.25 {
            return Err(ConfigError::Validation(
                "footer.margin_fraction must be in [0, 0.25]".into(),
            ));
        }
        if self.footer.jpeg_quality == 0 || self.footer.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "footer.jpeg_quality must be in 1..=100".into(),
            ));
        }
        if self.geocode.endpoint.is_empty() {
            return Err(ConfigError::Validation(
                "geocode.endpoint must not be empty".into(),
            ));
        }
        if self.geocode.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "geocode.timeout_ms must be > 0".into(),
            ));
        }
        if self.geocode.retry_attempts == 0 {
            return Err(ConfigError::Validation(
                "geocode.retry_attempts must be > 0".into(),
            ));
        }
        if self.geocode.retry_base_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "geocode.retry_base_delay_ms must be > 0".into(),
            ));
        }
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::Validation(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        Ok(())
    }
}
