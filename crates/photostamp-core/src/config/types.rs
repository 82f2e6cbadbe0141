//! Sub-configuration structs with defaults matching the footer's
//! documented geometry.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Footer band geometry and output encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Band height as a fraction of image height
    pub band_height_fraction: f32,

    /// Text height as a fraction of the band height
    pub text_scale: f32,

    /// Left text margin as a fraction of image width
    pub margin_fraction: f32,

    /// Band opacity, 0 (invisible) to 255 (solid black)
    pub alpha: u8,

    /// JPEG quality for output files
    pub jpeg_quality: u8,

    /// Explicit TTF/OTF font file. When unset, a system sans-serif face
    /// is discovered at first render.
    pub font_path: Option<PathBuf>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            band_height_fraction: 0.03,
            text_scale: 0.8,
            margin_fraction: 0.01,
            alpha: 150,
            jpeg_quality: 95,
            font_path: None,
        }
    }
}

/// Reverse-geocoding service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeConfig {
    /// Base URL of a Nominatim-compatible service
    pub endpoint: String,

    /// User-Agent header sent with every request (Nominatim requires an
    /// identifying agent)
    pub user_agent: String,

    /// Preferred language for place names
    pub language: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Max attempts for transient failures
    pub retry_attempts: u32,

    /// Base delay between retries in milliseconds (doubles per attempt)
    pub retry_base_delay_ms: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("photostamp/{}", env!("CARGO_PKG_VERSION")),
            language: "en".to_string(),
            timeout_ms: 10_000,
            retry_attempts: 3,
            retry_base_delay_ms: 1_000,
        }
    }
}

/// Input enumeration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Extensions accepted when enumerating the input directory
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string()],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
