//! Error types for the photostamp caption pipeline.
//!
//! Errors are organized by stage so messages carry the context that matters
//! for a batch run: which file, which stage, and whether the failure is
//! transient. Missing metadata is deliberately *not* an error anywhere in
//! this taxonomy — resolvers return `None` and the pipeline continues.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for photostamp operations.
#[derive(Error, Debug)]
pub enum StampError {
    /// Configuration-related errors. Fatal to the whole run.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-image pipeline errors. Logged, never abort the batch.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
///
/// A config file that exists but cannot be read or parsed aborts the run;
/// an absent file is handled by writing defaults, not by erroring.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// Failed to write the default config file
    #[error("Failed to write default config to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// A reverse-geocoding call failed.
    ///
    /// `status_code` is set for HTTP-level failures so retry classification
    /// can tell transient errors (429, 5xx) from permanent ones.
    #[error("Geocoding error: {message}")]
    Geocode {
        message: String,
        status_code: Option<u16>,
    },

    /// Reverse geocoding kept failing transiently until the attempt budget
    /// ran out. The caption falls back to date-only.
    #[error("Geocoding gave up after {attempts} attempt(s)")]
    GeocodeExhausted { attempts: u32 },

    /// No usable caption font could be loaded
    #[error("Font error: {0}")]
    Font(String),

    /// Writing the output image failed
    #[error("Write error for {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Convenience type alias for photostamp results.
pub type Result<T> = std::result::Result<T, StampError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
