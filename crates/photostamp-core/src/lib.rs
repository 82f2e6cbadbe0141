//! Core library for photostamp: stamps photos with a caption footer built
//! from their own metadata.
//!
//! The pipeline decodes an image, reads its EXIF block, resolves a capture
//! date (EXIF fields first, then a timestamp in the file name), reverse
//! geocodes the GPS position into a place name, rotates the pixels upright,
//! and re-encodes the image with a translucent caption band along the
//! bottom edge.

pub mod config;
pub mod error;
pub mod geocode;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, PipelineError, Result, StampError};
pub use geocode::{NominatimGeocoder, ReverseGeocoder};
pub use pipeline::{BatchDriver, ImageProcessor, ProcessOutcome};
pub use types::{ProcessingStats, ResolvedCaption};

/// Crate version, exposed for the CLI's `--version` and the default
/// geocoder User-Agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
