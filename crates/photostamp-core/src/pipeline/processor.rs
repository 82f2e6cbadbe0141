//! Per-image processing: decode, extract, resolve, render, encode.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::geocode::retry::reverse_with_retry;
use crate::geocode::{select_place_name, ReverseGeocoder};
use crate::types::ResolvedCaption;

use super::date::DateResolver;
use super::discovery::FileDiscovery;
use super::footer::FooterRenderer;
use super::metadata::{MetadataExtractor, PhotoMetadata};
use super::orientation::normalize_orientation;

/// What happened to a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Footer rendered and the file written to this path
    Written(PathBuf),
    /// No capture date could be resolved; the image was left untouched
    SkippedNoDate,
}

/// Runs the full caption pipeline for individual images.
pub struct ImageProcessor {
    config: Config,
    geocoder: Box<dyn ReverseGeocoder>,
    renderer: FooterRenderer,
    discovery: FileDiscovery,
}

impl ImageProcessor {
    pub fn new(config: Config, geocoder: Box<dyn ReverseGeocoder>) -> Self {
        // Tilde-expand the font path before it reaches the renderer
        let mut footer = config.footer.clone();
        footer.font_path = config.font_path();
        let renderer = FooterRenderer::new(footer);
        let discovery = FileDiscovery::new(config.processing.clone());
        Self {
            config,
            geocoder,
            renderer,
            discovery,
        }
    }

    /// Resolve the caption font up front so font problems fail the run
    /// before any image is processed.
    pub fn ensure_font(&self) -> PipelineResult<()> {
        self.renderer.ensure_font()
    }

    /// List the supported images in `dir`.
    pub fn discover(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        self.discovery.discover(dir)
    }

    /// Process one image end to end, writing the result to `output_path`.
    ///
    /// An image without a resolvable capture date is skipped rather than
    /// written with a partial caption. Geocoding failure only costs the
    /// location half of the caption.
    pub async fn process_file(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> PipelineResult<ProcessOutcome> {
        let image = Self::decode(input_path)?;
        let metadata = MetadataExtractor::extract(input_path);

        let Some(date) = DateResolver::resolve(metadata.as_ref(), input_path) else {
            tracing::info!(path = %input_path.display(), "no capture date, skipping");
            return Ok(ProcessOutcome::SkippedNoDate);
        };

        let image = normalize_orientation(
            image,
            metadata.as_ref().and_then(|m| m.orientation),
        );
        let location = self.resolve_location(metadata.as_ref(), input_path).await;

        let caption = ResolvedCaption {
            date: Some(date),
            location,
        };
        // Date is present, so text() cannot be empty here
        let text = caption.text().unwrap_or_default();
        tracing::debug!(path = %input_path.display(), caption = %text, "rendering footer");

        let rendered = self.renderer.render(&image, &text)?;
        self.save_jpeg(&rendered, output_path)?;
        Ok(ProcessOutcome::Written(output_path.to_path_buf()))
    }

    fn decode(path: &Path) -> PipelineResult<DynamicImage> {
        ImageReader::open(path)
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .decode()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Turn the GPS block (when complete) into a place name. Every failure
    /// mode degrades to `None`: the caption simply loses its location half.
    async fn resolve_location(
        &self,
        metadata: Option<&PhotoMetadata>,
        path: &Path,
    ) -> Option<String> {
        let (lat, lon) = match metadata {
            Some(PhotoMetadata {
                gps_latitude: Some(lat),
                gps_longitude: Some(lon),
                ..
            }) => (lat.to_decimal(), lon.to_decimal()),
            _ => {
                tracing::debug!(path = %path.display(), "no GPS block");
                return None;
            }
        };

        match reverse_with_retry(self.geocoder.as_ref(), lat, lon, &self.config.geocode).await {
            Ok(address) => select_place_name(&address),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "reverse geocoding failed, caption will omit location"
                );
                None
            }
        }
    }

    fn save_jpeg(&self, image: &image::RgbImage, path: &Path) -> PipelineResult<()> {
        let file = File::create(path).map_err(|e| PipelineError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(writer, self.config.footer.jpeg_quality)
            .encode_image(image)
            .map_err(|e| PipelineError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}
