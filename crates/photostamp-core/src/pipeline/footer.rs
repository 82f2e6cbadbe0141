//! Footer rendering: a semi-transparent band along the bottom edge with
//! the caption text drawn over it.
//!
//! Geometry is computed by [`FooterLayout`] as pure arithmetic so it stays
//! testable without a font; the font itself is loaded lazily on first
//! render, either from an explicit config path or from the system font
//! database.

use ab_glyph::{FontArc, FontVec, PxScale};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use imageproc::drawing::draw_text_mut;
use once_cell::sync::OnceCell;
use std::path::Path;

use crate::config::FooterConfig;
use crate::error::{PipelineError, PipelineResult};

/// Pixel geometry of the footer band and its caption text for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterLayout {
    /// Top edge of the band
    pub band_top: u32,
    /// Band height in pixels
    pub band_height: u32,
    /// Left edge of the caption text
    pub text_x: i32,
    /// Top edge of the caption text (the band's top edge)
    pub text_y: i32,
    /// Caption text height in pixels
    pub text_height: u32,
}

impl FooterLayout {
    /// Compute the band geometry for an image of the given dimensions.
    pub fn compute(width: u32, height: u32, config: &FooterConfig) -> Self {
        let band_height = ((height as f32 * config.band_height_fraction) as u32)
            .clamp(1, height);
        let band_top = height - band_height;
        Self {
            band_top,
            band_height,
            text_x: (width as f32 * config.margin_fraction) as i32,
            text_y: band_top as i32,
            text_height: ((band_height as f32 * config.text_scale) as u32).max(1),
        }
    }
}

/// Renders caption footers onto decoded images.
pub struct FooterRenderer {
    config: FooterConfig,
    font: OnceCell<FontArc>,
}

impl FooterRenderer {
    pub fn new(config: FooterConfig) -> Self {
        Self {
            config,
            font: OnceCell::new(),
        }
    }

    /// Resolve the caption font eagerly. Called at startup so a missing
    /// font fails the run before any image is touched.
    pub fn ensure_font(&self) -> PipelineResult<()> {
        self.font().map(|_| ())
    }

    fn font(&self) -> PipelineResult<&FontArc> {
        self.font
            .get_or_try_init(|| load_font(self.config.font_path.as_deref()))
    }

    /// Composite the band and draw the caption, returning a flattened
    /// RGB image ready for JPEG encoding.
    pub fn render(&self, image: &DynamicImage, caption: &str) -> PipelineResult<RgbImage> {
        let font = self.font()?;
        let mut canvas = image.to_rgba8();
        let (width, height) = canvas.dimensions();
        let layout = FooterLayout::compute(width, height, &self.config);

        composite_band(&mut canvas, &layout, self.config.alpha);
        draw_text_mut(
            &mut canvas,
            Rgba([255, 255, 255, 255]),
            layout.text_x,
            layout.text_y,
            PxScale::from(layout.text_height as f32),
            font,
            caption,
        );

        Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
    }
}

/// Darken the band region as if a black rectangle with the given alpha had
/// been alpha-composited over it.
fn composite_band(canvas: &mut RgbaImage, layout: &FooterLayout, alpha: u8) {
    let keep = 1.0 - alpha as f32 / 255.0;
    for y in layout.band_top..layout.band_top + layout.band_height {
        for x in 0..canvas.width() {
            let pixel = canvas.get_pixel_mut(x, y);
            for channel in &mut pixel.0[..3] {
                *channel = (*channel as f32 * keep).round() as u8;
            }
        }
    }
}

/// Load the caption font: an explicit path wins, otherwise the system
/// font database is queried for a sans-serif face.
fn load_font(font_path: Option<&Path>) -> PipelineResult<FontArc> {
    if let Some(path) = font_path {
        let bytes = std::fs::read(path).map_err(|e| {
            PipelineError::Font(format!("failed to read font {}: {e}", path.display()))
        })?;
        return FontArc::try_from_vec(bytes).map_err(|e| {
            PipelineError::Font(format!("invalid font file {}: {e}", path.display()))
        });
    }

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let id = db
        .query(&fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        })
        .ok_or_else(|| {
            PipelineError::Font(
                "no system sans-serif font found; set footer.font_path in the config".into(),
            )
        })?;

    db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index).map(FontArc::from)
    })
    .ok_or_else(|| PipelineError::Font("failed to read system font data".into()))?
    .map_err(|e| PipelineError::Font(format!("invalid system font: {e}")))
}
