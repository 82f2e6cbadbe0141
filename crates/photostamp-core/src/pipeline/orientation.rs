//! Orientation normalization per the EXIF orientation flag.

use image::DynamicImage;

/// Rotate the decoded image upright according to its orientation flag.
///
/// Only the three pure rotations are handled (values 3, 6, 8); mirrored
/// orientations and anything unrecognized leave the image untouched, which
/// matches how cameras that matter here write the flag.
pub fn normalize_orientation(image: DynamicImage, orientation: Option<u32>) -> DynamicImage {
    match orientation {
        Some(3) => image.rotate180(),
        Some(6) => image.rotate90(),
        Some(8) => image.rotate270(),
        _ => image,
    }
}
