//! Capture-date resolution with cascading fallbacks.
//!
//! Sources are tried in order, first success wins:
//! 1. the `DateTimeOriginal` EXIF field,
//! 2. the `DateTime` EXIF field,
//! 3. a `YYYYMMDD_HHMMSS` pattern anywhere in the file path.
//!
//! A value that is present but unparsable is logged and falls through to
//! the next source rather than failing the image.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::metadata::PhotoMetadata;

/// Both timestamp layouts seen in the wild for EXIF date fields.
const EXIF_TIMESTAMP_FORMATS: [&str; 2] = ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

static PATH_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})(\d{2})(\d{2})_(\d{2})(\d{2})(\d{2})").unwrap());

/// Resolves a display date ("Mon YYYY") for an image.
pub struct DateResolver;

impl DateResolver {
    /// Run the full cascade. Returns e.g. `"May 2018"`, or `None` when no
    /// source yields a valid timestamp.
    pub fn resolve(metadata: Option<&PhotoMetadata>, path: &Path) -> Option<String> {
        if let Some(meta) = metadata {
            let sources = [
                ("DateTimeOriginal", meta.date_time_original.as_deref()),
                ("DateTime", meta.date_time.as_deref()),
            ];
            for (field, value) in sources {
                let Some(raw) = value else { continue };
                match Self::parse_exif_timestamp(raw) {
                    Some(dt) => return Some(Self::format_month_year(&dt)),
                    None => tracing::warn!(
                        path = %path.display(),
                        field,
                        value = raw,
                        "unparsable timestamp, falling through"
                    ),
                }
            }
        }
        Self::from_path(path)
    }

    /// Parse an EXIF timestamp against both accepted layouts.
    pub fn parse_exif_timestamp(raw: &str) -> Option<NaiveDateTime> {
        let trimmed = raw.trim().trim_matches('"');
        EXIF_TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    }

    /// Match a `YYYYMMDD_HHMMSS` timestamp embedded anywhere in the path.
    pub fn from_path(path: &Path) -> Option<String> {
        let haystack = path.to_string_lossy();
        let matched = PATH_TIMESTAMP.find(&haystack)?;
        match NaiveDateTime::parse_from_str(matched.as_str(), "%Y%m%d_%H%M%S") {
            Ok(dt) => Some(Self::format_month_year(&dt)),
            Err(_) => {
                tracing::warn!(
                    path = %path.display(),
                    matched = matched.as_str(),
                    "filename matched the timestamp pattern but is not a valid date"
                );
                None
            }
        }
    }

    fn format_month_year(dt: &NaiveDateTime) -> String {
        dt.format("%b %Y").to_string()
    }
}
