//! Core data types for the photostamp caption pipeline.

use serde::{Deserialize, Serialize};

/// Hemisphere reference for a GPS coordinate, as stored in the EXIF GPS
/// block (`GPSLatitudeRef` / `GPSLongitudeRef`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse an EXIF reference value ("N", "S", "E", "W", possibly quoted).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_matches('"') {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    /// Sign applied to the decimal coordinate: south and west are negative.
    pub fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

/// A degrees/minutes/seconds geographic coordinate plus its hemisphere
/// reference, read verbatim from EXIF GPS rationals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsCoordinate {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl DmsCoordinate {
    pub fn new(degrees: f64, minutes: f64, seconds: f64, hemisphere: Hemisphere) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        }
    }

    /// Convert to signed decimal degrees.
    pub fn to_decimal(self) -> f64 {
        self.hemisphere.sign() * (self.degrees + self.minutes / 60.0 + self.seconds / 3600.0)
    }
}

/// The resolved caption for one image: a display date at month+year
/// granularity and an optional place name.
///
/// A caption without a date is considered not worth producing, so
/// [`ResolvedCaption::text`] yields `None` unless the date is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCaption {
    /// Display date, e.g. "Jan 2018"
    pub date: Option<String>,
    /// Display place name, e.g. "Springfield"
    pub location: Option<String>,
}

impl ResolvedCaption {
    /// Render the caption text: `"{date} > {location}"` when a location is
    /// present, just the date otherwise, nothing without a date.
    pub fn text(&self) -> Option<String> {
        let date = self.date.as_ref()?;
        Some(match &self.location {
            Some(location) => format!("{date} > {location}"),
            None => date.clone(),
        })
    }
}

/// Summary counters for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessingStats {
    /// Output files written
    pub written: usize,

    /// Inputs skipped because the output already existed
    pub skipped_existing: usize,

    /// Inputs skipped because no capture date could be resolved
    pub skipped_no_date: usize,

    /// Inputs that failed with a pipeline error
    pub failed: usize,

    /// Wall-clock duration of the run in seconds
    pub total_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_magnitude() {
        let dms = DmsCoordinate::new(37.0, 30.0, 36.0, Hemisphere::North);
        let expected = 37.0 + 30.0 / 60.0 + 36.0 / 3600.0;
        assert!((dms.to_decimal() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_south_and_west_are_negative() {
        let south = DmsCoordinate::new(33.0, 52.0, 4.0, Hemisphere::South);
        let west = DmsCoordinate::new(151.0, 12.0, 26.0, Hemisphere::West);
        assert!(south.to_decimal() < 0.0);
        assert!(west.to_decimal() < 0.0);
        assert!((south.to_decimal() + 33.0 + 52.0 / 60.0 + 4.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_north_and_east_are_positive() {
        assert!(DmsCoordinate::new(51.0, 30.0, 0.0, Hemisphere::North).to_decimal() > 0.0);
        assert!(DmsCoordinate::new(0.0, 7.0, 39.0, Hemisphere::East).to_decimal() > 0.0);
    }

    #[test]
    fn test_hemisphere_parse() {
        assert_eq!(Hemisphere::parse("N"), Some(Hemisphere::North));
        assert_eq!(Hemisphere::parse("\"W\""), Some(Hemisphere::West));
        assert_eq!(Hemisphere::parse(" S "), Some(Hemisphere::South));
        assert_eq!(Hemisphere::parse("X"), None);
        assert_eq!(Hemisphere::parse(""), None);
    }

    #[test]
    fn test_caption_text_with_location() {
        let caption = ResolvedCaption {
            date: Some("May 2018".to_string()),
            location: Some("Springfield".to_string()),
        };
        assert_eq!(caption.text().as_deref(), Some("May 2018 > Springfield"));
    }

    #[test]
    fn test_caption_text_date_only() {
        let caption = ResolvedCaption {
            date: Some("May 2018".to_string()),
            location: None,
        };
        assert_eq!(caption.text().as_deref(), Some("May 2018"));
    }

    #[test]
    fn test_caption_text_requires_date() {
        let caption = ResolvedCaption {
            date: None,
            location: Some("Springfield".to_string()),
        };
        assert_eq!(caption.text(), None);
    }
}
