//! Typed identifiers for the EXIF tags this pipeline reads.
//!
//! The raw tag mapping attached to a [`PhotoMetadata`](super::metadata::PhotoMetadata)
//! is keyed by `TagId` rather than bare numeric codes, so logs and debug
//! output name the tags we care about and label everything else as unknown.

use std::fmt;

use exif::Tag;

/// The EXIF tags the caption pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagId {
    DateTimeOriginal,
    DateTime,
    Orientation,
    Make,
    Model,
    GpsLatitudeRef,
    GpsLatitude,
    GpsLongitudeRef,
    GpsLongitude,
    /// Any tag the pipeline has no use for, keyed by its numeric code.
    Unknown(u16),
}

impl TagId {
    /// Classify a `kamadak-exif` tag.
    pub fn from_exif(tag: Tag) -> Self {
        if tag == Tag::DateTimeOriginal {
            Self::DateTimeOriginal
        } else if tag == Tag::DateTime {
            Self::DateTime
        } else if tag == Tag::Orientation {
            Self::Orientation
        } else if tag == Tag::Make {
            Self::Make
        } else if tag == Tag::Model {
            Self::Model
        } else if tag == Tag::GPSLatitudeRef {
            Self::GpsLatitudeRef
        } else if tag == Tag::GPSLatitude {
            Self::GpsLatitude
        } else if tag == Tag::GPSLongitudeRef {
            Self::GpsLongitudeRef
        } else if tag == Tag::GPSLongitude {
            Self::GpsLongitude
        } else {
            Self::Unknown(tag.number())
        }
    }

    /// Look up a tag by its numeric code in the flat TIFF/EXIF numbering.
    ///
    /// GPS sub-IFD tags have their own numbering and are not resolvable
    /// from a bare code; use [`TagId::from_exif`] for those.
    pub fn from_code(code: u16) -> Self {
        match code {
            0x9003 => Self::DateTimeOriginal,
            0x0132 => Self::DateTime,
            0x0112 => Self::Orientation,
            0x010f => Self::Make,
            0x0110 => Self::Model,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTimeOriginal => write!(f, "DateTimeOriginal"),
            Self::DateTime => write!(f, "DateTime"),
            Self::Orientation => write!(f, "Orientation"),
            Self::Make => write!(f, "Make"),
            Self::Model => write!(f, "Model"),
            Self::GpsLatitudeRef => write!(f, "GPSLatitudeRef"),
            Self::GpsLatitude => write!(f, "GPSLatitude"),
            Self::GpsLongitudeRef => write!(f, "GPSLongitudeRef"),
            Self::GpsLongitude => write!(f, "GPSLongitude"),
            Self::Unknown(code) => write!(f, "unknown(0x{code:04x})"),
        }
    }
}
