//! EXIF metadata extraction from images.

use exif::{In, Reader, Tag, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::types::{DmsCoordinate, Hemisphere};

use super::tags::TagId;

/// The metadata fields the caption pipeline consumes, plus the raw tag
/// mapping for debug output.
#[derive(Debug, Clone, Default)]
pub struct PhotoMetadata {
    /// Raw tag-id → display value mapping from the primary IFD and the
    /// EXIF/GPS sub-IFDs.
    pub raw: BTreeMap<TagId, String>,

    /// `DateTimeOriginal` as stored, unparsed
    pub date_time_original: Option<String>,

    /// `DateTime` as stored, unparsed
    pub date_time: Option<String>,

    /// EXIF orientation flag (1-8)
    pub orientation: Option<u32>,

    /// GPS latitude DMS triple plus hemisphere, if the block is complete
    pub gps_latitude: Option<DmsCoordinate>,

    /// GPS longitude DMS triple plus hemisphere, if the block is complete
    pub gps_longitude: Option<DmsCoordinate>,
}

/// Extracts EXIF metadata from image files.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract EXIF data from an image file.
    ///
    /// Returns `None` if the file has no EXIF container or it cannot be
    /// read. Intentionally lenient — partial data is returned as-is, and a
    /// missing field is never an error.
    pub fn extract(path: &Path) -> Option<PhotoMetadata> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);
        let exif = Reader::new().read_from_container(&mut reader).ok()?;

        let mut raw = BTreeMap::new();
        for field in exif.fields() {
            if field.ifd_num == In::PRIMARY {
                raw.insert(
                    TagId::from_exif(field.tag),
                    field.display_value().to_string(),
                );
            }
        }

        Some(PhotoMetadata {
            raw,
            date_time_original: Self::get_string(&exif, Tag::DateTimeOriginal),
            date_time: Self::get_string(&exif, Tag::DateTime),
            orientation: Self::get_u32(&exif, Tag::Orientation),
            gps_latitude: Self::get_dms(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef),
            gps_longitude: Self::get_dms(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef),
        })
    }

    /// Get a string field, stripping the quotes kamadak-exif adds around
    /// ASCII values.
    fn get_string(exif: &exif::Exif, tag: Tag) -> Option<String> {
        exif.get_field(tag, In::PRIMARY)
            .map(|f| f.display_value().to_string().trim_matches('"').to_string())
    }

    /// Get a u32 field.
    fn get_u32(exif: &exif::Exif, tag: Tag) -> Option<u32> {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| match &f.value {
                Value::Short(v) => v.first().map(|&x| x as u32),
                Value::Long(v) => v.first().copied(),
                _ => None,
            })
    }

    /// Read one GPS coordinate: the DMS rational triple plus its hemisphere
    /// reference. Either sub-field missing or malformed yields `None` —
    /// many images simply have no GPS block.
    fn get_dms(exif: &exif::Exif, coord_tag: Tag, ref_tag: Tag) -> Option<DmsCoordinate> {
        let coord = exif.get_field(coord_tag, In::PRIMARY)?;
        let reference = exif.get_field(ref_tag, In::PRIMARY)?;

        let (degrees, minutes, seconds) = match &coord.value {
            Value::Rational(v) if v.len() >= 3 => (v[0].to_f64(), v[1].to_f64(), v[2].to_f64()),
            _ => return None,
        };
        let hemisphere = Hemisphere::parse(&reference.display_value().to_string())?;

        Some(DmsCoordinate::new(degrees, minutes, seconds, hemisphere))
    }
}
