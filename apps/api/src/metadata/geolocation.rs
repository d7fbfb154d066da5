//! Geolocation from embedded image metadata.
//!
//! Extraction is best-effort: photos without GPS tags are common, so every
//! failure here is logged and reported as "no location" instead of failing
//! the upload.

use std::io::Cursor;

use exif::{Exif, In, Reader, Tag, Value};
use tracing::{debug, warn};

/// A capture location in decimal degrees. South and west are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Pulls a capture location out of raw image bytes.
///
/// Carried by the upload service as `Arc<dyn LocationExtractor>`. Runs on the
/// blocking pool, so implementations may do synchronous work.
pub trait LocationExtractor: Send + Sync {
    fn extract(&self, content: &[u8]) -> Option<GeoPoint>;
}

/// Reads the EXIF GPS IFD from any container the `exif` crate understands
/// (JPEG, TIFF, PNG, WebP, HEIF).
pub struct ExifLocationExtractor;

impl LocationExtractor for ExifLocationExtractor {
    fn extract(&self, content: &[u8]) -> Option<GeoPoint> {
        match read_gps(content) {
            Ok(Some(point)) if point.is_valid() => Some(point),
            Ok(Some(point)) => {
                warn!(?point, "Ignoring out-of-range GPS coordinates");
                None
            }
            Ok(None) => {
                debug!("No GPS location in image metadata");
                None
            }
            Err(e) => {
                warn!(error = %e, "Image metadata scan failed");
                None
            }
        }
    }
}

fn read_gps(content: &[u8]) -> Result<Option<GeoPoint>, exif::Error> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(content)) {
        Ok(exif) => exif,
        // The container parsed but carries no EXIF block at all.
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    let latitude = read_coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S');
    let longitude = read_coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W');

    Ok(match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
        }),
        _ => None,
    })
}

/// Converts a degrees/minutes/seconds triple and its hemisphere reference
/// into signed decimal degrees.
fn read_coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let dms = match &exif.get_field(value_tag, In::PRIMARY)?.value {
        Value::Rational(parts) if parts.len() >= 3 => {
            [parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64()]
        }
        other => {
            debug!("Unexpected {value_tag} value: {other:?}");
            return None;
        }
    };

    let hemisphere = match &exif.get_field(ref_tag, In::PRIMARY)?.value {
        Value::Ascii(strings) => strings.first()?.first().copied()?,
        other => {
            debug!("Unexpected {ref_tag} value: {other:?}");
            return None;
        }
    };

    let degrees = dms[0] + dms[1] / 60.0 + dms[2] / 3600.0;
    if hemisphere.eq_ignore_ascii_case(&negative_ref) {
        Some(-degrees)
    } else {
        Some(degrees)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_reads_san_francisco_exactly() {
        let bytes = tiff_with_gps(37.7749, -122.4194);
        let point = ExifLocationExtractor.extract(&bytes).unwrap();
        assert_eq!(point.latitude, 37.7749);
        assert_eq!(point.longitude, -122.4194);
    }

    #[test]
    fn test_southern_eastern_hemisphere() {
        let bytes = tiff_with_gps(-33.8688, 151.2093);
        let point = ExifLocationExtractor.extract(&bytes).unwrap();
        assert_eq!(point.latitude, -33.8688);
        assert_eq!(point.longitude, 151.2093);
    }

    #[test]
    fn test_minutes_and_seconds_are_folded_in() {
        // 37° 46' 29.64" N
        let bytes = tiff_with_raw_latitude(37, 46, 2964, "N");
        let point = ExifLocationExtractor.extract(&bytes).unwrap();
        assert!((point.latitude - 37.7749).abs() < 1e-9, "got {}", point.latitude);
        assert_eq!(point.longitude, 10.0);
    }

    #[test]
    fn test_lowercase_hemisphere_reference() {
        let bytes = tiff_with_raw_latitude(12, 30, 0, "s");
        let point = ExifLocationExtractor.extract(&bytes).unwrap();
        assert_eq!(point.latitude, -12.5);
    }

    #[test]
    fn test_no_gps_is_absent() {
        assert_eq!(ExifLocationExtractor.extract(&tiff_without_gps()), None);
    }

    #[test]
    fn test_partial_gps_is_absent() {
        assert_eq!(
            ExifLocationExtractor.extract(&tiff_with_latitude_only(37.7749)),
            None
        );
    }

    #[test]
    fn test_out_of_range_latitude_is_absent() {
        assert_eq!(
            ExifLocationExtractor.extract(&tiff_with_raw_latitude(120, 0, 0, "N")),
            None
        );
    }

    #[test]
    fn test_malformed_bytes_are_absent() {
        assert_eq!(ExifLocationExtractor.extract(b"definitely not an image"), None);
        assert_eq!(ExifLocationExtractor.extract(&[]), None);
        // JPEG SOI marker followed by garbage.
        assert_eq!(
            ExifLocationExtractor.extract(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00]),
            None
        );
    }
}
