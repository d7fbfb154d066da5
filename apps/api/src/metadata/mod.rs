pub mod geolocation;

pub use geolocation::{ExifLocationExtractor, GeoPoint, LocationExtractor};
