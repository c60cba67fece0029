use geo::{HaversineDistance, Point};
use crate::models::BoundingBox;

/// Kilometers covered by one degree of latitude
const KM_PER_DEGREE: f64 = 111.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // geo points are (x = longitude, y = latitude) and distances are meters
    let origin = Point::new(lon1, lat1);
    let destination = Point::new(lon2, lat2);

    origin.haversine_distance(&destination) / 1000.0
}

/// Calculate a bounding box around a center point
///
/// Cheap rectangular pre-filter for the database query; exact distances are
/// checked afterwards. Near the poles or across the antimeridian the box
/// widens to the full longitude range.
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;

    // 1 degree longitude shrinks with cos(latitude)
    let lon_delta = radius_km / (KM_PER_DEGREE * lat.to_radians().cos().abs());

    let (min_lon, max_lon) = if !lon_delta.is_finite()
        || lon - lon_delta < -180.0
        || lon + lon_delta > 180.0
    {
        (-180.0, 180.0)
    } else {
        (lon - lon_delta, lon + lon_delta)
    };

    BoundingBox {
        min_lat: (lat - lat_delta).max(-90.0),
        max_lat: (lat + lat_delta).min(90.0),
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(
    lat: f64,
    lon: f64,
    bbox: &BoundingBox,
) -> bool {
    lat >= bbox.min_lat
        && lat <= bbox.max_lat
        && lon >= bbox.min_lon
        && lon <= bbox.max_lon
}
