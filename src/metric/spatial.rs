use crate::record::Record;

/// Mean radius for the spherical Earth approximation, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two `[longitude, latitude]` pairs in degrees
///
/// # Returns
/// Distance in kilometers on a sphere of radius [`EARTH_RADIUS_KM`]
pub fn haversine_km(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let [lng1, lat1] = p1;
    let [lng2, lat2] = p2;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let sin_d_lat = (d_lat / 2.0).sin();
    let sin_d_lng = (d_lng / 2.0).sin();

    let cos_product = lat1.to_radians().cos() * lat2.to_radians().cos();
    let a = sin_d_lat * sin_d_lat + sin_d_lng * sin_d_lng * cos_product;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Spatial distance between two records in kilometers
///
/// If either record is missing a coordinate the records are treated as
/// co-located (distance 0), so malformed rows are never filtered out by the
/// spatial test.
pub fn spatial_km(a: &Record, b: &Record) -> f64 {
    match (a.coordinates(), b.coordinates()) {
        (Some((lng1, lat1)), Some((lng2, lat2))) => haversine_km([lng1, lat1], [lng2, lat2]),
        _ => 0.0,
    }
}
