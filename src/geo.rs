//! Great-circle geometry on a spherical Earth
//!
//! Pure helpers shared by both edge-discovery strategies and the metric
//! calculator. Accuracy beyond the spherical approximation is a non-goal.

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers spanned by one degree of latitude (PI * R / 180)
pub const KM_PER_DEGREE_LAT: f64 = 111.194_926_644_558_74;

/// Great-circle (haversine) distance between two coordinates, in kilometers
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Degrees of latitude spanned by `km` kilometers
pub fn latitude_degrees_for_km(km: f64) -> f64 {
    km / KM_PER_DEGREE_LAT
}

/// Degrees of longitude spanned by `km` kilometers at latitude `lat_deg`
///
/// East-west kilometers per degree shrink by cos(latitude); the caller is
/// responsible for keeping `lat_deg` away from the poles where the
/// correction diverges.
pub fn longitude_degrees_for_km(km: f64, lat_deg: f64) -> f64 {
    km / (KM_PER_DEGREE_LAT * lat_deg.to_radians().cos())
}
