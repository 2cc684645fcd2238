//! Great-circle geometry on a spherical Earth.
//!
//! Ellipsoid effects are ignored; at the arrival tolerances used by the
//! control loops the spherical error is far below a metre.

use crate::entities::GeoPoint;

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.009;

const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

/// Great-circle distance in metres.
///
/// Uses the spherical Vincenty form, which stays well-conditioned for both
/// tiny and antipodal separations.
pub fn distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lon1) = (from.latitude.to_radians(), from.longitude.to_radians());
    let (lat2, lon2) = (to.latitude.to_radians(), to.longitude.to_radians());
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_lat2, cos_lat2) = lat2.sin_cos();
    let (sin_dlon, cos_dlon) = (lon2 - lon1).sin_cos();

    let y = ((cos_lat2 * sin_dlon).powi(2)
        + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon).powi(2))
    .sqrt();
    let x = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

    EARTH_RADIUS_M * y.atan2(x)
}

/// Initial great-circle bearing from `from` to `to`, in degrees `[0, 360)`.
pub fn initial_bearing_deg(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let x = dlon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    normalize_deg(x.atan2(y).to_degrees())
}

/// Point reached after travelling `distance_m` metres along `bearing_deg`.
pub fn destination(from: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let lat1 = from.latitude.to_radians();
    let lon1 = from.longitude.to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(
        lat2.to_degrees(),
        (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
    )
}

/// Folds any angle into `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    let normalized = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: GeoPoint = GeoPoint::new(0.0, 0.0);

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_m(ORIGIN, GeoPoint::new(1.0, 0.0));
        assert!((d - 111_195.08).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GeoPoint::new(63.197640, 75.453721);
        assert!(distance_m(p, p) < 1e-9);
    }

    #[test]
    fn test_cardinal_bearings() {
        let cases = [
            (GeoPoint::new(1.0, 0.0), 0.0),
            (GeoPoint::new(0.0, 1.0), 90.0),
            (GeoPoint::new(-1.0, 0.0), 180.0),
            (GeoPoint::new(0.0, -1.0), 270.0),
        ];
        for (to, expected) in cases {
            let bearing = initial_bearing_deg(ORIGIN, to);
            assert!((bearing - expected).abs() < 1e-9, "{to}: {bearing}");
        }
    }

    #[test]
    fn test_destination_lands_at_requested_distance() {
        let start = GeoPoint::new(63.197640, 75.453721);
        let end = destination(start, 45.0, 1_000.0);
        assert!((distance_m(start, end) - 1_000.0).abs() < 1e-3);
        assert!((initial_bearing_deg(start, end) - 45.0).abs() < 0.01);
    }

    #[test]
    fn test_destination_wraps_longitude() {
        let end = destination(GeoPoint::new(0.0, 179.9999), 90.0, 1_000.0);
        assert!(end.longitude < -179.0);
    }

    #[test]
    fn test_normalize_deg() {
        assert_eq!(normalize_deg(370.0), 10.0);
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(360.0), 0.0);
    }
}
