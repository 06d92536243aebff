//! Great-circle distance on a spherical Earth.

use atacado_core::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
#[must_use]
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = point(-30.0331, -51.23);
        assert!(haversine_distance(p, p).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = point(-30.0331, -51.23);
        let b = point(-29.1678, -51.1794);
        let ab = haversine_distance(a, b);
        let ba = haversine_distance(b, a);
        assert!((ab - ba).abs() < 1e-9, "ab={ab} ba={ba}");
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        // One degree of arc on a 6371 km sphere is ~111.19 km.
        let d = haversine_distance(point(0.0, 0.0), point(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn porto_alegre_to_caxias_do_sul() {
        // Roughly 96 km apart as the crow flies.
        let d = haversine_distance(point(-30.0331, -51.23), point(-29.1678, -51.1794));
        assert!(d > 90.0 && d < 105.0, "got {d}");
    }
}
