pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points given in degrees,
/// assuming a spherical earth.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();

    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        for (lat, lon) in [(0.0, 0.0), (31.7917, -7.0926), (-89.9, 179.9), (48.85, 2.35)] {
            assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((31.79, -7.09), (31.80, -7.10)),
            ((52.52, 13.405), (48.8566, 2.3522)),
            ((-33.86, 151.2), (40.71, -74.0)),
        ];

        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let forward = haversine_distance(lat1, lon1, lat2, lon2);
            let backward = haversine_distance(lat2, lon2, lat1, lon1);
            assert!((forward - backward).abs() < 1e-9);
        }
    }

    #[test]
    fn test_one_degree_at_equator() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 1.0);

        assert!((distance - 111_195.0).abs() < 1.0);
        assert!((distance - PI * EARTH_RADIUS_METERS / 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_berlin_paris() {
        let distance = haversine_distance(52.5200, 13.4050, 48.8566, 2.3522);

        assert!((distance - 878_000.0).abs() < 10_000.0);
    }
}
