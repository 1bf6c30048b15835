//! Great-circle distance between WGS84 points.

/// Mean earth radius in meters used for all merge-threshold comparisons.
pub const EARTH_RADIUS_M: f64 = 6_372_795.477598;

/// Haversine distance in meters between two points given in decimal degrees.
pub fn dist_gps(lat_from: f64, lon_from: f64, lat_to: f64, lon_to: f64) -> f64 {
    dist_gps_with_radius(lat_from, lon_from, lat_to, lon_to, EARTH_RADIUS_M)
}

/// Haversine distance scaled by an explicit sphere radius.
/// The result has the same unit as `radius`.
pub fn dist_gps_with_radius(
    lat_from: f64,
    lon_from: f64,
    lat_to: f64,
    lon_to: f64,
    radius: f64,
) -> f64 {
    let lat_from = lat_from.to_radians();
    let lon_from = lon_from.to_radians();
    let lat_to = lat_to.to_radians();
    let lon_to = lon_to.to_radians();

    let lat_delta = lat_to - lat_from;
    let lon_delta = lon_to - lon_from;

    let angle = 2.0
        * ((lat_delta / 2.0).sin().powi(2)
            + lat_from.cos() * lat_to.cos() * (lon_delta / 2.0).sin().powi(2))
        .sqrt()
        .asin();

    angle * radius
}

/// Format coordinates as "50.0870°N, 14.4210°E".
pub fn format_coords(lat: f64, lon: f64) -> String {
    let lat_dir = if lat >= 0.0 { "N" } else { "S" };
    let lon_dir = if lon >= 0.0 { "E" } else { "W" };
    format!("{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", lat.abs(), lat_dir, lon.abs(), lon_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(dist_gps(50.087, 14.421, 50.087, 14.421), 0.0);
        assert_eq!(dist_gps(-33.8688, 151.2093, -33.8688, 151.2093), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let ab = dist_gps(50.087, 14.421, 49.195, 16.608);
        let ba = dist_gps(49.195, 16.608, 50.087, 14.421);
        assert_abs_diff_eq!(ab, ba, epsilon = 1e-6);
    }

    #[test]
    fn test_prague_old_town_short_hop() {
        let d = dist_gps(50.087, 14.421, 50.088, 14.422);
        assert!(d > 100.0 && d < 150.0, "got {}", d);
    }

    #[test]
    fn test_prague_brno() {
        let d = dist_gps(50.087, 14.421, 49.195, 16.608);
        assert!(d > 170_000.0 && d < 200_000.0, "got {}", d);
    }

    #[test]
    fn test_quarter_meridian() {
        // Equator to pole is a quarter of the circumference.
        let d = dist_gps(0.0, 0.0, 90.0, 0.0);
        assert_abs_diff_eq!(d, EARTH_RADIUS_M * std::f64::consts::FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn test_custom_radius_in_km() {
        let m = dist_gps(59.3293, 18.0686, 59.9139, 10.7522);
        let km = dist_gps_with_radius(59.3293, 18.0686, 59.9139, 10.7522, EARTH_RADIUS_M / 1000.0);
        assert_abs_diff_eq!(m / 1000.0, km, epsilon = 1e-6);
    }

    #[test]
    fn test_format_coords() {
        assert_eq!(format_coords(50.087, 14.421), "50.0870°N, 14.4210°E");
        assert_eq!(format_coords(-33.8688, -70.5), "33.8688°S, 70.5000°W");
    }
}
