//! Geographic primitives for ground-clamped map content.
//!
//! Positions are longitude/latitude in degrees. There is no altitude: every
//! marker sits on the ellipsoid surface and the host clamps it to terrain.

use crate::math::Vec2;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// A geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub const fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// `true` when both components are finite and inside the valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lon_deg.is_finite()
            && self.lat_deg.is_finite()
            && (-180.0..=180.0).contains(&self.lon_deg)
            && (-90.0..=90.0).contains(&self.lat_deg)
    }

    /// East/north offset of `self` from `origin`, in meters.
    ///
    /// Local equirectangular approximation: good for the regional extents a
    /// station view covers, not for antipodal distances.
    pub fn offset_from(&self, origin: LonLat) -> Vec2 {
        let mut dlon = self.lon_deg - origin.lon_deg;
        if dlon > 180.0 {
            dlon -= 360.0;
        } else if dlon < -180.0 {
            dlon += 360.0;
        }
        let dlat = self.lat_deg - origin.lat_deg;
        Vec2::new(
            dlon * meters_per_degree_lon(origin.lat_deg),
            dlat * meters_per_degree_lat(origin.lat_deg),
        )
    }
}

/// Length of one degree of latitude at `lat_deg` (meridional arc).
pub fn meters_per_degree_lat(lat_deg: f64) -> f64 {
    let s = lat_deg.to_radians().sin();
    let m = WGS84_A * (1.0 - WGS84_E2) / (1.0 - WGS84_E2 * s * s).powf(1.5);
    m * std::f64::consts::PI / 180.0
}

/// Length of one degree of longitude at `lat_deg` (parallel arc).
pub fn meters_per_degree_lon(lat_deg: f64) -> f64 {
    let phi = lat_deg.to_radians();
    let s = phi.sin();
    let n = WGS84_A / (1.0 - WGS84_E2 * s * s).sqrt();
    n * phi.cos() * std::f64::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::{LonLat, meters_per_degree_lat, meters_per_degree_lon};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn degree_lengths_at_equator() {
        assert_close(meters_per_degree_lon(0.0), 111_319.49, 0.5);
        assert_close(meters_per_degree_lat(0.0), 110_574.3, 1.0);
    }

    #[test]
    fn longitude_degree_shrinks_toward_poles() {
        assert!(meters_per_degree_lon(60.0) < meters_per_degree_lon(30.0));
        assert_close(meters_per_degree_lon(90.0), 0.0, 1e-6);
    }

    #[test]
    fn validity_rejects_out_of_range_and_nan() {
        assert!(LonLat::new(85.0, 41.5).is_valid());
        assert!(LonLat::new(-180.0, 90.0).is_valid());
        assert!(!LonLat::new(181.0, 0.0).is_valid());
        assert!(!LonLat::new(0.0, -90.5).is_valid());
        assert!(!LonLat::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn offset_wraps_across_antimeridian() {
        let origin = LonLat::new(179.5, 0.0);
        let east = LonLat::new(-179.5, 0.0).offset_from(origin);
        assert!(east.x > 0.0);
        assert_close(east.x, meters_per_degree_lon(0.0), 1.0);
        assert_close(east.y, 0.0, 1e-9);
    }
}
