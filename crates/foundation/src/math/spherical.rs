use super::Vec3;

/// Spherical coordinates on a sphere centered at the origin.
///
/// Convention (Z-up):
/// - `polar_rad` is measured from +Z (0 = north pole, π = south pole).
/// - `azimuth_rad` is measured in the XY plane from +X toward +Y.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    pub polar_rad: f64,
    pub azimuth_rad: f64,
}

impl Spherical {
    pub fn new(radius: f64, polar_rad: f64, azimuth_rad: f64) -> Self {
        Self {
            radius,
            polar_rad,
            azimuth_rad,
        }
    }

    /// Geographic latitude/longitude (degrees) on a sphere of `radius`.
    ///
    /// `polar = 90° - latitude`, `azimuth = longitude`.
    pub fn from_lat_lon_deg(lat_deg: f64, lon_deg: f64, radius: f64) -> Self {
        Self::new(radius, (90.0 - lat_deg).to_radians(), lon_deg.to_radians())
    }

    pub fn to_vec3(self) -> Vec3 {
        let (sin_p, cos_p) = self.polar_rad.sin_cos();
        let (sin_a, cos_a) = self.azimuth_rad.sin_cos();
        Vec3::new(
            self.radius * sin_p * cos_a,
            self.radius * sin_p * sin_a,
            self.radius * cos_p,
        )
    }

    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        let polar_rad = (v.z / radius).clamp(-1.0, 1.0).acos();
        let azimuth_rad = v.y.atan2(v.x);
        Self::new(radius, polar_rad, azimuth_rad)
    }

    pub fn lat_deg(self) -> f64 {
        90.0 - self.polar_rad.to_degrees()
    }

    pub fn lon_deg(self) -> f64 {
        self.azimuth_rad.to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::Spherical;
    use crate::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn equator_prime_meridian_is_plus_x() {
        let p = Spherical::from_lat_lon_deg(0.0, 0.0, 6371.0).to_vec3();
        assert_close(p.x, 6371.0, 1e-9);
        assert_close(p.y, 0.0, 1e-9);
        assert_close(p.z, 0.0, 1e-9);
    }

    #[test]
    fn poles_and_90e() {
        let north = Spherical::from_lat_lon_deg(90.0, 123.0, 1.0).to_vec3();
        assert_close(north.z, 1.0, 1e-12);

        let east = Spherical::from_lat_lon_deg(0.0, 90.0, 2.0).to_vec3();
        assert_close(east.x, 0.0, 1e-12);
        assert_close(east.y, 2.0, 1e-12);
    }

    #[test]
    fn round_trip_lat_lon() {
        let s = Spherical::from_lat_lon_deg(34.052235, -118.243683, 6391.0);
        let rt = Spherical::from_vec3(s.to_vec3());
        assert_close(rt.radius, 6391.0, 1e-9);
        assert_close(rt.lat_deg(), 34.052235, 1e-9);
        assert_close(rt.lon_deg(), -118.243683, 1e-9);
    }

    #[test]
    fn from_zero_vector_is_degenerate_not_nan() {
        let s = Spherical::from_vec3(Vec3::ZERO);
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }
}
