use foundation::math::{EnuFrame, Quat, Spherical, Vec3};
use scene::components::Transform;

/// Axis the cap patch is built around in its local frame.
pub const CAP_POLE_AXIS: Vec3 = Vec3::Z;

/// Where a cap sits on its sphere and how it is turned.
///
/// The cap-local frame is east-north-up at the cap's lat/lon: local +X is
/// east, +Y is north and [`CAP_POLE_AXIS`] is the outward radial.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    /// Point on the sphere of radius `cap_radius` at the cap's lat/lon.
    pub center: Vec3,
    /// Outward unit normal at `center`.
    pub radial: Vec3,
    /// Local tangent directions at `center`.
    pub frame: EnuFrame,
    /// Takes local +X, +Y, +Z onto east, north and `radial`.
    pub orientation: Quat,
}

impl Placement {
    pub fn transform(&self) -> Transform {
        Transform::new(self.center, self.orientation)
    }
}

/// Places a cap centered at `lat_deg`/`lon_deg` on a sphere of `cap_radius`
/// centered at the origin.
///
/// At the poles north follows the meridian of `lon_deg`.
pub fn place_cap(lat_deg: f64, lon_deg: f64, cap_radius: f64) -> Placement {
    let center = Spherical::from_lat_lon_deg(lat_deg, lon_deg, cap_radius).to_vec3();
    let frame = EnuFrame::at_lat_lon_deg(lat_deg, lon_deg);
    Placement {
        center,
        radial: frame.up,
        frame,
        orientation: frame.orientation(),
    }
}

#[cfg(test)]
mod tests {
    use super::{CAP_POLE_AXIS, place_cap};
    use foundation::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let diff = (a - b).length();
        assert!(diff <= eps, "expected {a:?} ~= {b:?} (diff {diff})");
    }

    #[test]
    fn equator_prime_meridian_points_along_plus_x() {
        let p = place_cap(0.0, 0.0, 6381.0);
        assert_vec_close(p.radial, Vec3::X, 1e-12);
        assert_vec_close(p.center, Vec3::new(6381.0, 0.0, 0.0), 1e-9);
        assert_vec_close(p.orientation.rotate(CAP_POLE_AXIS), Vec3::X, 1e-9);
        // Local east and north land on world +Y and +Z.
        assert_vec_close(p.orientation.rotate(Vec3::X), Vec3::Y, 1e-9);
        assert_vec_close(p.orientation.rotate(Vec3::Y), Vec3::Z, 1e-9);
    }

    #[test]
    fn center_lies_on_cap_sphere_everywhere() {
        for lat in [-90.0, -45.5, 0.0, 29.749907, 90.0] {
            for lon in [-180.0, -95.358421, 0.0, 77.0, 180.0] {
                for altitude in [0.0, 10.0, 10_000.0] {
                    let cap_radius = 6371.0 + altitude;
                    let p = place_cap(lat, lon, cap_radius);
                    assert_close(p.center.length(), cap_radius, 1e-9 * cap_radius);
                    assert_close(p.radial.length(), 1.0, 1e-12);
                    assert_vec_close(p.radial, p.center.normalize_or_zero(), 1e-9);
                    assert_vec_close(p.orientation.rotate(CAP_POLE_AXIS), p.radial, 1e-9);
                }
            }
        }
    }

    #[test]
    fn local_north_points_toward_the_north_pole() {
        for (lat, lon) in [(29.749907, -95.358421), (34.052235, -118.243683), (-33.9, 151.2)] {
            let p = place_cap(lat, lon, 1.0);
            let north = p.orientation.rotate(Vec3::Y);
            // Stepping north from the center raises world z.
            assert!(north.z > 0.0, "({lat}, {lon}): north {north:?}");
            assert_close(north.dot(p.radial), 0.0, 1e-12);
            // East is north × up, i.e. counter-clockwise about the world pole.
            let east = p.orientation.rotate(Vec3::X);
            assert_vec_close(east, north.cross(p.radial), 1e-12);
            assert!(Vec3::Z.cross(p.radial).dot(east) > 0.0);
        }
    }

    #[test]
    fn poles_take_north_from_the_longitude() {
        let lon: f64 = 30.0;
        let (s, c) = lon.to_radians().sin_cos();

        let p = place_cap(90.0, lon, 1.0);
        assert_vec_close(p.orientation.rotate(Vec3::Z), Vec3::Z, 1e-9);
        assert_vec_close(p.orientation.rotate(Vec3::Y), Vec3::new(-c, -s, 0.0), 1e-9);

        let p = place_cap(-90.0, lon, 1.0);
        assert_vec_close(p.orientation.rotate(Vec3::Z), -Vec3::Z, 1e-9);
        assert_vec_close(p.orientation.rotate(Vec3::Y), Vec3::new(c, s, 0.0), 1e-9);
    }

    #[test]
    fn transform_moves_local_origin_to_center() {
        let p = place_cap(34.052235, -118.243683, 6391.0);
        assert_vec_close(p.transform().apply(Vec3::ZERO), p.center, 1e-9);
    }
}
