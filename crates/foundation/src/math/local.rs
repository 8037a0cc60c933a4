use super::{Quat, Vec3};

/// Local East-North-Up frame at a point on a sphere centered at the origin.
///
/// World frame is Z-up with latitude 0, longitude 0 on +X. At the poles
/// `east` is still taken from the longitude, so `north` continues the
/// meridian of that longitude across the pole.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnuFrame {
    pub east: Vec3,
    pub north: Vec3,
    pub up: Vec3,
}

impl EnuFrame {
    pub fn at_lat_lon_deg(lat_deg: f64, lon_deg: f64) -> Self {
        let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
        let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();

        Self {
            east: Vec3::new(-sin_lon, cos_lon, 0.0),
            north: Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
            up: Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
        }
    }

    /// Rotation taking +X, +Y, +Z onto east, north, up.
    pub fn orientation(&self) -> Quat {
        Quat::from_basis(self.east, self.north, self.up)
    }

    /// Unit tangent pointing along compass `bearing_rad` (clockwise from north).
    pub fn bearing(&self, bearing_rad: f64) -> Vec3 {
        let (s, c) = bearing_rad.sin_cos();
        self.east.scale(s) + self.north.scale(c)
    }

    /// Components of a world-space direction along east, north, up.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        Vec3::new(world.dot(self.east), world.dot(self.north), world.dot(self.up))
    }
}
