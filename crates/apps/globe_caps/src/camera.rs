//! Perspective camera orbiting the globe.

/// Vertical field of view (degrees).
pub const FOV_Y_DEG: f64 = 75.0;
/// Near clip plane (km).
pub const NEAR_KM: f64 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Width / height of the viewport.
    pub aspect: f64,
    /// Eye distance from the globe center (km).
    distance: f64,
    min_distance: f64,
    max_distance: f64,
}

impl Camera {
    /// Camera for a globe of `radius`: starts two radii out, far plane at 200
    /// radii, orbit limited to `[radius + 1, 100 · radius]`.
    pub fn for_globe(radius: f64, width: f64, height: f64) -> Self {
        let mut camera = Self {
            fov_y_deg: FOV_Y_DEG,
            near: NEAR_KM,
            far: radius * 200.0,
            aspect: 1.0,
            distance: radius * 2.0,
            min_distance: radius + 1.0,
            max_distance: radius * 100.0,
        };
        camera.resize(width, height);
        camera
    }

    /// Updates the projection for a new viewport size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.aspect = width.max(1.0) / height.max(1.0);
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range,
    /// column-major.
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        let f = 1.0 / (0.5 * self.fov_y_deg.to_radians()).tan();
        let (near, far) = (self.near, self.far);
        [
            [(f / self.aspect) as f32, 0.0, 0.0, 0.0],
            [0.0, f as f32, 0.0, 0.0],
            [0.0, 0.0, (far / (near - far)) as f32, -1.0],
            [0.0, 0.0, ((near * far) / (near - far)) as f32, 0.0],
        ]
    }
}
