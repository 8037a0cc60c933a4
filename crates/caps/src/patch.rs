//! Sphere-surface patches.
//!
//! A patch is the part of a sphere swept over an azimuth interval and a polar
//! interval, tessellated on a regular `(width + 1) × (height + 1)` vertex grid.
//! Patches are built in a cap-local frame:
//! - the pole (polar angle 0) lies on +Z,
//! - azimuth is a compass bearing: 0 lies on +Y (north) and it grows toward
//!   +X (east), so with +Z up the frame is local east-north-up,
//! - the local origin is the pole point itself, so the patch's own sphere
//!   center sits at `(0, 0, -radius)`.

use std::f64::consts::PI;

use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::facing::AzimuthRange;

pub const MIN_WIDTH_SEGMENTS: u32 = 3;
pub const MIN_HEIGHT_SEGMENTS: u32 = 2;

/// Grid resolution of a patch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchResolution {
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PatchResolution {
    fn default() -> Self {
        Self {
            width_segments: 32,
            height_segments: 16,
        }
    }
}

impl PatchResolution {
    pub fn new(width_segments: u32, height_segments: u32) -> Self {
        Self {
            width_segments,
            height_segments,
        }
    }

    /// Raises each count to the smallest grid that still forms triangles.
    pub fn clamped(self) -> Self {
        Self::new(
            self.width_segments.max(MIN_WIDTH_SEGMENTS),
            self.height_segments.max(MIN_HEIGHT_SEGMENTS),
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PatchSpec {
    pub radius: f64,
    pub azimuth: AzimuthRange,
    pub polar_start: f64,
    pub polar_length: f64,
    pub resolution: PatchResolution,
}

impl PatchSpec {
    /// Patch starting at the pole and reaching `opening_angle` down.
    pub fn cap(radius: f64, opening_angle: f64, azimuth: AzimuthRange, resolution: PatchResolution) -> Self {
        Self {
            radius,
            azimuth,
            polar_start: 0.0,
            polar_length: opening_angle,
            resolution,
        }
    }

    pub fn polar_end(&self) -> f64 {
        self.polar_start + self.polar_length
    }
}

/// Indexed triangle mesh of a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpherePatch {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl SpherePatch {
    pub fn build(spec: &PatchSpec) -> Self {
        let res = spec.resolution.clamped();
        let (w, h) = (res.width_segments, res.height_segments);
        let stride = w + 1;
        let center = Vec3::new(0.0, 0.0, -spec.radius);

        let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
        for iy in 0..=h {
            let v = iy as f64 / h as f64;
            let polar = spec.polar_start + v * spec.polar_length;
            let (sin_p, cos_p) = polar.sin_cos();
            for ix in 0..=w {
                let u = ix as f64 / w as f64;
                let azimuth = spec.azimuth.start + u * spec.azimuth.length;
                let (sin_a, cos_a) = azimuth.sin_cos();
                let on_sphere = Vec3::new(sin_p * sin_a, sin_p * cos_a, cos_p).scale(spec.radius);
                vertices.push(on_sphere + center);
            }
        }

        let at = |ix: u32, iy: u32| iy * stride + ix;
        let touches_top = spec.polar_start <= 0.0;
        let touches_bottom = spec.polar_end() >= PI;

        let mut triangles = Vec::with_capacity((2 * w * h) as usize);
        for iy in 0..h {
            for ix in 0..w {
                let a = at(ix + 1, iy);
                let b = at(ix, iy);
                let c = at(ix, iy + 1);
                let d = at(ix + 1, iy + 1);

                // The row at a pole collapses to a point; its first triangle is degenerate.
                if iy != 0 || !touches_top {
                    triangles.push([a, b, d]);
                }
                if iy != h - 1 || !touches_bottom {
                    triangles.push([b, c, d]);
                }
            }
        }

        Self {
            vertices,
            triangles,
        }
    }

    pub fn triangle_positions(&self, tri: [u32; 3]) -> [Vec3; 3] {
        tri.map(|i| self.vertices[i as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::{PatchResolution, PatchSpec, SpherePatch};
    use crate::facing::AzimuthRange;
    use foundation::math::Vec3;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn grid_size_and_triangle_count() {
        let spec = PatchSpec::cap(1.0, FRAC_PI_2, AzimuthRange::FULL, PatchResolution::default());
        let patch = SpherePatch::build(&spec);
        assert_eq!(patch.vertices.len(), 33 * 17);
        // Top row skips one triangle per quad; the bottom row stays above the south pole.
        assert_eq!(patch.triangles.len(), 2 * 32 * 16 - 32);
    }

    #[test]
    fn full_sphere_skips_both_pole_rows() {
        let spec = PatchSpec::cap(1.0, PI, AzimuthRange::FULL, PatchResolution::new(8, 4));
        let patch = SpherePatch::build(&spec);
        assert_eq!(patch.triangles.len(), 2 * 8 * 4 - 2 * 8);
    }

    #[test]
    fn vertices_lie_on_sphere_around_shifted_center() {
        let radius = 6381.0;
        let spec = PatchSpec::cap(radius, 0.3, AzimuthRange::FULL, PatchResolution::default());
        let patch = SpherePatch::build(&spec);
        let center = Vec3::new(0.0, 0.0, -radius);
        for v in &patch.vertices {
            assert_close((*v - center).length(), radius, 1e-9);
        }
        // Apex is the local origin.
        assert_eq!(patch.vertices[0], Vec3::ZERO);
    }

    #[test]
    fn wedge_vertices_stay_inside_azimuth_range() {
        let wedge = AzimuthRange {
            start: 2.0 * FRAC_PI_4,
            length: FRAC_PI_4,
        };
        let spec = PatchSpec::cap(10.0, 0.5, wedge, PatchResolution::new(4, 2));
        let patch = SpherePatch::build(&spec);
        for v in patch.vertices.iter().filter(|v| v.x.hypot(v.y) > 1e-9) {
            let az = v.x.atan2(v.y);
            assert!(az >= wedge.start - 1e-12 && az <= wedge.end() + 1e-12, "azimuth {az}");
        }
    }

    #[test]
    fn azimuth_zero_is_north_and_grows_east() {
        let spec = PatchSpec::cap(1.0, FRAC_PI_2, AzimuthRange::FULL, PatchResolution::new(4, 2));
        let patch = SpherePatch::build(&spec);
        // Rim row: ix = 0 is bearing 0, ix = 1 is bearing π/2.
        let rim = 2 * 5;
        let north = patch.vertices[rim];
        let east = patch.vertices[rim + 1];
        assert_close(north.x, 0.0, 1e-12);
        assert_close(north.y, 1.0, 1e-12);
        assert_close(east.x, 1.0, 1e-12);
        assert_close(east.y, 0.0, 1e-12);
    }

    #[test]
    fn tiny_resolution_is_clamped() {
        let spec = PatchSpec::cap(1.0, 0.2, AzimuthRange::FULL, PatchResolution::new(0, 0));
        let patch = SpherePatch::build(&spec);
        assert_eq!(patch.vertices.len(), 4 * 3);
    }
}
