use foundation::math::{Quat, Vec3};
use scene::components::{Segment, Transform};

use crate::area::{EARTH_RADIUS_KM, theta_from_area};
use crate::descriptor::CapDescriptor;
use crate::edges::{DEFAULT_CREASE_DEG, edge_skeleton};
use crate::facing::AzimuthRange;
use crate::patch::{PatchResolution, PatchSpec, SpherePatch};
use crate::placement::{Placement, place_cap};

/// Renderable geometry derived from one [`CapDescriptor`].
///
/// Edges are in the cap-local east-north-up frame (pole on +Z, apex at the
/// origin); use [`ProjectedCap::transform`] to bring them into world space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCap {
    pub cap_radius: f64,
    pub opening_angle: f64,
    pub wedge: AzimuthRange,
    pub boundary_edges: Vec<Segment>,
    pub wedge_edges: Vec<Segment>,
    pub placement: Placement,
}

impl ProjectedCap {
    pub fn center_position(&self) -> Vec3 {
        self.placement.center
    }

    pub fn orientation(&self) -> Quat {
        self.placement.orientation
    }

    pub fn transform(&self) -> Transform {
        self.placement.transform()
    }

    /// Boundary edges mapped into world space.
    pub fn world_boundary_edges(&self) -> Vec<Segment> {
        let t = self.transform();
        self.boundary_edges
            .iter()
            .map(|[a, b]| [t.apply(*a), t.apply(*b)])
            .collect()
    }

    /// Wedge edges mapped into world space.
    pub fn world_wedge_edges(&self) -> Vec<Segment> {
        let t = self.transform();
        self.wedge_edges
            .iter()
            .map(|[a, b]| [t.apply(*a), t.apply(*b)])
            .collect()
    }
}

/// Turns cap descriptors into [`ProjectedCap`]s on a reference sphere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CapProjector {
    pub sphere_radius: f64,
    pub resolution: PatchResolution,
    pub crease_deg: f64,
}

impl Default for CapProjector {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_KM)
    }
}

impl CapProjector {
    pub fn new(sphere_radius: f64) -> Self {
        Self {
            sphere_radius,
            resolution: PatchResolution::default(),
            crease_deg: DEFAULT_CREASE_DEG,
        }
    }

    pub fn with_resolution(mut self, resolution: PatchResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Opening angle for `descriptor`'s area preset on the reference sphere.
    pub fn opening_angle(&self, descriptor: &CapDescriptor) -> f64 {
        theta_from_area(descriptor.area_class.area_km2(), self.sphere_radius)
    }

    pub fn boundary_edges(&self, cap_radius: f64, opening_angle: f64) -> Vec<Segment> {
        self.patch_edges(cap_radius, opening_angle, AzimuthRange::FULL)
    }

    /// The wedge keeps the full cap's polar range and narrows only the azimuth.
    pub fn wedge_edges(&self, cap_radius: f64, opening_angle: f64, wedge: AzimuthRange) -> Vec<Segment> {
        self.patch_edges(cap_radius, opening_angle, wedge)
    }

    pub fn project(&self, descriptor: &CapDescriptor) -> ProjectedCap {
        let opening_angle = self.opening_angle(descriptor);
        let cap_radius = descriptor.cap_radius(self.sphere_radius);
        let wedge = descriptor.facing.wedge();

        ProjectedCap {
            cap_radius,
            opening_angle,
            wedge,
            boundary_edges: self.boundary_edges(cap_radius, opening_angle),
            wedge_edges: self.wedge_edges(cap_radius, opening_angle, wedge),
            placement: place_cap(descriptor.latitude, descriptor.longitude, cap_radius),
        }
    }

    pub fn project_all<'a>(
        &self,
        descriptors: impl IntoIterator<Item = &'a CapDescriptor>,
    ) -> Vec<ProjectedCap> {
        descriptors.into_iter().map(|d| self.project(d)).collect()
    }

    fn patch_edges(&self, cap_radius: f64, opening_angle: f64, azimuth: AzimuthRange) -> Vec<Segment> {
        let spec = PatchSpec::cap(cap_radius, opening_angle, azimuth, self.resolution);
        edge_skeleton(&SpherePatch::build(&spec), self.crease_deg)
    }
}
