use caps::{AreaClass, Facing};
use scene::components::Segment;
use serde::Serialize;

use crate::viewer::Viewer;

type Point = [f64; 3];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub frame: u64,
    pub sphere_radius_km: f64,
    pub viewer: ViewerReport,
    pub caps: Vec<CapReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerReport {
    pub aspect: f64,
    pub fov_y_deg: f64,
    pub camera_distance_km: f64,
    /// Column-major perspective projection.
    pub projection: [[f32; 4]; 4],
    pub globe_rotation_rad: f64,
    pub background_color: String,
    pub wireframe_color: String,
    pub rotate_sphere: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapReport {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub area_class: AreaClass,
    pub facing: Facing,
    pub cap_radius: f64,
    pub opening_angle: f64,
    pub center: Point,
    /// `[x, y, z, w]`.
    pub orientation: [f64; 4],
    /// `[start, end]` in radians.
    pub wedge_azimuth: [f64; 2],
    pub boundary_edge_count: usize,
    pub wedge_edge_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeReport>,
}

/// World-space line segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeReport {
    pub boundary: Vec<[Point; 2]>,
    pub wedge: Vec<[Point; 2]>,
}

fn points(segments: &[Segment]) -> Vec<[Point; 2]> {
    segments
        .iter()
        .map(|[a, b]| [a.as_array(), b.as_array()])
        .collect()
}

impl Report {
    /// Snapshot of `viewer`; `with_edges` adds every cap's world-space edges.
    pub fn capture(viewer: &Viewer, with_edges: bool) -> Self {
        let camera = viewer.camera();
        let settings = viewer.settings();

        let caps = viewer
            .layer()
            .projected()
            .iter()
            .filter_map(|(id, cap)| {
                let descriptor = viewer.caps().get(*id)?;
                Some(CapReport {
                    id: id.to_string(),
                    latitude: descriptor.latitude,
                    longitude: descriptor.longitude,
                    altitude: descriptor.altitude,
                    area_class: descriptor.area_class,
                    facing: descriptor.facing,
                    cap_radius: cap.cap_radius,
                    opening_angle: cap.opening_angle,
                    center: cap.center_position().as_array(),
                    orientation: cap.orientation().as_array(),
                    wedge_azimuth: [cap.wedge.start, cap.wedge.end()],
                    boundary_edge_count: cap.boundary_edges.len(),
                    wedge_edge_count: cap.wedge_edges.len(),
                    edges: with_edges.then(|| EdgeReport {
                        boundary: points(&cap.world_boundary_edges()),
                        wedge: points(&cap.world_wedge_edges()),
                    }),
                })
            })
            .collect();

        Self {
            frame: viewer.frame().index,
            sphere_radius_km: viewer.projector().sphere_radius,
            viewer: ViewerReport {
                aspect: camera.aspect,
                fov_y_deg: camera.fov_y_deg,
                camera_distance_km: camera.distance(),
                projection: camera.projection_matrix(),
                globe_rotation_rad: viewer.globe_rotation(),
                background_color: settings.background.to_hex(),
                wireframe_color: settings.wireframe.to_hex(),
                rotate_sphere: settings.rotate_sphere,
            },
            caps,
        }
    }
}
