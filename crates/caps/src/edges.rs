//! Edge skeleton of a triangle mesh.
//!
//! Keeps the edges a wireframe viewer would draw: open borders, plus creases
//! where neighbouring faces meet at an angle of at least a threshold. Shared
//! edges between (nearly) coplanar faces disappear, so quad diagonals never
//! show and a very flat cap reduces to its rim.

use std::collections::HashMap;

use foundation::math::Vec3;
use scene::components::Segment;

use crate::patch::SpherePatch;

/// Default crease threshold in degrees.
pub const DEFAULT_CREASE_DEG: f64 = 1.0;

/// Vertices closer than this (per axis) are welded together.
const WELD_SCALE: f64 = 1e4;

type VertexKey = (i64, i64, i64);

#[derive(Debug, Clone, Copy)]
struct OpenEdge {
    from: Vec3,
    to: Vec3,
    normal: Vec3,
}

fn weld_key(v: Vec3) -> VertexKey {
    (
        (v.x * WELD_SCALE).round() as i64,
        (v.y * WELD_SCALE).round() as i64,
        (v.z * WELD_SCALE).round() as i64,
    )
}

fn face_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    (c - b).cross(a - b).normalize_or_zero()
}

/// Extracts border and crease edges from `patch`.
///
/// Output order is deterministic: creases in the order their second face is
/// visited, then border edges in the order they were first seen.
pub fn edge_skeleton(patch: &SpherePatch, crease_deg: f64) -> Vec<Segment> {
    let crease_dot = crease_deg.to_radians().cos();

    // Directed edge -> slot; `None` once the edge has been paired with its twin.
    let mut index: HashMap<(VertexKey, VertexKey), usize> = HashMap::new();
    let mut pending: Vec<Option<OpenEdge>> = Vec::new();
    let mut out = Vec::new();

    for &tri in &patch.triangles {
        let positions = patch.triangle_positions(tri);
        let keys = positions.map(weld_key);
        if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
            continue;
        }
        let normal = face_normal(positions);

        for j in 0..3 {
            let k = (j + 1) % 3;
            let (from_key, to_key) = (keys[j], keys[k]);

            if let Some(&slot) = index.get(&(to_key, from_key))
                && let Some(twin) = pending[slot].take()
            {
                if normal.dot(twin.normal) <= crease_dot {
                    out.push([twin.from, twin.to]);
                }
                continue;
            }

            index.entry((from_key, to_key)).or_insert_with(|| {
                pending.push(Some(OpenEdge {
                    from: positions[j],
                    to: positions[k],
                    normal,
                }));
                pending.len() - 1
            });
        }
    }

    out.extend(pending.into_iter().flatten().map(|e| [e.from, e.to]));
    out
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CREASE_DEG, edge_skeleton};
    use crate::facing::AzimuthRange;
    use crate::patch::{PatchResolution, PatchSpec, SpherePatch};
    use foundation::math::Vec3;

    fn flat_quad() -> SpherePatch {
        SpherePatch {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    #[test]
    fn coplanar_diagonal_is_dropped() {
        let edges = edge_skeleton(&flat_quad(), DEFAULT_CREASE_DEG);
        assert_eq!(edges.len(), 4);
        let diagonal = edges
            .iter()
            .any(|[a, b]| (*a == Vec3::ZERO && *b == Vec3::new(1.0, 1.0, 0.0))
                || (*b == Vec3::ZERO && *a == Vec3::new(1.0, 1.0, 0.0)));
        assert!(!diagonal);
    }

    #[test]
    fn folded_quad_keeps_crease() {
        let mut quad = flat_quad();
        quad.vertices[3] = Vec3::new(0.0, 1.0, 1.0);
        let edges = edge_skeleton(&quad, DEFAULT_CREASE_DEG);
        assert_eq!(edges.len(), 5);
    }

    #[test]
    fn degenerate_triangles_are_ignored() {
        let patch = SpherePatch {
            vertices: vec![Vec3::ZERO, Vec3::ZERO, Vec3::X],
            triangles: vec![[0, 1, 2]],
        };
        assert!(edge_skeleton(&patch, DEFAULT_CREASE_DEG).is_empty());
    }

    #[test]
    fn hemisphere_shows_grid_without_diagonals() {
        let radius = 100.0;
        let spec = PatchSpec::cap(
            radius,
            std::f64::consts::FRAC_PI_2,
            AzimuthRange::FULL,
            PatchResolution::default(),
        );
        let patch = SpherePatch::build(&spec);
        let edges = edge_skeleton(&patch, DEFAULT_CREASE_DEG);

        // Every kept edge runs along a grid line: either both endpoints share a
        // polar row (ring) or they share an azimuth column (meridian).
        let center = Vec3::new(0.0, 0.0, -radius);
        for [a, b] in &edges {
            let (pa, pb) = (*a - center, *b - center);
            let same_row = (pa.z - pb.z).abs() < 1e-6;
            let same_col = pa.x * pb.y - pa.y * pb.x;
            assert!(same_row || same_col.abs() < 1e-6, "diagonal edge {a:?} -> {b:?}");
        }

        // The rim (equator of the hemisphere) is a closed ring of 32 edges.
        let rim = edges
            .iter()
            .filter(|[a, b]| (a.z + radius).abs() < 1e-6 && (b.z + radius).abs() < 1e-6)
            .count();
        assert_eq!(rim, 32);
    }
}
