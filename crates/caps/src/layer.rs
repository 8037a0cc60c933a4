use scene::World;
use scene::components::{Color, LineGroup, LinePart, LineSet, LineSetId};
use scene::entity::EntityId;
use tracing::{debug, info};

use crate::cap_set::{CapId, CapSet};
use crate::projector::{CapProjector, ProjectedCap};

pub const BOUNDARY_COLOR: Color = Color::RED;
pub const WEDGE_COLOR: Color = Color::YELLOW;

/// Scene objects created for one cap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CapEntity {
    pub cap: CapId,
    pub entity: EntityId,
    pub boundary: LineSetId,
    pub wedge: LineSetId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RebuildStats {
    pub removed: usize,
    pub spawned: usize,
}

/// Owns every scene object that represents a cap.
///
/// [`CapLayer::rebuild`] throws away all of them and projects the current
/// [`CapSet`] from scratch; there is no diffing.
#[derive(Debug, Default)]
pub struct CapLayer {
    owned: Vec<CapEntity>,
    projected: Vec<(CapId, ProjectedCap)>,
}

impl CapLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, world: &mut World, caps: &CapSet, projector: &CapProjector) -> RebuildStats {
        let removed = self.clear(world);

        for (id, descriptor) in caps.iter() {
            let cap = projector.project(descriptor);

            let boundary = world.add_line_set(LineSet::new(cap.boundary_edges.clone()));
            let wedge = world.add_line_set(LineSet::new(cap.wedge_edges.clone()));
            let entity = world.spawn();
            world.set_transform(entity, cap.transform());
            world.set_line_group(
                entity,
                LineGroup::new(vec![
                    LinePart {
                        set: boundary,
                        color: BOUNDARY_COLOR,
                    },
                    LinePart {
                        set: wedge,
                        color: WEDGE_COLOR,
                    },
                ]),
            );

            debug!(
                cap = %id,
                lat = descriptor.latitude,
                lon = descriptor.longitude,
                cap_radius = cap.cap_radius,
                opening_angle = cap.opening_angle,
                center = ?cap.center_position(),
                "placed cap"
            );

            self.owned.push(CapEntity {
                cap: id,
                entity,
                boundary,
                wedge,
            });
            self.projected.push((id, cap));
        }

        let stats = RebuildStats {
            removed,
            spawned: self.owned.len(),
        };
        info!(removed = stats.removed, spawned = stats.spawned, "caps rebuilt");
        stats
    }

    /// Despawns every cap entity and frees its line sets. Returns how many
    /// caps were removed.
    pub fn clear(&mut self, world: &mut World) -> usize {
        let removed = self.owned.len();
        for owned in self.owned.drain(..) {
            world.despawn(owned.entity);
            world.remove_line_set(owned.boundary);
            world.remove_line_set(owned.wedge);
        }
        self.projected.clear();
        removed
    }

    pub fn entities(&self) -> &[CapEntity] {
        &self.owned
    }

    pub fn entity_for(&self, cap: CapId) -> Option<EntityId> {
        self.owned.iter().find(|o| o.cap == cap).map(|o| o.entity)
    }

    /// Projected geometry in the same order as the cap set.
    pub fn projected(&self) -> &[(CapId, ProjectedCap)] {
        &self.projected
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BOUNDARY_COLOR, CapLayer, WEDGE_COLOR};
    use crate::cap_set::{CapChange, CapCommand, CapField, CapSet};
    use crate::descriptor::CapDescriptor;
    use crate::facing::Facing;
    use crate::projector::CapProjector;
    use scene::World;
    use scene::components::{Color, Transform};
    use scene::prefabs::spawn_wireframe_globe;

    fn setup() -> (World, CapSet, CapProjector, CapLayer) {
        let mut world = World::new();
        spawn_wireframe_globe(&mut world, 6371.0, Color::GREEN);
        let caps = CapSet::from_descriptors(CapDescriptor::initial_set()).unwrap();
        (world, caps, CapProjector::new(6371.0), CapLayer::new())
    }

    #[test]
    fn rebuild_spawns_one_group_per_cap() {
        let (mut world, caps, projector, mut layer) = setup();
        let stats = layer.rebuild(&mut world, &caps, &projector);

        assert_eq!(stats.removed, 0);
        assert_eq!(stats.spawned, 2);
        assert_eq!(world.line_groups().len(), 2);
        assert_eq!(world.line_set_count(), 4);
        // Globe plus two caps.
        assert_eq!(world.entity_count(), 3);

        for (_, _, group) in world.line_groups() {
            let colors: Vec<_> = group.parts.iter().map(|p| p.color).collect();
            assert_eq!(colors, vec![BOUNDARY_COLOR, WEDGE_COLOR]);
        }
    }

    #[test]
    fn rebuild_is_idempotent_and_does_not_leak() {
        let (mut world, caps, projector, mut layer) = setup();
        layer.rebuild(&mut world, &caps, &projector);
        let first: Vec<_> = layer.projected().to_vec();

        let stats = layer.rebuild(&mut world, &caps, &projector);
        assert_eq!(stats.removed, 2);
        assert_eq!(layer.projected(), first.as_slice());
        assert_eq!(world.entity_count(), 3);
        assert_eq!(world.line_set_count(), 4);
    }

    #[test]
    fn add_then_remove_restores_geometry_count() {
        let (mut world, mut caps, projector, mut layer) = setup();
        layer.rebuild(&mut world, &caps, &projector);
        let groups_before = world.line_groups().len();

        let CapChange::Added(id) = caps.apply(CapCommand::Add(None)).unwrap() else {
            unreachable!()
        };
        layer.rebuild(&mut world, &caps, &projector);
        assert_eq!(world.line_groups().len(), groups_before + 1);
        assert!(layer.entity_for(id).is_some());

        caps.apply(CapCommand::Remove(id)).unwrap();
        layer.rebuild(&mut world, &caps, &projector);
        assert_eq!(world.line_groups().len(), groups_before);
        assert_eq!(layer.entity_for(id), None);
    }

    #[test]
    fn update_moves_cap_entity() {
        let (mut world, mut caps, projector, mut layer) = setup();
        let id = caps.id_at(0).unwrap();
        layer.rebuild(&mut world, &caps, &projector);

        caps.apply(CapCommand::Update(id, CapField::Latitude(0.0))).unwrap();
        caps.apply(CapCommand::Update(id, CapField::Longitude(0.0))).unwrap();
        caps.apply(CapCommand::Update(id, CapField::Facing(Facing::South)))
            .unwrap();
        layer.rebuild(&mut world, &caps, &projector);

        let entity = layer.entity_for(id).unwrap();
        let transform: Transform = world.transform(entity).unwrap();
        assert!((transform.position.x - 6381.0).abs() < 1e-9);
        assert!(transform.position.y.abs() < 1e-9);

        let projected = &layer.projected()[0].1;
        assert_eq!(projected.wedge, Facing::South.wedge());
    }

    #[test]
    fn clear_removes_everything_owned() {
        let (mut world, caps, projector, mut layer) = setup();
        layer.rebuild(&mut world, &caps, &projector);
        assert_eq!(layer.clear(&mut world), 2);
        assert!(layer.is_empty());
        assert_eq!(world.line_set_count(), 0);
        assert_eq!(world.entity_count(), 1);
    }
}
