use foundation::math::{Quat, Vec3};

use crate::World;
use crate::components::{Color, Drawable3D, Material, Transform};
use crate::entity::EntityId;

/// Opacity of the reference globe wireframe.
pub const GLOBE_OPACITY: f32 = 0.5;

/// Spawns a semi-transparent wireframe sphere of `radius` at the origin.
pub fn spawn_wireframe_globe(world: &mut World, radius: f64, color: Color) -> EntityId {
    let entity = world.spawn();
    world.set_transform(entity, Transform::identity());
    world.set_drawable_3d(
        entity,
        Drawable3D::sphere(radius, Material::wireframe(color, GLOBE_OPACITY)),
    );
    entity
}

/// Spins the globe about its polar (+Z) axis by `angle_rad`.
pub fn spin_globe(world: &mut World, globe: EntityId, angle_rad: f64) {
    if let Some(transform) = world.transform_mut(globe) {
        let step = Quat::from_axis_angle(Vec3::Z, angle_rad);
        transform.rotation = (step * transform.rotation).normalize();
    }
}
