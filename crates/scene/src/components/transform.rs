use foundation::math::{Quat, Vec3};

/// Rigid placement: rotate about the local origin, then translate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Maps a point from local space into the parent (world) space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation.rotate(local)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
