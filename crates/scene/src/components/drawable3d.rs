use crate::components::Color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Sphere { radius: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub wireframe: bool,
    pub opacity: f32,
}

impl Material {
    pub fn wireframe(color: Color, opacity: f32) -> Self {
        Self {
            color,
            wireframe: true,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub material: Material,
}

impl Drawable3D {
    pub fn sphere(radius: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Sphere { radius },
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawable3D, Material, Shape3D};
    use crate::components::Color;

    #[test]
    fn create_wireframe_sphere_drawable() {
        let drawable = Drawable3D::sphere(1.5, Material::wireframe(Color::GREEN, 2.0));
        assert!(matches!(drawable.shape, Shape3D::Sphere { radius } if radius == 1.5));
        assert!(drawable.material.wireframe);
        assert_eq!(drawable.material.opacity, 1.0);
    }
}
