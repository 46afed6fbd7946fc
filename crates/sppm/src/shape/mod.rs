//! Shapes the aggregate can intersect rays against.

pub mod plane;
pub mod sphere;

pub use plane::Plane;
pub use sphere::Sphere;

use glam::Vec3;

use crate::ray::Ray;

/// Index into the scene's material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialId(pub usize);

/// Produced by an intersection query; never outlives the call that made it.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Hit distance along the ray.
    pub t: f32,
    /// Outward geometric normal at the hit.
    pub normal: Vec3,
    pub material: MaterialId,
}

pub trait Shape: Send + Sync {
    /// Closest intersection with `t` in `(t_min, inf)`, if any.
    fn intersect(&self, ray: &Ray, t_min: f32) -> Option<Intersection>;

    /// Whether the shape only faces one side. Backface culling skips hits
    /// on the far side of such shapes.
    fn one_sided(&self) -> bool {
        false
    }
}
