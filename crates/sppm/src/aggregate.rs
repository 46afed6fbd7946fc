//! Linear shape aggregate standing in for an acceleration structure.
//!
//! The tracer only relies on the `intersect(ray, cull_backfaces)` contract,
//! so a BVH could be swapped in behind the same signature.

use crate::{
    ray::Ray,
    shape::{Intersection, Shape},
};

#[derive(Default)]
pub struct ShapeList(pub Vec<Box<dyn Shape>>);

impl ShapeList {
    pub fn push<S: Shape + 'static>(&mut self, shape: S) {
        self.0.push(Box::new(shape));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Closest intersection over all shapes. With `cull_backfaces`, hits on
    /// the far side of one sided shapes are discarded.
    pub fn intersect(&self, ray: &Ray, t_min: f32, cull_backfaces: bool) -> Option<Intersection> {
        let mut closest: Option<Intersection> = None;
        for shape in &self.0 {
            let Some(hit) = shape.intersect(ray, t_min) else {
                continue;
            };
            if cull_backfaces && shape.one_sided() && hit.normal.dot(ray.direction) > 0.0 {
                continue;
            }
            if closest.map_or(true, |best| hit.t < best.t) {
                closest = Some(hit);
            }
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::shape::{MaterialId, Plane, Sphere};

    use super::*;

    #[test]
    fn returns_the_closest_hit() {
        let mut list = ShapeList::default();
        list.push(Sphere::new(Vec3::new(0., 0., -5.), 1.0, MaterialId(0)));
        list.push(Sphere::new(Vec3::new(0., 0., -2.), 0.5, MaterialId(1)));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = list.intersect(&ray, 1e-3, true).unwrap();
        assert_eq!(hit.material, MaterialId(1));
    }

    #[test]
    fn culling_skips_backfacing_planes() {
        let mut list = ShapeList::default();
        list.push(Plane::new(Vec3::new(0., 1., 0.), Vec3::NEG_Y, MaterialId(0)));

        // Approaching the ceiling from above hits its back side.
        let ray = Ray::new(Vec3::new(0., 2., 0.), Vec3::NEG_Y);
        assert!(list.intersect(&ray, 1e-3, true).is_none());
        assert!(list.intersect(&ray, 1e-3, false).is_some());
    }
}
