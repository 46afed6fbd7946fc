use glam::Vec3;

use crate::ray::Ray;

use super::{Intersection, MaterialId, Shape};

/// An infinite one sided plane, used for box style walls.
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
    pub material: MaterialId,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, material: MaterialId) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Shape for Plane {
    fn intersect(&self, ray: &Ray, t_min: f32) -> Option<Intersection> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = self.normal.dot(self.point - ray.origin) / denom;
        if t <= t_min {
            return None;
        }
        Some(Intersection {
            t,
            normal: self.normal,
            material: self.material,
        })
    }

    fn one_sided(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_facing_rays_only_in_front() {
        let floor = Plane::new(Vec3::new(0., -1., 0.), Vec3::Y, MaterialId(0));

        let down = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        let hit = floor.intersect(&down, 1e-3).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-6);

        let up = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(floor.intersect(&up, 1e-3).is_none());

        let parallel = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(floor.intersect(&parallel, 1e-3).is_none());
    }
}
