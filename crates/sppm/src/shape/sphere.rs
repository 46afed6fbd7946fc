use glam::Vec3;

use crate::ray::Ray;

use super::{Intersection, MaterialId, Shape};

/// A sphere, optionally drifting with a constant velocity over the shutter
/// interval. Normals point outwards; the sphere is two sided so dielectric
/// interiors are reachable.
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialId,
    pub velocity: Vec3,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
            velocity: Vec3::ZERO,
        }
    }

    pub fn moving(center: Vec3, radius: f32, material: MaterialId, velocity: Vec3) -> Self {
        Self {
            center,
            radius,
            material,
            velocity,
        }
    }

    fn center_at(&self, time: f32) -> Vec3 {
        self.center + time * self.velocity
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray, t_min: f32) -> Option<Intersection> {
        let center = self.center_at(ray.time);
        let oc = ray.origin - center;
        let a = ray.direction.length_squared();
        let b_half = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant_quarter = b_half * b_half - a * c;
        if discriminant_quarter <= 0.0 {
            return None;
        }

        let sqrt_d = f32::sqrt(discriminant_quarter);
        let t_near = (-b_half - sqrt_d) / a;
        let t_far = (-b_half + sqrt_d) / a;
        let t = if t_near > t_min {
            t_near
        } else if t_far > t_min {
            t_far
        } else {
            return None;
        };

        Some(Intersection {
            t,
            normal: (ray.at(t) - center).normalize(),
            material: self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_from_outside_and_inside() {
        let sphere = Sphere::new(Vec3::new(0., 0., -3.), 1.0, MaterialId(0));

        let outside = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = sphere.intersect(&outside, 1e-3).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!(hit.normal.distance(Vec3::Z) < 1e-5);

        let inside = Ray::new(Vec3::new(0., 0., -3.), Vec3::NEG_Z);
        let hit = sphere.intersect(&inside, 1e-3).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        // Geometric normal still points outwards.
        assert!(hit.normal.distance(Vec3::NEG_Z) < 1e-5);
    }

    #[test]
    fn motion_follows_the_ray_time() {
        let sphere = Sphere::moving(Vec3::new(0., 0., -3.), 1.0, MaterialId(0), Vec3::X);

        let at_rest = Ray::new(Vec3::ZERO, Vec3::NEG_Z).with_time(0.0);
        assert!(sphere.intersect(&at_rest, 1e-3).is_some());

        let shutter_end = Ray::new(Vec3::ZERO, Vec3::NEG_Z).with_time(2.0);
        assert!(sphere.intersect(&shutter_end, 1e-3).is_none());
    }
}
