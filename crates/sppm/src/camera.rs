use glam::{Quat, Vec3};

use crate::ray::Ray;

/// Thin lens perspective camera, always built facing -Z and rotated into
/// place with a quaternion.
pub struct Camera {
    /// Sensor size in pixels.
    pub width: u32,
    pub height: u32,

    /// Stratified sub pixel samples per axis requested for the eye pass.
    pub samples: u32,

    /// Lens diameter. Zero collapses to a pinhole.
    pub aperture: f32,

    /// Distance to the plane in perfect focus.
    pub focus_distance: f32,

    viewport_width: f32,
    viewport_height: f32,
    position: Vec3,
    rotation: Quat,
}

impl Camera {
    pub fn new(
        width: u32,
        height: u32,
        vfov: f32,
        position: Vec3,
        target: Vec3,
        aperture: f32,
        samples: u32,
    ) -> Self {
        let focus_distance = (target - position).length();
        let h = f32::tan(vfov / 2.);
        let aspect_ratio = width as f32 / height as f32;
        Self {
            width,
            height,
            samples,
            aperture,
            focus_distance,
            viewport_height: focus_distance * h,
            viewport_width: focus_distance * h * aspect_ratio,
            position,
            rotation: Quat::from_rotation_arc(Vec3::NEG_Z, (target - position).normalize()),
        }
    }

    /// Generate the primary ray through the continuous pixel position
    /// `(x, y)`, with an optional point on the unit lens disk and a shutter
    /// time sample.
    ///
    /// The lens offset perturbs the ray origin while the ray keeps aiming at
    /// the same point of the focus plane.
    pub fn primary_ray(&self, x: f32, y: f32, lens: Option<[f32; 2]>, time: f32) -> Ray {
        let u = x / self.width as f32;
        let v = y / self.height as f32;
        let vx = 2.0 * u - 1.0;
        let vy = 1.0 - 2.0 * v;

        let focus_target = Vec3::new(
            vx * self.viewport_width,
            vy * self.viewport_height,
            -self.focus_distance,
        );

        let offset = match lens {
            Some([dx, dy]) => self.aperture / 2.0 * Vec3::new(dx, dy, 0.0),
            None => Vec3::ZERO,
        };

        Ray::new(
            self.position + self.rotation.mul_vec3(offset),
            self.rotation.mul_vec3(focus_target - offset),
        )
        .with_time(time)
        .with_uv([u, v])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_looks_at_the_target() {
        let camera = Camera::new(
            64,
            64,
            f32::to_radians(70.),
            Vec3::ZERO,
            Vec3::new(0., 0., -5.),
            0.0,
            1,
        );
        let ray = camera.primary_ray(32.0, 32.0, None, 0.0);
        assert!(ray.origin.distance(Vec3::ZERO) < 1e-6);
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-5);
        assert_eq!(ray.uv, [0.5, 0.5]);
    }

    #[test]
    fn lens_offset_keeps_the_focus_point() {
        let camera = Camera::new(
            64,
            64,
            f32::to_radians(70.),
            Vec3::ZERO,
            Vec3::new(0., 0., -4.),
            0.5,
            1,
        );
        let centered = camera.primary_ray(32.0, 32.0, None, 0.0);
        let offset = camera.primary_ray(32.0, 32.0, Some([1.0, 0.0]), 0.0);

        assert!(offset.origin.distance(centered.origin) > 1e-3);

        // Both rays meet on the focus plane.
        let t_centered = camera.focus_distance / centered.direction.dot(Vec3::NEG_Z);
        let t_offset = (camera.focus_distance - offset.origin.dot(Vec3::NEG_Z))
            / offset.direction.dot(Vec3::NEG_Z);
        assert!(centered.at(t_centered).distance(offset.at(t_offset)) < 1e-4);
    }
}
