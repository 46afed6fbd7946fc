use glam::Vec3;

/// A ray in world space. Immutable once constructed.
///
/// `time` is the shutter sample the ray was generated at; moving shapes
/// evaluate their position with it. `uv` is only consulted when the ray
/// escapes the scene and the background is looked up.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
    pub uv: [f32; 2],
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            time: 0.0,
            uv: [0.0, 0.0],
        }
    }

    pub fn with_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    pub fn with_uv(mut self, uv: [f32; 2]) -> Self {
        self.uv = uv;
        self
    }

    /// Spawn a secondary ray continuing this path, keeping time and uv.
    pub fn spawn(&self, origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            time: self.time,
            uv: self.uv,
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_the_direction() {
        let ray = Ray::new(Vec3::new(1., 0., 0.), Vec3::new(0., 2., 0.));
        assert!(ray.at(0.0).distance(ray.origin) < 1e-6);
        assert!(ray.at(3.0).distance(Vec3::new(1., 3., 0.)) < 1e-6);
    }

    #[test]
    fn spawn_keeps_the_time_sample() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X).with_time(0.25).with_uv([0.5, 0.5]);
        let next = ray.spawn(Vec3::Y, Vec3::Z);
        assert_eq!(next.time, 0.25);
        assert_eq!(next.uv, [0.5, 0.5]);
    }
}
