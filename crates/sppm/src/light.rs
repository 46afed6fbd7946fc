use glam::Vec3;
use rand::prelude::Distribution;

use crate::{math::distributions::UnitSphere, ray::Ray, Rng};

/// A point light emitting photons uniformly in all directions.
///
/// The photon pass assumes a single light; extending to several would
/// require selecting one by power before each emission.
pub struct PointLight {
    pub position: Vec3,
    pub power: Vec3,
}

impl PointLight {
    /// Emit one photon: a ray leaving the light and its carried flux.
    pub fn emit_photon(&self, rng: &mut Rng) -> (Ray, Vec3) {
        let direction = UnitSphere.sample(rng);
        (Ray::new(self.position, direction), self.power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pass, Seed};

    #[test]
    fn photons_leave_the_light_with_its_power() {
        let light = PointLight {
            position: Vec3::new(0., 2., 0.),
            power: Vec3::new(100., 90., 80.),
        };
        let mut rng = Seed { seed: 1, pass: Pass::Photon, iteration: 0, index: 0 }.into_rng();
        for _ in 0..32 {
            let (ray, flux) = light.emit_photon(&mut rng);
            assert_eq!(ray.origin, light.position);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            assert_eq!(flux, light.power);
        }
    }
}
