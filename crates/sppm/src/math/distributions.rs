use std::f32::consts::{FRAC_1_PI, PI, TAU};

use rand::{distributions::Uniform, prelude::Distribution, Rng};

use super::vec::{OrthonormalBasisExt, Vec3};

/// How outgoing directions are drawn about a surface normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    Uniform,
    #[default]
    Cosine,
}

#[derive(Debug, Clone, Copy)]
pub struct HemisphereSample {
    pub direction: Vec3,
    pub pdf: f32,
}

/// Stochastic directions in the hemisphere about `normal`.
///
/// Uniform mode draws `theta = acos(e2)` with constant pdf `1/(2pi)`; cosine
/// mode draws `theta = asin(sqrt(e2))` with pdf `cos(theta)/pi`.
pub struct Hemisphere {
    pub normal: Vec3,
    pub mode: SamplingMode,
}

impl Distribution<HemisphereSample> for Hemisphere {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> HemisphereSample {
        let uniform = Uniform::new(0.0f32, 1.0);
        let epsilon_1 = uniform.sample(rng);
        let epsilon_2 = uniform.sample(rng);

        let w = self.normal;
        let (u, v) = w.orthonormal_basis();

        let phi = TAU * epsilon_1;
        let theta = match self.mode {
            SamplingMode::Uniform => f32::acos(epsilon_2),
            SamplingMode::Cosine => f32::asin(f32::sqrt(epsilon_2)),
        };

        let (sin_theta, cos_theta) = f32::sin_cos(theta);
        let (sin_phi, cos_phi) = f32::sin_cos(phi);
        let direction =
            (w * cos_theta + v * sin_theta * cos_phi + u * sin_theta * sin_phi).normalize();

        let pdf = match self.mode {
            SamplingMode::Uniform => 1.0 / (2.0 * PI),
            SamplingMode::Cosine => f32::max(0.0, w.dot(direction)) * FRAC_1_PI,
        };

        HemisphereSample { direction, pdf }
    }
}

/// Uniform point on the unit disk, used for thin lens offsets.
pub struct UnitDisk;

impl Distribution<[f32; 2]> for UnitDisk {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 2] {
        let uniform = Uniform::new(0.0f32, 1.0);
        let phi = TAU * uniform.sample(rng);
        let r = f32::sqrt(uniform.sample(rng));
        let (s, c) = f32::sin_cos(phi);
        [r * c, r * s]
    }
}

/// Uniform direction on the unit sphere, used for photon emission.
pub struct UnitSphere;

impl Distribution<Vec3> for UnitSphere {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let uniform = Uniform::new(0.0f32, 1.0);
        let phi = TAU * uniform.sample(rng);
        let cos_theta = 1.0 - 2.0 * uniform.sample(rng);
        let sin_theta = f32::sqrt(f32::max(0.0, 1.0 - cos_theta * cos_theta));
        let (sin_phi, cos_phi) = f32::sin_cos(phi);
        Vec3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pass, Seed};

    fn rng() -> crate::Rng {
        Seed { seed: 17, pass: Pass::Eye, iteration: 0, index: 0 }.into_rng()
    }

    #[test]
    fn hemisphere_samples_stay_above_the_surface() {
        let mut rng = rng();
        for mode in [SamplingMode::Uniform, SamplingMode::Cosine] {
            let normal = Vec3::new(0.2, 0.9, -0.1).normalize();
            let hemisphere = Hemisphere { normal, mode };
            for _ in 0..256 {
                let s = hemisphere.sample(&mut rng);
                assert!(normal.dot(s.direction) >= 0.0);
                assert!((s.direction.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn pdfs_match_their_definition() {
        let mut rng = rng();
        let normal = Vec3::Y;

        let uniform = Hemisphere { normal, mode: SamplingMode::Uniform };
        for _ in 0..64 {
            let s = uniform.sample(&mut rng);
            assert!((s.pdf - 1.0 / (2.0 * PI)).abs() < 1e-7);
        }

        let cosine = Hemisphere { normal, mode: SamplingMode::Cosine };
        for _ in 0..64 {
            let s = cosine.sample(&mut rng);
            let expected = f32::max(0.0, normal.dot(s.direction)) * FRAC_1_PI;
            assert!((s.pdf - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn disk_samples_are_inside_the_unit_disk() {
        let mut rng = rng();
        for _ in 0..256 {
            let [x, y] = UnitDisk.sample(&mut rng);
            assert!(x * x + y * y <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn sphere_samples_are_unit_length() {
        let mut rng = rng();
        for _ in 0..256 {
            let d = UnitSphere.sample(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }
}
