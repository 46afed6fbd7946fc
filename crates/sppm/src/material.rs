use glam::Vec3;

use crate::math::vec::ReflectVecExt;

/// Surface interaction class. Diffuse surfaces terminate eye paths into
/// shading points; mirror and refractive surfaces spawn recursive rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Diffuse,
    Mirror,
    Refractive,
}

/// Material parameters, snapshotted by copy onto every shading point.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub kind: MaterialKind,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub phong_exponent: f32,
    pub mirror: Vec3,
    pub transparency: Vec3,
    pub refraction_index: f32,
}

impl Material {
    pub fn diffuse(diffuse: Vec3) -> Self {
        Self {
            kind: MaterialKind::Diffuse,
            diffuse,
            specular: Vec3::ZERO,
            phong_exponent: 1.0,
            mirror: Vec3::ZERO,
            transparency: Vec3::ZERO,
            refraction_index: 1.0,
        }
    }

    pub fn glossy(diffuse: Vec3, specular: Vec3, phong_exponent: f32) -> Self {
        Self {
            specular,
            phong_exponent,
            ..Self::diffuse(diffuse)
        }
    }

    pub fn mirror(mirror: Vec3) -> Self {
        Self {
            kind: MaterialKind::Mirror,
            mirror,
            ..Self::diffuse(Vec3::ZERO)
        }
    }

    pub fn refractive(transparency: Vec3, refraction_index: f32) -> Self {
        Self {
            kind: MaterialKind::Refractive,
            transparency,
            refraction_index,
            ..Self::diffuse(Vec3::ZERO)
        }
    }

    /// Phong diffuse + specular lobe, evaluated with the stored view
    /// direction `wo` and an incoming light direction `wi`.
    ///
    /// Returns zero outside the valid cosine range rather than failing.
    pub fn brdf(&self, normal: Vec3, wo: Vec3, wi: Vec3) -> Vec3 {
        let cos_theta_i = normal.dot(wi);
        if cos_theta_i <= 0.0 || cos_theta_i > 1.0 {
            return Vec3::ZERO;
        }
        let half = (wo + wi).normalize();
        let specular_cos = f32::max(0.0, normal.dot(half));
        self.diffuse + self.specular * specular_cos.powf(self.phong_exponent) / cos_theta_i
    }
}

/// Outcome of hitting a dielectric interface, shared by the eye and photon
/// passes. `refraction` is `None` under total internal reflection.
#[derive(Debug, Clone, Copy)]
pub struct DielectricSplit {
    pub reflection: Vec3,
    pub refraction: Option<Vec3>,
    pub fresnel: f32,
    pub entering: bool,
}

const AIR_INDEX: f32 = 1.0;

/// Resolve a ray of direction `direction` hitting a surface with outward
/// `normal` and interior refraction index `ior`.
pub fn dielectric_split(direction: Vec3, normal: Vec3, ior: f32) -> DielectricSplit {
    let entering = normal.dot(direction) < 0.0;
    let oriented = if entering { normal } else { -normal };

    let wo = -direction;
    let reflection = wo.reflect_about(normal);

    let eta = if entering { AIR_INDEX / ior } else { ior / AIR_INDEX };
    let ddn = direction.dot(oriented);
    let cos2t = 1.0 - eta * eta * (1.0 - ddn * ddn);
    if cos2t < 0.0 {
        return DielectricSplit {
            reflection,
            refraction: None,
            fresnel: 1.0,
            entering,
        };
    }

    let sign = if entering { 1.0 } else { -1.0 };
    let refraction =
        (direction * eta - normal * (sign * (ddn * eta + f32::sqrt(cos2t)))).normalize();

    let r0 = ((ior - AIR_INDEX) / (ior + AIR_INDEX)).powi(2);
    let cos_alpha = if entering { -ddn } else { refraction.dot(normal) };
    let fresnel = r0 + (1.0 - r0) * (1.0 - cos_alpha).powi(5);

    DielectricSplit {
        reflection,
        refraction: Some(refraction),
        fresnel,
        entering,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_incidence_refracts_straight_through() {
        let split = dielectric_split(Vec3::new(0., -1., 0.), Vec3::Y, 1.5);
        assert!(split.entering);
        let refracted = split.refraction.expect("cos2t must be >= 0 at normal incidence");
        assert!(refracted.distance(Vec3::new(0., -1., 0.)) < 1e-6);

        // Schlick at normal incidence reduces to R0.
        let r0 = (0.5f32 / 2.5).powi(2);
        assert!((split.fresnel - r0).abs() < 1e-6);
    }

    #[test]
    fn grazing_exit_hits_total_internal_reflection() {
        // Leaving glass at ~60 degrees, well past the ~41.8 degree critical
        // angle for ior 1.5.
        let direction = Vec3::new(0.5, 0.87, 0.).normalize();
        let split = dielectric_split(direction, Vec3::X, 1.5);
        assert!(!split.entering);
        assert!(split.refraction.is_none());
        assert_eq!(split.fresnel, 1.0);

        // The mirrored geometry enters near normal incidence instead and
        // must refract; there is no critical angle going in.
        let entering = dielectric_split(Vec3::new(-0.95, 0.05, 0.).normalize(), Vec3::X, 1.5);
        assert!(entering.entering);
        assert!(entering.refraction.is_some());
    }

    #[test]
    fn brdf_is_zero_for_grazing_or_backfacing_light() {
        let material = Material::glossy(Vec3::splat(0.5), Vec3::splat(0.3), 16.0);
        let normal = Vec3::Y;
        let wo = Vec3::new(0., 1., 1.).normalize();

        assert_eq!(material.brdf(normal, wo, Vec3::new(0., -1., 0.)), Vec3::ZERO);

        let lit = material.brdf(normal, wo, Vec3::new(0., 1., -1.).normalize());
        assert!(lit.min_element() >= 0.0);
        assert!(lit.x >= 0.5);
    }
}
