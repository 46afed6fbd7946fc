pub mod examples;

use anyhow::{ensure, Result};
use glam::Vec3;

use crate::{
    aggregate::ShapeList,
    light::PointLight,
    material::Material,
    ray::Ray,
    shape::{MaterialId, Shape},
};

/// Everything the tracer intersects and shades: shapes, their materials,
/// the light, and the background rays escape into.
pub struct Scene {
    pub objects: ShapeList,
    pub materials: Vec<Material>,
    pub light: Option<PointLight>,
    /// Background gradient, looked up with the ray's vertical uv.
    pub background_zenith: Vec3,
    pub background_horizon: Vec3,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: ShapeList::default(),
            materials: Vec::new(),
            light: None,
            background_zenith: Vec3::ZERO,
            background_horizon: Vec3::ZERO,
        }
    }
}

impl Scene {
    pub fn insert_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn insert_object<S: Shape + 'static>(&mut self, shape: S) {
        self.objects.push(shape);
    }

    pub fn set_light(&mut self, light: PointLight) {
        self.light = Some(light);
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// Radiance of a ray that left the scene.
    pub fn background(&self, ray: &Ray) -> Vec3 {
        self.background_horizon
            .lerp(self.background_zenith, 1.0 - ray.uv[1])
    }

    /// Fail fast on a scene the renderer cannot do anything with.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.objects.is_empty(), "scene contains no objects");
        ensure!(self.light.is_some(), "scene contains no light source");
        Ok(())
    }
}
