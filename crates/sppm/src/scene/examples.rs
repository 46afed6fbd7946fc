//! Built in demo scenes, constructed in code.

use glam::Vec3;

use crate::{
    camera::Camera,
    light::PointLight,
    material::Material,
    scene::Scene,
    shape::{Plane, Sphere},
};

/// A Cornell style box: colored diffuse walls, a mirror sphere and a glass
/// sphere, lit from near the ceiling.
pub struct BoxScene;

impl BoxScene {
    pub fn build(width: u32, height: u32, samples: u32, aperture: f32) -> (Scene, Camera) {
        let mut scene = Scene::default();

        let white = scene.insert_material(Material::diffuse(Vec3::splat(0.75)));
        let red = scene.insert_material(Material::diffuse(Vec3::new(0.75, 0.25, 0.25)));
        let green = scene.insert_material(Material::diffuse(Vec3::new(0.25, 0.75, 0.25)));
        let glossy = scene.insert_material(Material::glossy(
            Vec3::splat(0.4),
            Vec3::splat(0.4),
            32.0,
        ));
        let mirror = scene.insert_material(Material::mirror(Vec3::splat(0.95)));
        let glass = scene.insert_material(Material::refractive(Vec3::splat(0.95), 1.5));

        scene.insert_object(Plane::new(Vec3::new(0., -1., 0.), Vec3::Y, white));
        scene.insert_object(Plane::new(Vec3::new(0., 1.5, 0.), Vec3::NEG_Y, white));
        scene.insert_object(Plane::new(Vec3::new(0., 0., -4.), Vec3::Z, glossy));
        scene.insert_object(Plane::new(Vec3::new(-2., 0., 0.), Vec3::X, red));
        scene.insert_object(Plane::new(Vec3::new(2., 0., 0.), Vec3::NEG_X, green));

        scene.insert_object(Sphere::new(Vec3::new(-0.8, -0.5, -3.0), 0.5, mirror));
        scene.insert_object(Sphere::new(Vec3::new(0.8, -0.5, -2.4), 0.5, glass));
        scene.insert_object(Sphere::new(Vec3::new(0.0, -0.75, -1.8), 0.25, white));

        scene.set_light(PointLight {
            position: Vec3::new(0.0, 1.2, -2.5),
            power: Vec3::splat(60.0),
        });

        let camera = Camera::new(
            width,
            height,
            f32::to_radians(70.),
            Vec3::new(0., 0., 1.),
            Vec3::new(0., 0., -2.5),
            aperture,
            samples,
        );
        (scene, camera)
    }
}

/// A single diffuse sphere over a floor. Small and quick to converge; the
/// regression tests render it.
pub struct SingleSphereScene;

impl SingleSphereScene {
    pub fn build(width: u32, height: u32) -> (Scene, Camera) {
        let mut scene = Scene::default();

        let gray = scene.insert_material(Material::diffuse(Vec3::splat(0.7)));
        let floor = scene.insert_material(Material::diffuse(Vec3::splat(0.5)));

        scene.insert_object(Sphere::new(Vec3::new(0., 0., -3.), 1.0, gray));
        scene.insert_object(Plane::new(Vec3::new(0., -1., 0.), Vec3::Y, floor));

        scene.set_light(PointLight {
            position: Vec3::new(2.0, 3.0, -1.0),
            power: Vec3::splat(80.0),
        });

        let camera = Camera::new(
            width,
            height,
            f32::to_radians(60.),
            Vec3::ZERO,
            Vec3::new(0., 0., -3.),
            0.0,
            1,
        );
        (scene, camera)
    }
}
