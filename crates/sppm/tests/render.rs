//! End to end renders of the small demo scene.

use std::{fs, path::Path};

use glam::Vec3;
use sppm::{
    config::SppmConfig, film::Film, integrator::SppmIntegrator,
    scene::examples::SingleSphereScene,
};

fn small_config(seed: u64) -> SppmConfig {
    SppmConfig {
        photons_per_iteration: 1000,
        iterations: 4,
        seed,
        ..Default::default()
    }
}

fn render_once(seed: u64) -> Film {
    let (scene, camera) = SingleSphereScene::build(16, 16);
    let mut film = Film::new(16, 16);
    let mut integrator = SppmIntegrator::new(small_config(seed), 16, 16);
    integrator
        .render(&scene, &camera, &mut film)
        .expect("render failed");
    film
}

#[test]
fn fixed_seed_renders_are_identical() {
    // One worker thread makes the flux accumulation order reproducible.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();

    let (first, second) = pool.install(|| (render_once(11), render_once(11)));
    assert_eq!(first.to_image().as_raw(), second.to_image().as_raw());
}

#[test]
fn radiance_is_finite_and_non_negative() {
    let film = render_once(3);

    let mut lit_pixels = 0;
    for pixel in 0..(16 * 16) {
        let radiance = film.radiance(pixel);
        assert!(radiance.is_finite(), "pixel {pixel} is {radiance:?}");
        assert!(radiance.min_element() >= 0.0, "pixel {pixel} is {radiance:?}");
        if radiance.max_element() > 0.0 {
            lit_pixels += 1;
        }
    }
    // The lit sphere fills most of the frame.
    assert!(lit_pixels > 0, "every pixel came out black");

    // The center pixel looks straight at the lit sphere.
    let center = film.radiance(8 * 16 + 8);
    assert!(center.max_element() > 0.0, "center pixel is black: {center:?}");
}

#[test]
fn center_pixel_matches_the_recorded_baseline() {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let film = pool.install(|| render_once(11));
    let center = film.radiance(8 * 16 + 8);

    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/baselines/single_sphere_center.txt");
    let Ok(recorded) = fs::read_to_string(&path) else {
        // First run on a fresh checkout records the reference value; the
        // single threaded fixed seed render is bit reproducible, so later
        // runs must land on it again.
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("{} {} {}\n", center.x, center.y, center.z)).unwrap();
        return;
    };

    let values: Vec<f32> = recorded
        .split_whitespace()
        .map(|v| v.parse().expect("malformed baseline"))
        .collect();
    let baseline = Vec3::new(values[0], values[1], values[2]);
    assert!(
        center.distance(baseline) <= 1e-4 * (1.0 + baseline.length()),
        "center pixel {center:?} drifted from the recorded {baseline:?}"
    );
}

#[test]
fn mismatched_film_is_rejected() {
    let (scene, camera) = SingleSphereScene::build(16, 16);
    let mut film = Film::new(8, 8);
    let mut integrator = SppmIntegrator::new(small_config(0), 16, 16);
    assert!(integrator.render(&scene, &camera, &mut film).is_err());
}
