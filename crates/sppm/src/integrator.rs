//! The two pass SPPM loop.
//!
//! Each iteration traces eye rays until they land on diffuse surfaces,
//! indexes the resulting shading points in a spatial hash grid, then traces
//! a photon batch from the light and deposits flux into every shading point
//! within reach. Statistics persist per pixel across iterations so the
//! search radii keep shrinking; the density estimate is taken once after
//! the final iteration.

use std::f32::consts::PI;

use anyhow::{ensure, Result};
use glam::Vec3;
use log::{debug, info};
use rand::{distributions::Uniform, prelude::Distribution};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    camera::Camera,
    config::SppmConfig,
    film::Film,
    grid::HashGrid,
    hitpoint::{HitPoint, HitPointStore, StatsTable},
    material::{self, MaterialKind},
    math::{
        distributions::{Hemisphere, UnitDisk},
        vec::ReflectVecExt,
    },
    ray::Ray,
    scene::Scene,
    Pass, Rng, Seed,
};

/// Dot product threshold for a photon's surface normal to agree with a
/// shading point's normal.
const NORMAL_AGREEMENT: f32 = 1e-3;

/// Background radiance collected by an eye ray that left the scene.
struct Splat {
    pixel: usize,
    color: Vec3,
}

pub struct SppmIntegrator {
    config: SppmConfig,
    stats: StatsTable,
    /// Per pixel background sum over all iterations.
    background: Vec<Vec3>,
    total_photons: usize,
}

impl SppmIntegrator {
    pub fn new(config: SppmConfig, width: u32, height: u32) -> Self {
        let pixels = (width * height) as usize;
        Self {
            config,
            stats: StatsTable::new(pixels),
            background: vec![Vec3::ZERO; pixels],
            total_photons: 0,
        }
    }

    pub fn total_photons(&self) -> usize {
        self.total_photons
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera, film: &mut Film) -> Result<()> {
        self.render_with_progress(scene, camera, film, |_| {})
    }

    /// Run the configured number of iterations, invoking `on_iteration`
    /// after each one, then resolve the film.
    pub fn render_with_progress(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        film: &mut Film,
        mut on_iteration: impl FnMut(usize),
    ) -> Result<()> {
        self.config.validate()?;
        scene.validate()?;
        ensure!(
            camera.width > 0 && camera.height > 0,
            "image has zero size"
        );
        ensure!(
            film.width == camera.width && film.height == camera.height,
            "film is {}x{} but the camera renders {}x{}",
            film.width,
            film.height,
            camera.width,
            camera.height
        );

        info!(
            "rendering {}x{}: {} iterations of {} photons",
            camera.width, camera.height, self.config.iterations, self.config.photons_per_iteration
        );

        let mut store = HitPointStore::default();
        for iteration in 0..self.config.iterations {
            let (points, splats) = self.eye_pass(scene, camera, iteration as u32);
            store.replace(points);
            for splat in splats {
                self.background[splat.pixel] += splat.color;
            }

            // The grid must be complete before any photon flies.
            match HashGrid::build(
                &store,
                &self.stats,
                camera.width,
                camera.height,
                self.config.radius_scale,
            ) {
                Some(grid) => {
                    debug!(
                        "iteration {iteration}: {} hit points, initial radius {:.4}",
                        store.points.len(),
                        grid.initial_radius()
                    );
                    self.photon_pass(scene, &grid, &store, iteration as u32);
                }
                None => debug!("iteration {iteration}: no diffuse hit points"),
            }
            self.total_photons += self.config.photons_per_iteration;

            store.clear();
            on_iteration(iteration);
        }

        self.estimate_density(film);
        info!("done, {} photons traced", self.total_photons);
        Ok(())
    }

    /// Trace primary rays for every pixel, row partitioned across threads,
    /// and collect the diffuse shading points they discover.
    fn eye_pass(
        &self,
        scene: &Scene,
        camera: &Camera,
        iteration: u32,
    ) -> (Vec<HitPoint>, Vec<Splat>) {
        let stride = rayon::current_num_threads().max(1) as u32;
        let partitions: Vec<_> = (0..stride)
            .into_par_iter()
            .map(|start_row| self.trace_rows(scene, camera, iteration, start_row, stride))
            .collect();

        let mut points = Vec::new();
        let mut splats = Vec::new();
        for (mut local_points, mut local_splats) in partitions {
            points.append(&mut local_points);
            splats.append(&mut local_splats);
        }
        (points, splats)
    }

    /// Eye trace the rows `start_row, start_row + stride, ...`, each row
    /// with its own deterministic random stream.
    fn trace_rows(
        &self,
        scene: &Scene,
        camera: &Camera,
        iteration: u32,
        start_row: u32,
        stride: u32,
    ) -> (Vec<HitPoint>, Vec<Splat>) {
        let uniform = Uniform::new(0.0f32, 1.0);
        let mut points = Vec::new();
        let mut splats = Vec::new();

        // Sub pixel grid size, kept small for cost control.
        let grid_size = camera.samples.clamp(1, 2);
        let weight = 1.0 / (grid_size * grid_size) as f32;

        for y in (start_row..camera.height).step_by(stride as usize) {
            let mut rng = Seed {
                seed: self.config.seed,
                pass: Pass::Eye,
                iteration,
                index: u64::from(y),
            }
            .into_rng();

            for x in 0..camera.width {
                let pixel = (y * camera.width + x) as usize;
                for sx in 0..grid_size {
                    for sy in 0..grid_size {
                        let (dx, dy, time) = if camera.samples == 1 {
                            (0.5, 0.5, 0.5)
                        } else {
                            (
                                (sx as f32 + uniform.sample(&mut rng)) / grid_size as f32,
                                (sy as f32 + uniform.sample(&mut rng)) / grid_size as f32,
                                uniform.sample(&mut rng),
                            )
                        };
                        let lens = (camera.aperture > 0.0)
                            .then(|| UnitDisk.sample(&mut rng));

                        let ray =
                            camera.primary_ray(x as f32 + dx, y as f32 + dy, lens, time);
                        self.eye_trace(
                            scene,
                            ray,
                            0,
                            Vec3::ONE,
                            pixel,
                            weight,
                            &mut points,
                            &mut splats,
                        );
                    }
                }
            }
        }
        (points, splats)
    }

    /// Classify one eye ray interaction: terminate into a shading point on
    /// diffuse surfaces, recurse on mirrors and dielectrics.
    #[allow(clippy::too_many_arguments)]
    fn eye_trace(
        &self,
        scene: &Scene,
        ray: Ray,
        depth: u32,
        attenuation: Vec3,
        pixel: usize,
        weight: f32,
        points: &mut Vec<HitPoint>,
        splats: &mut Vec<Splat>,
    ) {
        let Some(hit) = scene.objects.intersect(&ray, 0.0, true) else {
            splats.push(Splat {
                pixel,
                color: attenuation * scene.background(&ray) * weight,
            });
            return;
        };

        let position = ray.at(hit.t);
        let material = *scene.material(hit.material);
        let epsilon = self.config.shadow_ray_epsilon;

        match material.kind {
            // The eye path always ends on a diffuse surface, whatever the
            // depth; photons finish the transport from here.
            MaterialKind::Diffuse => points.push(HitPoint {
                position,
                normal: hit.normal,
                wo: (ray.origin - position).normalize(),
                material,
                attenuation,
                pixel,
                weight,
            }),
            _ if depth >= self.config.effective_max_depth() => {}
            MaterialKind::Mirror => {
                let wo = (ray.origin - position).normalize();
                let reflected = wo.reflect_about(hit.normal);
                self.eye_trace(
                    scene,
                    ray.spawn(position + reflected * epsilon, reflected),
                    depth + 1,
                    material.mirror * attenuation,
                    pixel,
                    weight,
                    points,
                    splats,
                );
            }
            MaterialKind::Refractive => {
                let split = material::dielectric_split(
                    ray.direction,
                    hit.normal,
                    material.refraction_index,
                );
                let reflection_ray =
                    ray.spawn(position + split.reflection * epsilon, split.reflection);

                match split.refraction {
                    None => self.eye_trace(
                        scene,
                        reflection_ray,
                        depth + 1,
                        material.transparency * attenuation,
                        pixel,
                        weight,
                        points,
                        splats,
                    ),
                    Some(refracted) => {
                        let refraction_ray =
                            ray.spawn(position + refracted * epsilon, refracted);
                        if split.entering {
                            // Deterministic split, no roulette on eye paths.
                            self.eye_trace(
                                scene,
                                reflection_ray,
                                depth + 1,
                                split.fresnel * attenuation,
                                pixel,
                                weight,
                                points,
                                splats,
                            );
                            self.eye_trace(
                                scene,
                                refraction_ray,
                                depth + 1,
                                (1.0 - split.fresnel) * material.transparency * attenuation,
                                pixel,
                                weight,
                                points,
                                splats,
                            );
                        } else {
                            self.eye_trace(
                                scene,
                                refraction_ray,
                                depth + 1,
                                material.transparency * attenuation,
                                pixel,
                                weight,
                                points,
                                splats,
                            );
                        }
                    }
                }
            }
        }
    }

    /// Emit and trace the iteration's photon budget. Each photon owns its
    /// random stream; all shared mutation goes through the guarded
    /// statistics slots.
    fn photon_pass(&self, scene: &Scene, grid: &HashGrid, store: &HitPointStore, iteration: u32) {
        let Some(light) = scene.light.as_ref() else {
            return;
        };

        (0..self.config.photons_per_iteration)
            .into_par_iter()
            .for_each(|index| {
                let mut rng = Seed {
                    seed: self.config.seed,
                    pass: Pass::Photon,
                    iteration,
                    index: index as u64,
                }
                .into_rng();
                let (ray, flux) = light.emit_photon(&mut rng);
                self.photon_trace(scene, grid, store, ray, 0, flux, &mut rng);
            });
    }

    fn photon_trace(
        &self,
        scene: &Scene,
        grid: &HashGrid,
        store: &HitPointStore,
        ray: Ray,
        depth: u32,
        flux: Vec3,
        rng: &mut Rng,
    ) {
        let depth = depth + 1;
        if depth >= self.config.effective_max_depth() {
            return;
        }
        let Some(hit) = scene.objects.intersect(&ray, 0.0, true) else {
            return;
        };

        let position = ray.at(hit.t);
        let normal = hit.normal;
        let material = *scene.material(hit.material);
        let epsilon = self.config.shadow_ray_epsilon;
        let uniform = Uniform::new(0.0f32, 1.0);

        match material.kind {
            MaterialKind::Diffuse => {
                let wi = -ray.direction;
                for &index in grid.lookup(position) {
                    let point = &store.points[index as usize];
                    if point.normal.dot(normal) <= NORMAL_AGREEMENT {
                        continue;
                    }
                    // BRDF uses the shading point's stored material, normal
                    // and view direction, not the photon surface's.
                    let color = point.material.brdf(point.normal, point.wo, wi)
                        * point.attenuation;
                    self.stats.slot(point.pixel).deposit(
                        point.position.distance_squared(position),
                        self.config.alpha,
                        color * flux * point.weight,
                    );
                }

                // Russian roulette continuation along a fresh hemisphere
                // direction; surviving photons are reweighted by the pdf.
                let sample = Hemisphere {
                    normal,
                    mode: self.config.sampling,
                }
                .sample(rng);
                let cos_theta_o = f32::max(0.0, normal.dot(sample.direction));
                let bounced =
                    material.brdf(normal, sample.direction, wi) * cos_theta_o * flux;
                if uniform.sample(rng) < sample.pdf {
                    self.photon_trace(
                        scene,
                        grid,
                        store,
                        ray.spawn(position + sample.direction * epsilon, sample.direction),
                        depth,
                        bounced / sample.pdf,
                        rng,
                    );
                }
            }
            MaterialKind::Mirror => {
                let reflected = (-ray.direction).reflect_about(normal);
                self.photon_trace(
                    scene,
                    grid,
                    store,
                    ray.spawn(position + reflected * epsilon, reflected),
                    depth,
                    material.mirror * flux,
                    rng,
                );
            }
            MaterialKind::Refractive => {
                let split = material::dielectric_split(
                    ray.direction,
                    normal,
                    material.refraction_index,
                );
                // Binary roulette between reflection and refraction keeps
                // the photon count constant, unlike the eye pass split.
                let direction = match split.refraction {
                    None => split.reflection,
                    Some(refracted) if split.entering => {
                        if uniform.sample(rng) < split.fresnel {
                            split.reflection
                        } else {
                            refracted
                        }
                    }
                    Some(refracted) => refracted,
                };
                self.photon_trace(
                    scene,
                    grid,
                    store,
                    ray.spawn(position + direction * epsilon, direction),
                    depth,
                    flux,
                    rng,
                );
            }
        }
    }

    /// Convert accumulated flux into pixel radiance and fold in the
    /// averaged background.
    fn estimate_density(&self, film: &mut Film) {
        let inv_iterations = 1.0 / self.config.iterations as f32;
        for (pixel, slot) in self.stats.iter().enumerate() {
            let stats = slot.snapshot();
            let background = self.background[pixel] * inv_iterations;
            let color = if stats.radius_squared > 0.0 && self.total_photons > 0 {
                stats.flux / (PI * stats.radius_squared * self.total_photons as f32)
                    + background
            } else {
                background
            };
            film.accumulate(pixel, color, 1.0);
        }
    }
}
