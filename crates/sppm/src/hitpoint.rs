//! Shading points discovered by the eye pass and the statistics photons
//! deposit into.
//!
//! Geometry (`HitPoint`) lives for one iteration only. The statistic triple
//! (squared search radius, photon count proxy, accumulated flux) persists
//! across iterations in one guarded slot per pixel, so the progressive
//! radius shrink carries over instead of being reset by each rebuild.

use std::sync::Mutex;

use glam::Vec3;

use crate::{material::Material, math::bounds::Bounds};

/// A diffuse shading location found for one pixel sample.
#[derive(Debug, Clone, Copy)]
pub struct HitPoint {
    pub position: Vec3,
    pub normal: Vec3,
    /// Direction back towards the previous path vertex.
    pub wo: Vec3,
    pub material: Material,
    /// Attenuation accumulated along the eye path that produced this point.
    pub attenuation: Vec3,
    /// Flattened index of the owning pixel.
    pub pixel: usize,
    /// Sample weight; `1 / samples-per-pixel` so pooled pixel flux stays an
    /// average over eye samples.
    pub weight: f32,
}

/// The mutable statistic triple of one pixel.
#[derive(Debug, Clone, Copy)]
pub struct PointStats {
    /// Current squared search radius. Zero until first established; it only
    /// shrinks afterwards.
    pub radius_squared: f32,
    /// Photon count proxy. Stores count such that `n * alpha` is the paper's
    /// N, letting the shrink stay fractional.
    pub n: f32,
    pub flux: Vec3,
}

/// Guarded statistics. The triple is only reachable through operations that
/// take the lock, so a deposit's read-modify-write of radius, count and flux
/// is atomic with respect to other photon threads.
pub struct SharedStats(Mutex<PointStats>);

impl Default for SharedStats {
    fn default() -> Self {
        Self(Mutex::new(PointStats {
            radius_squared: 0.0,
            n: 0.0,
            flux: Vec3::ZERO,
        }))
    }
}

impl SharedStats {
    /// Establish the initial search radius if this slot has none yet.
    /// Later calls keep the shrunk radius from previous iterations.
    pub fn establish_radius(&self, initial_radius_squared: f32) {
        let mut stats = self.0.lock().unwrap();
        if stats.radius_squared == 0.0 {
            stats.radius_squared = initial_radius_squared;
        }
    }

    /// Deposit a photon contribution landing `distance_squared` away.
    ///
    /// Applies the progressive radius reduction
    /// `r2 *= (n*alpha + alpha) / (n*alpha + 1)`, counts the photon and
    /// scales the flux by the same factor so `flux / (pi * r2)` stays a
    /// valid running estimator. Returns whether the photon was inside the
    /// current radius.
    pub fn deposit(&self, distance_squared: f32, alpha: f32, contribution: Vec3) -> bool {
        let mut stats = self.0.lock().unwrap();
        if distance_squared > stats.radius_squared {
            return false;
        }
        let reduction = (stats.n * alpha + alpha) / (stats.n * alpha + 1.0);
        stats.radius_squared *= reduction;
        stats.n += 1.0;
        stats.flux = (stats.flux + contribution) * reduction;
        true
    }

    pub fn snapshot(&self) -> PointStats {
        *self.0.lock().unwrap()
    }
}

/// One statistics slot per pixel, persistent for the whole render.
pub struct StatsTable {
    slots: Vec<SharedStats>,
}

impl StatsTable {
    pub fn new(pixels: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(pixels, SharedStats::default);
        Self { slots }
    }

    pub fn slot(&self, pixel: usize) -> &SharedStats {
        &self.slots[pixel]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedStats> {
        self.slots.iter()
    }
}

/// The hit points of one iteration. Populated by merging the eye pass
/// workers' thread local buffers, cleared before the next eye pass.
#[derive(Default)]
pub struct HitPointStore {
    pub points: Vec<HitPoint>,
}

impl HitPointStore {
    pub fn replace(&mut self, points: Vec<HitPoint>) {
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of all hit point positions.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::default();
        for point in &self.points {
            bounds.fit(point.position);
        }
        bounds
    }
}
