use anyhow::{ensure, Result};

pub use crate::math::distributions::SamplingMode;

/// Paths never recurse deeper than this, whatever the configuration asks.
pub const MAX_RECURSION_DEPTH: u32 = 20;

/// Knobs of the renderer. Defaults follow the reference configuration.
#[derive(Debug, Clone, Copy)]
pub struct SppmConfig {
    /// Offset applied to secondary ray origins to escape the spawning
    /// surface.
    pub shadow_ray_epsilon: f32,
    pub photons_per_iteration: usize,
    pub iterations: usize,
    /// Requested recursion limit; effective value is capped at
    /// [`MAX_RECURSION_DEPTH`].
    pub max_depth: u32,
    pub sampling: SamplingMode,
    /// Radius reduction constant of the progressive shrink rule.
    pub alpha: f32,
    /// Scale applied to the initial search radius heuristic.
    pub radius_scale: f32,
    pub seed: u64,
}

impl Default for SppmConfig {
    fn default() -> Self {
        Self {
            shadow_ray_epsilon: 0.001,
            photons_per_iteration: 8000,
            iterations: 1000,
            max_depth: 20,
            sampling: SamplingMode::default(),
            alpha: 0.7,
            radius_scale: 8.0,
            seed: 0,
        }
    }
}

impl SppmConfig {
    /// Fail fast on nonsensical parameters, before any tracing starts.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.shadow_ray_epsilon > 0.0,
            "shadow ray epsilon must be positive, got {}",
            self.shadow_ray_epsilon
        );
        ensure!(
            self.photons_per_iteration > 0,
            "photon count per iteration must be positive"
        );
        ensure!(self.iterations > 0, "iteration count must be positive");
        ensure!(self.max_depth > 0, "max recursion depth must be positive");
        ensure!(
            self.alpha > 0.0 && self.alpha < 1.0,
            "radius shrink constant must be in (0, 1), got {}",
            self.alpha
        );
        ensure!(
            self.radius_scale > 0.0,
            "initial radius scale must be positive, got {}",
            self.radius_scale
        );
        if self.max_depth > MAX_RECURSION_DEPTH {
            log::warn!(
                "max recursion depth {} capped at {MAX_RECURSION_DEPTH}",
                self.max_depth
            );
        }
        Ok(())
    }

    pub fn effective_max_depth(&self) -> u32 {
        self.max_depth.min(MAX_RECURSION_DEPTH)
    }
}
