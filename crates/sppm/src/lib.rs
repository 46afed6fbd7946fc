pub mod aggregate;
pub mod camera;
pub mod color;
pub mod config;
pub mod film;
pub mod grid;
pub mod hitpoint;
pub mod integrator;
pub mod light;
pub mod material;
pub mod math;
pub mod ray;
pub mod scene;
pub mod shape;

pub use rand_xoshiro::Xoshiro256StarStar as Rng;

/// Identifies one independent random stream of the render.
///
/// Hashing the seed together with the coordinates of the work item keeps the
/// output deterministic for a fixed seed, independently of how work is split
/// across threads.
#[derive(Debug, Copy, Clone, Hash)]
pub struct Seed {
    pub seed: u64,
    pub pass: Pass,
    pub iteration: u32,
    pub index: u64,
}

/// Which half of an iteration a random stream belongs to.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Pass {
    Eye,
    Photon,
}

impl Seed {
    pub fn into_rng(self) -> Rng {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::hash::Hash::hash(&self, &mut hasher);
        <Rng as rand::SeedableRng>::seed_from_u64(std::hash::Hasher::finish(&hasher))
    }
}
