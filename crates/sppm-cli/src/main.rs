mod progress;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use progress::PercentBar;
use sppm::{config::SppmConfig, film::Film, integrator::SppmIntegrator};
use utils::{AvailableSampling, AvailableScene, Dimensions};

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, value_enum, default_value_t)]
    /// Scene selector
    scene: AvailableScene,

    #[arg(short, long, default_value = "800x600")]
    /// Screen dimension in format `width`x`height`
    dimensions: Dimensions,

    #[arg(long, default_value_t = 8000)]
    /// Photons emitted per iteration
    photons: usize,

    #[arg(short, long, default_value_t = 1000)]
    /// Number of eye/photon iterations
    iterations: usize,

    #[arg(long, default_value_t = 20)]
    /// Maximum path recursion depth (hard capped at 20)
    max_depth: u32,

    #[arg(long, value_enum, default_value_t)]
    /// Hemisphere sampling used for photon bounces
    sampling: AvailableSampling,

    #[arg(long, default_value_t = 0.7)]
    /// Progressive radius reduction constant, in (0, 1)
    alpha: f32,

    #[arg(long, default_value_t = 8.0)]
    /// Scale on the initial search radius heuristic
    radius_scale: f32,

    #[arg(long, default_value_t = 2)]
    /// Eye samples per pixel axis (1 disables jitter)
    spp: u32,

    #[arg(long, default_value_t = 0.0)]
    /// Camera aperture diameter; 0 for a pinhole
    aperture: f32,

    #[arg(short, long, default_value = "out.png")]
    /// Output image path
    output: PathBuf,

    #[arg(long)]
    /// Thread count; defaults to all cores
    threads: Option<usize>,

    #[arg(long, default_value_t)]
    /// Seed to use for all the random stuff.
    /// Given a seed, the rendering is deterministic (the output only depends on
    /// the seed, iteration and work item).
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("building the thread pool")?;
    }

    log::info!("loading scene");
    let Dimensions { width, height } = args.dimensions;
    let (scene, camera) = args.scene.build(width, height, args.spp, args.aperture);

    let config = SppmConfig {
        photons_per_iteration: args.photons,
        iterations: args.iterations,
        max_depth: args.max_depth,
        sampling: args.sampling.into(),
        alpha: args.alpha,
        radius_scale: args.radius_scale,
        seed: args.seed,
        ..Default::default()
    };

    let mut film = Film::new(width, height);
    let mut integrator = SppmIntegrator::new(config, width, height);
    integrator.render_with_progress(&scene, &camera, &mut film, |iteration| {
        print!(
            "\r{}",
            PercentBar {
                percent: (iteration + 1) as f32 / args.iterations as f32,
                width: 50,
            }
        );
    })?;
    println!();

    film.to_image()
        .save(&args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
