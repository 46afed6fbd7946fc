use core::fmt::Display;

use clap::ValueEnum;
use sppm::{
    camera::Camera,
    config::SamplingMode,
    scene::{
        examples::{BoxScene, SingleSphereScene},
        Scene,
    },
};

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableScene {
    #[default]
    Box,
    SingleSphere,
}

impl AvailableScene {
    pub fn build(self, width: u32, height: u32, samples: u32, aperture: f32) -> (Scene, Camera) {
        match self {
            AvailableScene::Box => BoxScene::build(width, height, samples, aperture),
            AvailableScene::SingleSphere => SingleSphereScene::build(width, height),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AvailableSampling {
    Uniform,
    #[default]
    Cosine,
}

impl From<AvailableSampling> for SamplingMode {
    fn from(val: AvailableSampling) -> Self {
        match val {
            AvailableSampling::Uniform => SamplingMode::Uniform,
            AvailableSampling::Cosine => SamplingMode::Cosine,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::str::FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut split_it = s.split('x');
        let (Some(a), Some(b)) = (split_it.next(), split_it.next()) else {
            return Err(anyhow::anyhow!("Incorrect format, see help"));
        };
        let width: u32 = a.parse()?;
        let height: u32 = b.parse()?;

        Ok(Dimensions { width, height })
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}x{}", self.width, self.height))
    }
}
