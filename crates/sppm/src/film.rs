use glam::Vec3;
use image::RgbImage;

use crate::color;

/// Per pixel running color and weight sums; the sink the density estimator
/// writes into.
pub struct Film {
    pub width: u32,
    pub height: u32,
    color: Vec<Vec3>,
    weight: Vec<f32>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            color: vec![Vec3::ZERO; len],
            weight: vec![0.0; len],
        }
    }

    pub fn accumulate(&mut self, pixel: usize, color: Vec3, weight: f32) {
        self.color[pixel] += color * weight;
        self.weight[pixel] += weight;
    }

    /// Weighted average radiance of one pixel. Black where nothing was
    /// accumulated.
    pub fn radiance(&self, pixel: usize) -> Vec3 {
        let weight = self.weight[pixel];
        if weight > 0.0 {
            self.color[pixel] / weight
        } else {
            Vec3::ZERO
        }
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let pixel = (y * self.width + x) as usize;
            image::Rgb(color::to_srgb_bytes(self.radiance(pixel)))
        })
    }
}
