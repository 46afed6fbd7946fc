use glam::Vec3;

/// Linear RGB radiance carried through the tracer.
pub type Rgb = Vec3;

/// sRGB transfer function applied at image write time.
pub fn to_srgb(channel: f32) -> f32 {
    let c = channel.clamp(0.0, 1.0);
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn to_srgb_bytes(color: Rgb) -> [u8; 3] {
    color.to_array().map(|c| (to_srgb(c) * 255.0 + 0.5) as u8)
}
