//! Filters whose output depends only on the pixel at the same coordinate.

use image::Rgb;

use crate::filters::filter::Filter;
use crate::utils::{clamp_channel, clamp_channel_i32, luminance, luminance_level};
use crate::Image;

/// Replaces every channel `c` with `255 - c`
#[derive(Debug, Clone, Copy, Default)]
pub struct InvertFilter;

impl Filter for InvertFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let Rgb([r, g, b]) = *source.get_pixel(x, y);
        Rgb([255 - r, 255 - g, 255 - b])
    }

    fn name(&self) -> &'static str {
        "invert"
    }
}

/// Replaces every pixel with its luminance level on all three channels
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleFilter;

impl Filter for GrayscaleFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let level = luminance_level(*source.get_pixel(x, y));
        Rgb([level, level, level])
    }

    fn name(&self) -> &'static str {
        "grayscale"
    }
}

/// Sepia toning around the pixel luminance
///
/// Red is lifted by `2k`, green by `k / 2` and blue lowered by `k`.
#[derive(Debug, Clone, Copy)]
pub struct SepiaFilter {
    depth: f32,
}

impl SepiaFilter {
    pub fn new(depth: f32) -> Self {
        Self { depth }
    }
}

impl Default for SepiaFilter {
    fn default() -> Self {
        Self::new(44.0)
    }
}

impl Filter for SepiaFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let level = luminance(*source.get_pixel(x, y)) as f32;
        let k = self.depth;
        Rgb([
            clamp_channel(level + 2.0 * k),
            clamp_channel(level + 0.5 * k),
            clamp_channel(level - k),
        ])
    }

    fn name(&self) -> &'static str {
        "sepia"
    }
}

/// Adds a constant to every channel
#[derive(Debug, Clone, Copy)]
pub struct BrightnessFilter {
    delta: i32,
}

impl BrightnessFilter {
    /// `delta` may be negative to darken.
    pub fn new(delta: i32) -> Self {
        Self { delta }
    }
}

impl Default for BrightnessFilter {
    fn default() -> Self {
        Self::new(66)
    }
}

impl Filter for BrightnessFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let Rgb(channels) = *source.get_pixel(x, y);
        Rgb(channels.map(|c| clamp_channel_i32(i32::from(c).saturating_add(self.delta))))
    }

    fn name(&self) -> &'static str {
        "brightness"
    }
}
