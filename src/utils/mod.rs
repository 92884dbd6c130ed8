//! Internal utility functions for imageops-filters.
//!
//! This module contains the numeric helpers shared by every filter family:
//! clamping, luminance and edge-clamped sampling.

use image::Rgb;
use imageproc::definitions::Clamp;

use crate::error::Error;
use crate::Image;

/// Luminance weights applied to (R, G, B).
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.36, 0.53, 0.11];

/// Clamps `value` into `[lo, hi]`.
///
/// Every coordinate that may leave the image goes through this helper.
#[inline]
pub fn clamp(value: i64, lo: i64, hi: i64) -> i64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Converts an accumulated channel value to `u8`.
///
/// The value is truncated toward zero and saturated to `[0, 255]`, so any
/// overflow from channel arithmetic ends up at the nearest bound.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    <u8 as Clamp<f32>>::clamp(value)
}

/// Same as [`clamp_channel`] for integer arithmetic.
#[inline]
pub fn clamp_channel_i32(value: i32) -> u8 {
    clamp(i64::from(value), 0, 255) as u8
}

/// Weighted luminance `0.36R + 0.53G + 0.11B`.
#[inline]
pub fn luminance(color: Rgb<u8>) -> f64 {
    let Rgb([r, g, b]) = color;
    LUMINANCE_WEIGHTS[0] * f64::from(r)
        + LUMINANCE_WEIGHTS[1] * f64::from(g)
        + LUMINANCE_WEIGHTS[2] * f64::from(b)
}

/// Luminance truncated to an integer level.
///
/// Used to rank pixels by brightness and as the grayscale value.
#[inline]
pub fn luminance_level(color: Rgb<u8>) -> u8 {
    clamp_channel(luminance(color) as f32)
}

/// Edge-clamped and bounds-checked pixel access
pub trait ClampedSample {
    /// Returns the pixel nearest to `(x, y)` inside the image.
    ///
    /// # Panics
    ///
    /// Panics if the image is empty.
    fn sample_clamped(&self, x: i64, y: i64) -> Rgb<u8>;

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    fn sample_checked(&self, x: i64, y: i64) -> Option<Rgb<u8>>;
}

impl ClampedSample for Image<Rgb<u8>> {
    #[inline]
    fn sample_clamped(&self, x: i64, y: i64) -> Rgb<u8> {
        let (width, height) = self.dimensions();
        let cx = clamp(x, 0, i64::from(width) - 1);
        let cy = clamp(y, 0, i64::from(height) - 1);
        *self.get_pixel(cx as u32, cy as u32)
    }

    #[inline]
    fn sample_checked(&self, x: i64, y: i64) -> Option<Rgb<u8>> {
        let (width, height) = self.dimensions();
        if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
            return None;
        }
        Some(*self.get_pixel(x as u32, y as u32))
    }
}

/// Validates that two images have matching dimensions.
///
/// # Errors
///
/// * `Error::DimensionMismatch` - If the dimensions differ
pub fn validate_matching_dimensions(expected: (u32, u32), actual: (u32, u32)) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, actual })
    }
}
