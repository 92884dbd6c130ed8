//! Coordinate-remapping filters: shift, rotation, sine waves and glass.
//!
//! Each filter maps a destination pixel back to one source pixel without
//! interpolation. Sources outside the image become black unless the
//! filter documents another boundary policy.

use std::f64::consts::{FRAC_PI_4, TAU};

use image::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::filters::filter::Filter;
use crate::utils::ClampedSample;
use crate::Image;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Horizontal translation
///
/// `output(x, y) = source(x + offset, y)`, black where that falls outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftFilter {
    offset: i64,
}

impl ShiftFilter {
    /// A positive `offset` moves the content to the left.
    pub fn new(offset: i64) -> Self {
        Self { offset }
    }
}

impl Default for ShiftFilter {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Filter for ShiftFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        i64::from(x)
            .checked_add(self.offset)
            .and_then(|sx| source.sample_checked(sx, i64::from(y)))
            .unwrap_or(BLACK)
    }

    fn name(&self) -> &'static str {
        "shift"
    }
}

/// Rotation about a pivot, nearest pixel by truncation
///
/// For each destination pixel the source coordinate is
///
/// ```text
/// xr = (x - x0)·cos θ - (y - y0)·sin θ + x0
/// yr = (x - x0)·sin θ + (y - y0)·cos θ + y0
/// ```
///
/// and the pixel at `(⌊xr⌋, ⌊yr⌋)` is copied when `0 ≤ xr < width` and
/// `0 ≤ yr < height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationFilter {
    pivot: (f64, f64),
    angle: f64,
}

impl RotationFilter {
    /// `angle` is in radians.
    pub fn new(pivot: (f64, f64), angle: f64) -> Self {
        Self { pivot, angle }
    }

    /// Rotation about the integer center of a `width`×`height` image.
    pub fn centered(width: u32, height: u32, angle: f64) -> Self {
        Self::new((f64::from(width / 2), f64::from(height / 2)), angle)
    }

    pub fn pivot(&self) -> (f64, f64) {
        self.pivot
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl Default for RotationFilter {
    fn default() -> Self {
        Self::new((0.0, 0.0), FRAC_PI_4)
    }
}

impl Filter for RotationFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let (x0, y0) = self.pivot;
        let (sin, cos) = self.angle.sin_cos();
        let (dx, dy) = (f64::from(x) - x0, f64::from(y) - y0);

        let xr = dx * cos - dy * sin + x0;
        let yr = dx * sin + dy * cos + y0;

        let (width, height) = source.dimensions();
        if (0.0..f64::from(width)).contains(&xr) && (0.0..f64::from(height)).contains(&yr) {
            *source.get_pixel(xr as u32, yr as u32)
        } else {
            BLACK
        }
    }

    fn name(&self) -> &'static str {
        "rotation"
    }
}

/// Coordinate that drives the phase of a [`WavesFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveDriver {
    /// Phase follows `y`: rows slide sideways, bending vertical lines.
    Row,
    /// Phase follows `x`: columns are resampled along the row.
    Column,
}

/// Horizontal sine displacement
///
/// `xs = x + amplitude · sin(2π · t / period)` with `t` the row or column
/// index. A displaced coordinate outside `(-1, width)` wraps to
/// `|xs| mod width` instead of being clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavesFilter {
    amplitude: f64,
    period: f64,
    driver: WaveDriver,
}

impl WavesFilter {
    pub fn new(amplitude: f64, period: f64, driver: WaveDriver) -> Self {
        Self {
            amplitude,
            period,
            driver,
        }
    }

    /// Amplitude 20, period 60, driven by the row.
    pub fn by_row() -> Self {
        Self::new(20.0, 60.0, WaveDriver::Row)
    }

    /// Amplitude 20, period 30, driven by the column.
    pub fn by_column() -> Self {
        Self::new(20.0, 30.0, WaveDriver::Column)
    }

    pub fn driver(&self) -> WaveDriver {
        self.driver
    }

    fn source_column(&self, x: u32, y: u32, width: u32) -> u32 {
        let t = match self.driver {
            WaveDriver::Row => y,
            WaveDriver::Column => x,
        };
        let xs = f64::from(x) + self.amplitude * (TAU * f64::from(t) / self.period).sin();

        if xs > -1.0 && xs < f64::from(width) {
            // Truncation maps (-1, 0) to column 0.
            xs as u32
        } else {
            (xs.abs() as u64 % u64::from(width)) as u32
        }
    }
}

impl Filter for WavesFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let sx = self.source_column(x, y, source.width());
        *source.get_pixel(sx, y)
    }

    fn name(&self) -> &'static str {
        match self.driver {
            WaveDriver::Row => "waves-by-row",
            WaveDriver::Column => "waves-by-column",
        }
    }
}

/// Largest jitter of the glass effect on either axis.
const GLASS_JITTER: i64 = 5;

/// Frosted glass: every pixel copies a random neighbor
///
/// Offsets are uniform integers in `[-5, 5]` on both axes, edge-clamped.
/// The offsets of a pixel are a function of the filter seed and the pixel
/// coordinate, so one filter instance always produces the same image.
///
/// # Examples
///
/// ```rust
/// use imageops_filters::{Filter, GlassFilter, Image};
/// use image::Rgb;
///
/// let image: Image<Rgb<u8>> = Image::from_fn(16, 16, |x, y| Rgb([x as u8, y as u8, 0]));
/// let a = GlassFilter::with_seed(7);
/// let b = GlassFilter::with_seed(7);
/// assert_eq!(a.compute_color(&image, 8, 8), b.compute_color(&image, 8, 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlassFilter {
    seed: u64,
}

impl GlassFilter {
    /// Seeds the filter from the thread-local generator.
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn offsets(&self, x: u32, y: u32) -> (i64, i64) {
        let key = (u64::from(y) << 32) | u64::from(x);
        let mut rng = StdRng::seed_from_u64(self.seed ^ key);
        (
            rng.random_range(-GLASS_JITTER..=GLASS_JITTER),
            rng.random_range(-GLASS_JITTER..=GLASS_JITTER),
        )
    }
}

impl Default for GlassFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for GlassFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let (dx, dy) = self.offsets(x, y);
        source.sample_clamped(i64::from(x) + dx, i64::from(y) + dy)
    }

    fn name(&self) -> &'static str {
        "glass"
    }
}
