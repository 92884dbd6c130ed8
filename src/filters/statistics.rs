//! Filters driven by statistics of the whole image.
//!
//! The prescan runs once when the filter is built; the filter then only
//! accepts images of the same size as the one it scanned.

use image::Rgb;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::trace;

use crate::filters::filter::Filter;
use crate::utils::{clamp_channel, clamp_channel_i32};
use crate::Image;

/// Per-channel sum, minimum and maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChannelStats {
    count: u64,
    sums: [u64; 3],
    min: [u8; 3],
    max: [u8; 3],
}

impl ChannelStats {
    fn empty() -> Self {
        Self {
            count: 0,
            sums: [0; 3],
            min: [u8::MAX; 3],
            max: [u8::MIN; 3],
        }
    }

    fn add(mut self, pixel: &[u8]) -> Self {
        self.count += 1;
        for c in 0..3 {
            self.sums[c] += u64::from(pixel[c]);
            self.min[c] = self.min[c].min(pixel[c]);
            self.max[c] = self.max[c].max(pixel[c]);
        }
        self
    }

    #[cfg(feature = "rayon")]
    fn merge(mut self, other: Self) -> Self {
        self.count += other.count;
        for c in 0..3 {
            self.sums[c] += other.sums[c];
            self.min[c] = self.min[c].min(other.min[c]);
            self.max[c] = self.max[c].max(other.max[c]);
        }
        self
    }

    /// Reduction over every pixel; order does not matter.
    fn scan(image: &Image<Rgb<u8>>) -> Self {
        let raw: &[u8] = image.as_raw();

        #[cfg(feature = "rayon")]
        let stats = raw
            .par_chunks_exact(3)
            .fold(Self::empty, Self::add)
            .reduce(Self::empty, Self::merge);

        #[cfg(not(feature = "rayon"))]
        let stats = raw.chunks_exact(3).fold(Self::empty(), Self::add);

        stats
    }
}

/// Grey-world color balance
///
/// Each channel is multiplied by `channel_mean / overall_mean`, where the
/// overall mean is the average of the three channel means.
///
/// # Examples
///
/// ```rust
/// use imageops_filters::{Filter, GreyWorldFilter, Image};
/// use image::Rgb;
///
/// let image: Image<Rgb<u8>> = Image::from_pixel(4, 4, Rgb([90, 90, 90]));
/// let filter = GreyWorldFilter::new(&image);
/// assert_eq!(filter.coefficients(), [1.0, 1.0, 1.0]);
/// assert_eq!(filter.compute_color(&image, 0, 0), Rgb([90, 90, 90]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreyWorldFilter {
    coefficients: [f64; 3],
    dimensions: (u32, u32),
}

impl GreyWorldFilter {
    /// Scans `image` and derives the channel coefficients.
    ///
    /// An empty or entirely black image yields coefficients of 1.
    pub fn new(image: &Image<Rgb<u8>>) -> Self {
        let stats = ChannelStats::scan(image);
        let coefficients = if stats.count == 0 {
            [1.0; 3]
        } else {
            let means = stats.sums.map(|sum| sum as f64 / stats.count as f64);
            let overall = means.iter().sum::<f64>() / 3.0;
            if overall > 0.0 {
                means.map(|mean| mean / overall)
            } else {
                [1.0; 3]
            }
        };
        trace!(?coefficients, "grey world prescan");

        Self {
            coefficients,
            dimensions: image.dimensions(),
        }
    }

    /// `[red, green, blue]` multipliers.
    pub fn coefficients(&self) -> [f64; 3] {
        self.coefficients
    }
}

impl Filter for GreyWorldFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let Rgb(channels) = *source.get_pixel(x, y);
        let mut output = [0u8; 3];
        for c in 0..3 {
            output[c] = clamp_channel((f64::from(channels[c]) * self.coefficients[c]) as f32);
        }
        Rgb(output)
    }

    fn name(&self) -> &'static str {
        "grey-world"
    }

    fn expected_dimensions(&self) -> Option<(u32, u32)> {
        Some(self.dimensions)
    }
}

/// Linear contrast stretch
///
/// Maps each channel's `[min, max]` range onto `[0, 255]` with
/// `(value - min) * 255 / (max - min)`. A channel with an empty range maps
/// every value to its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearStretchFilter {
    min: [u8; 3],
    max: [u8; 3],
    dimensions: (u32, u32),
}

impl LinearStretchFilter {
    /// Scans `image` for per-channel extremes.
    pub fn new(image: &Image<Rgb<u8>>) -> Self {
        let stats = ChannelStats::scan(image);
        trace!(min = ?stats.min, max = ?stats.max, "linear stretch prescan");
        Self {
            min: stats.min,
            max: stats.max,
            dimensions: image.dimensions(),
        }
    }

    /// `([r, g, b] minima, [r, g, b] maxima)`
    pub fn range(&self) -> ([u8; 3], [u8; 3]) {
        (self.min, self.max)
    }

    fn stretch(&self, channel: usize, value: u8) -> u8 {
        let (lo, hi) = (i32::from(self.min[channel]), i32::from(self.max[channel]));
        if hi <= lo {
            return self.min[channel];
        }
        clamp_channel_i32((i32::from(value) - lo) * 255 / (hi - lo))
    }
}

impl Filter for LinearStretchFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let Rgb([r, g, b]) = *source.get_pixel(x, y);
        Rgb([self.stretch(0, r), self.stretch(1, g), self.stretch(2, b)])
    }

    fn name(&self) -> &'static str {
        "linear-stretch"
    }

    fn expected_dimensions(&self) -> Option<(u32, u32)> {
        Some(self.dimensions)
    }
}
