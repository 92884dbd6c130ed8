use image::Rgb;

use crate::filters::filter::Filter;
use crate::filters::kernel::{GradientAxis, Kernel};
use crate::utils::{clamp_channel, ClampedSample};
use crate::Image;

/// Weighted neighborhood sum around `(x, y)`, per channel.
///
/// `sample` is queried with unclamped coordinates and is responsible for
/// the boundary policy. Channel sums are truncated and clamped to `[0, 255]`.
#[inline]
pub(crate) fn convolve_at<S>(kernel: &Kernel, x: u32, y: u32, sample: S) -> Rgb<u8>
where
    S: Fn(i64, i64) -> Rgb<u8>,
{
    let (cx, cy) = (i64::from(x), i64::from(y));
    let mut sums = [0.0f32; 3];

    for (dx, dy, weight) in kernel.taps() {
        let Rgb(channels) = sample(cx + dx, cy + dy);
        for (sum, channel) in sums.iter_mut().zip(channels) {
            *sum += f32::from(channel) * weight;
        }
    }

    Rgb(sums.map(clamp_channel))
}

/// Convolution with an arbitrary kernel, edge-clamped
///
/// Each channel is convolved independently; pixels outside the image
/// replicate the nearest border pixel.
///
/// # Examples
///
/// ```rust
/// use imageops_filters::{CancelToken, ConvolutionFilter, Filter, Image, NoProgress};
/// use image::Rgb;
///
/// let black: Image<Rgb<u8>> = Image::new(3, 3);
/// let blurred = ConvolutionFilter::box_blur()
///     .process(&black, &NoProgress, &CancelToken::new())
///     .unwrap()
///     .into_image()
///     .unwrap();
/// assert_eq!(blurred, black);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionFilter {
    kernel: Kernel,
    name: &'static str,
}

impl ConvolutionFilter {
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel,
            name: "convolution",
        }
    }

    fn named(kernel: Kernel, name: &'static str) -> Self {
        Self { kernel, name }
    }

    pub fn box_blur() -> Self {
        Self::named(Kernel::box_blur(), "blur")
    }

    /// Gaussian blur with radius 3 and sigma 2.
    pub fn gaussian() -> Self {
        Self::gaussian_with(3, 2.0)
    }

    pub fn gaussian_with(radius: u32, sigma: f32) -> Self {
        Self::named(Kernel::gaussian(radius, sigma), "gaussian")
    }

    pub fn sobel(axis: GradientAxis) -> Self {
        Self::named(Kernel::sobel(axis), "sobel")
    }

    pub fn prewitt(axis: GradientAxis) -> Self {
        Self::named(Kernel::prewitt(axis), "prewitt")
    }

    pub fn emboss() -> Self {
        Self::named(Kernel::emboss(), "emboss")
    }

    pub fn sharpen() -> Self {
        Self::named(Kernel::sharpen(), "sharpen")
    }

    pub fn sharpen_strong() -> Self {
        Self::named(Kernel::sharpen_strong(), "sharpen-strong")
    }

    pub fn motion_blur() -> Self {
        Self::named(Kernel::motion_blur(), "motion-blur")
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

impl Filter for ConvolutionFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        convolve_at(&self.kernel, x, y, |sx, sy| source.sample_clamped(sx, sy))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
