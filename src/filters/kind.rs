//! Named registry of every filter with its default parameters.

use std::fmt;
use std::str::FromStr;

use image::Rgb;

use crate::error::Error;
use crate::filters::convolution::ConvolutionFilter;
use crate::filters::filter::Filter;
use crate::filters::geometric::{GlassFilter, RotationFilter, ShiftFilter, WavesFilter};
use crate::filters::kernel::{GradientAxis, StructuringElement};
use crate::filters::morphology::{MorphologicalComposite, MorphologyFilter};
use crate::filters::point::{BrightnessFilter, GrayscaleFilter, InvertFilter, SepiaFilter};
use crate::filters::rank::{EdgeGlowFilter, MedianFilter};
use crate::filters::statistics::{GreyWorldFilter, LinearStretchFilter};
use crate::Image;

/// Every filter the crate provides, addressable by a kebab-case name
///
/// # Examples
///
/// ```rust
/// use imageops_filters::FilterKind;
///
/// let kind: FilterKind = "top-hat".parse().unwrap();
/// assert_eq!(kind, FilterKind::TopHat);
/// assert_eq!(kind.to_string(), "top-hat");
/// assert!("unsharp".parse::<FilterKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Invert,
    Grayscale,
    Sepia,
    Brightness,
    Blur,
    Gaussian,
    SobelX,
    SobelY,
    PrewittX,
    PrewittY,
    Emboss,
    Sharpen,
    SharpenStrong,
    MotionBlur,
    Median,
    EdgeGlow,
    Erosion,
    Dilation,
    Opening,
    Closing,
    TopHat,
    GreyWorld,
    LinearStretch,
    Shift,
    Rotation,
    WavesByRow,
    WavesByColumn,
    Glass,
}

impl FilterKind {
    pub const ALL: [Self; 28] = [
        Self::Invert,
        Self::Grayscale,
        Self::Sepia,
        Self::Brightness,
        Self::Blur,
        Self::Gaussian,
        Self::SobelX,
        Self::SobelY,
        Self::PrewittX,
        Self::PrewittY,
        Self::Emboss,
        Self::Sharpen,
        Self::SharpenStrong,
        Self::MotionBlur,
        Self::Median,
        Self::EdgeGlow,
        Self::Erosion,
        Self::Dilation,
        Self::Opening,
        Self::Closing,
        Self::TopHat,
        Self::GreyWorld,
        Self::LinearStretch,
        Self::Shift,
        Self::Rotation,
        Self::WavesByRow,
        Self::WavesByColumn,
        Self::Glass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Brightness => "brightness",
            Self::Blur => "blur",
            Self::Gaussian => "gaussian",
            Self::SobelX => "sobel-x",
            Self::SobelY => "sobel-y",
            Self::PrewittX => "prewitt-x",
            Self::PrewittY => "prewitt-y",
            Self::Emboss => "emboss",
            Self::Sharpen => "sharpen",
            Self::SharpenStrong => "sharpen-strong",
            Self::MotionBlur => "motion-blur",
            Self::Median => "median",
            Self::EdgeGlow => "edge-glow",
            Self::Erosion => "erosion",
            Self::Dilation => "dilation",
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::TopHat => "top-hat",
            Self::GreyWorld => "grey-world",
            Self::LinearStretch => "linear-stretch",
            Self::Shift => "shift",
            Self::Rotation => "rotation",
            Self::WavesByRow => "waves-by-row",
            Self::WavesByColumn => "waves-by-column",
            Self::Glass => "glass",
        }
    }

    /// Whether [`build`](Self::build) scans the source image.
    pub fn needs_prescan(&self) -> bool {
        matches!(self, Self::GreyWorld | Self::LinearStretch)
    }

    /// Builds the filter with its default parameters.
    ///
    /// `source` is only read by filters that depend on the image as a
    /// whole: the statistics filters scan it and the rotation pivots about
    /// its center.
    pub fn build(&self, source: &Image<Rgb<u8>>) -> Box<dyn Filter> {
        let element = StructuringElement::default;
        match self {
            Self::Invert => Box::new(InvertFilter),
            Self::Grayscale => Box::new(GrayscaleFilter),
            Self::Sepia => Box::new(SepiaFilter::default()),
            Self::Brightness => Box::new(BrightnessFilter::default()),
            Self::Blur => Box::new(ConvolutionFilter::box_blur()),
            Self::Gaussian => Box::new(ConvolutionFilter::gaussian()),
            Self::SobelX => Box::new(ConvolutionFilter::sobel(GradientAxis::X)),
            Self::SobelY => Box::new(ConvolutionFilter::sobel(GradientAxis::Y)),
            Self::PrewittX => Box::new(ConvolutionFilter::prewitt(GradientAxis::X)),
            Self::PrewittY => Box::new(ConvolutionFilter::prewitt(GradientAxis::Y)),
            Self::Emboss => Box::new(ConvolutionFilter::emboss()),
            Self::Sharpen => Box::new(ConvolutionFilter::sharpen()),
            Self::SharpenStrong => Box::new(ConvolutionFilter::sharpen_strong()),
            Self::MotionBlur => Box::new(ConvolutionFilter::motion_blur()),
            Self::Median => Box::new(MedianFilter::default()),
            Self::EdgeGlow => Box::new(EdgeGlowFilter::default()),
            Self::Erosion => Box::new(MorphologyFilter::erosion(element())),
            Self::Dilation => Box::new(MorphologyFilter::dilation(element())),
            Self::Opening => Box::new(MorphologicalComposite::opening(element())),
            Self::Closing => Box::new(MorphologicalComposite::closing(element())),
            Self::TopHat => Box::new(MorphologicalComposite::top_hat(element())),
            Self::GreyWorld => Box::new(GreyWorldFilter::new(source)),
            Self::LinearStretch => Box::new(LinearStretchFilter::new(source)),
            Self::Shift => Box::new(ShiftFilter::default()),
            Self::Rotation => {
                let (width, height) = source.dimensions();
                Box::new(RotationFilter::centered(
                    width,
                    height,
                    std::f64::consts::FRAC_PI_4,
                ))
            }
            Self::WavesByRow => Box::new(WavesFilter::by_row()),
            Self::WavesByColumn => Box::new(WavesFilter::by_column()),
            Self::Glass => Box::new(GlassFilter::new()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}
