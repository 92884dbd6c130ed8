mod error;
mod filters;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::Error;
pub use filters::convolution::ConvolutionFilter;
pub use filters::filter::{Filter, PassOutcome};
pub use filters::geometric::{GlassFilter, RotationFilter, ShiftFilter, WaveDriver, WavesFilter};
pub use filters::kernel::{GradientAxis, Kernel, StructuringElement};
pub use filters::kind::FilterKind;
pub use filters::morphology::{
    CompositeKind, MorphologicalComposite, MorphologyFilter, MorphologyOperation,
};
pub use filters::point::{BrightnessFilter, GrayscaleFilter, InvertFilter, SepiaFilter};
pub use filters::progress::{CancelToken, NoProgress, ProgressSink};
pub use filters::rank::{EdgeGlowFilter, MedianFilter};
pub use filters::statistics::{GreyWorldFilter, LinearStretchFilter};
pub use filters::worker::{spawn_pass, PassHandle};
pub use utils::{luminance, luminance_level, ClampedSample, LUMINANCE_WEIGHTS};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
