use image::Rgb;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Error;
use crate::filters::progress::{CancelToken, ProgressSink, ProgressSpan};
use crate::utils::validate_matching_dimensions;
use crate::Image;

/// Terminal outcome of a processing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Every column was processed
    Completed(Image<Rgb<u8>>),
    /// Cancellation was observed at a column boundary; no output is kept
    Cancelled,
}

impl PassOutcome {
    /// Returns the finished image, or `None` for a cancelled pass.
    pub fn into_image(self) -> Option<Image<Rgb<u8>>> {
        match self {
            Self::Completed(image) => Some(image),
            Self::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Per-pixel image transformation
///
/// A filter answers one question: given a source image and a coordinate,
/// what is the output color there. Anything a filter needs beyond the
/// source (kernel weights, image-wide statistics) is computed when the
/// filter is built and never changes afterwards, so the same
/// `(source, x, y)` always yields the same color.
///
/// The provided [`process`](Filter::process) drives a full pass over the
/// image column by column, reporting progress and honoring cancellation.
///
/// # Examples
///
/// ```rust
/// use imageops_filters::{CancelToken, Filter, Image, InvertFilter, NoProgress};
/// use image::Rgb;
///
/// let image: Image<Rgb<u8>> = Image::from_pixel(1, 1, Rgb([10, 20, 30]));
/// let outcome = InvertFilter.process(&image, &NoProgress, &CancelToken::new()).unwrap();
/// let inverted = outcome.into_image().unwrap();
/// assert_eq!(inverted.get_pixel(0, 0), &Rgb([245, 235, 225]));
/// ```
pub trait Filter: Send + Sync {
    /// Computes the output color at `(x, y)`.
    ///
    /// Must not mutate `source`.
    ///
    /// # Panics
    ///
    /// May panic if `(x, y)` lies outside `source`.
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8>;

    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Dimensions of the image this filter was prepared for, if any.
    ///
    /// Filters that prescan an image at construction return its size and
    /// refuse to process images of any other size.
    fn expected_dimensions(&self) -> Option<(u32, u32)> {
        None
    }

    /// Produces the filtered image, or `None` if cancelled.
    ///
    /// The default runs a single column-by-column pass. Composite filters
    /// override this to materialize intermediate images.
    fn render(
        &self,
        source: &Image<Rgb<u8>>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Option<Image<Rgb<u8>>> {
        run_columns(self, source, progress, cancel, ProgressSpan::FULL)
    }

    /// Runs a full pass over `source` into a new image.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - If the filter was prepared for an image
    ///   of a different size
    fn process(
        &self,
        source: &Image<Rgb<u8>>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<PassOutcome, Error> {
        if let Some(expected) = self.expected_dimensions() {
            validate_matching_dimensions(expected, source.dimensions())?;
        }

        let (width, height) = source.dimensions();
        debug!(filter = self.name(), width, height, "starting filter pass");

        match self.render(source, progress, cancel) {
            Some(output) => {
                progress.report(100);
                debug!(filter = self.name(), "filter pass completed");
                Ok(PassOutcome::Completed(output))
            }
            None => {
                info!(filter = self.name(), "filter pass cancelled");
                Ok(PassOutcome::Cancelled)
            }
        }
    }

    /// Runs a full pass and stores the result in `destination`.
    ///
    /// `destination` is only written when the pass completes; a cancelled
    /// pass leaves it untouched.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - If `destination` and `source` differ
    ///   in size, or the filter was prepared for another size
    fn process_into(
        &self,
        source: &Image<Rgb<u8>>,
        destination: &mut Image<Rgb<u8>>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<PassOutcome, Error> {
        validate_matching_dimensions(source.dimensions(), destination.dimensions())?;
        match self.process(source, progress, cancel)? {
            PassOutcome::Completed(output) => {
                destination.copy_from_slice(&output);
                Ok(PassOutcome::Completed(output))
            }
            PassOutcome::Cancelled => Ok(PassOutcome::Cancelled),
        }
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        (**self).compute_color(source, x, y)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn expected_dimensions(&self) -> Option<(u32, u32)> {
        (**self).expected_dimensions()
    }

    fn render(
        &self,
        source: &Image<Rgb<u8>>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Option<Image<Rgb<u8>>> {
        (**self).render(source, progress, cancel)
    }
}

/// Column-by-column driver shared by every filter.
///
/// Before column `x` the progress for `x / width` is reported and the
/// token is checked; a cancellation drops the partial output.
pub(crate) fn run_columns<F: Filter + ?Sized>(
    filter: &F,
    source: &Image<Rgb<u8>>,
    progress: &dyn ProgressSink,
    cancel: &CancelToken,
    span: ProgressSpan,
) -> Option<Image<Rgb<u8>>> {
    let (width, height) = source.dimensions();
    let mut output: Image<Rgb<u8>> = Image::new(width, height);

    for x in 0..width {
        progress.report(span.percent(x, width));
        if cancel.is_cancelled() {
            return None;
        }

        #[cfg(feature = "rayon")]
        {
            let column: Vec<Rgb<u8>> = (0..height)
                .into_par_iter()
                .map(|y| filter.compute_color(source, x, y))
                .collect();
            for (y, color) in (0..height).zip(column) {
                output.put_pixel(x, y, color);
            }
        }

        #[cfg(not(feature = "rayon"))]
        for y in 0..height {
            output.put_pixel(x, y, filter.compute_color(source, x, y));
        }
    }

    Some(output)
}
