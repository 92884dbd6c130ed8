//! Grayscale morphology: erosion, dilation and their compositions.
//!
//! The red channel is taken as the representative intensity and every
//! result is written as a gray triple. Neighborhoods are edge-clamped.

use image::Rgb;

use crate::filters::filter::{run_columns, Filter};
use crate::filters::kernel::StructuringElement;
use crate::filters::progress::{CancelToken, ProgressSink, ProgressSpan};
use crate::utils::clamp;
use crate::Image;

/// Min or max reduction over a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphologyOperation {
    Erosion,
    Dilation,
}

impl MorphologyOperation {
    /// Reduces the intensities selected by `element` around `(x, y)`.
    ///
    /// `intensity` receives edge-clamped in-bounds coordinates. An element
    /// with no active cell yields 255 for erosion and 0 for dilation.
    #[inline]
    fn reduce<I>(
        self,
        element: &StructuringElement,
        (width, height): (u32, u32),
        x: u32,
        y: u32,
        intensity: I,
    ) -> u8
    where
        I: Fn(u32, u32) -> u8,
    {
        let (cx, cy) = (i64::from(x), i64::from(y));
        let (max_x, max_y) = (i64::from(width) - 1, i64::from(height) - 1);
        let values = element.offsets().map(|(dx, dy)| {
            let sx = clamp(cx + dx, 0, max_x) as u32;
            let sy = clamp(cy + dy, 0, max_y) as u32;
            intensity(sx, sy)
        });

        match self {
            Self::Erosion => values.min().unwrap_or(u8::MAX),
            Self::Dilation => values.max().unwrap_or(u8::MIN),
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Erosion => Self::Dilation,
            Self::Dilation => Self::Erosion,
        }
    }
}

/// Erosion or dilation of the red channel
///
/// # Examples
///
/// ```rust
/// use imageops_filters::{Filter, Image, MorphologyFilter, StructuringElement};
/// use image::Rgb;
///
/// let mut image: Image<Rgb<u8>> = Image::new(5, 5);
/// image.put_pixel(2, 2, Rgb([200, 0, 0]));
///
/// let dilation = MorphologyFilter::dilation(StructuringElement::square(1));
/// assert_eq!(dilation.compute_color(&image, 1, 1), Rgb([200, 200, 200]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologyFilter {
    operation: MorphologyOperation,
    element: StructuringElement,
}

impl MorphologyFilter {
    pub fn new(operation: MorphologyOperation, element: StructuringElement) -> Self {
        Self { operation, element }
    }

    /// Neighborhood minimum.
    pub fn erosion(element: StructuringElement) -> Self {
        Self::new(MorphologyOperation::Erosion, element)
    }

    /// Neighborhood maximum.
    pub fn dilation(element: StructuringElement) -> Self {
        Self::new(MorphologyOperation::Dilation, element)
    }

    pub fn operation(&self) -> MorphologyOperation {
        self.operation
    }
}

impl Filter for MorphologyFilter {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let level = self
            .operation
            .reduce(&self.element, source.dimensions(), x, y, |sx, sy| {
                source.get_pixel(sx, sy)[0]
            });
        Rgb([level, level, level])
    }

    fn name(&self) -> &'static str {
        match self.operation {
            MorphologyOperation::Erosion => "erosion",
            MorphologyOperation::Dilation => "dilation",
        }
    }
}

/// Two-stage morphological operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    /// Erosion, then dilation
    Opening,
    /// Dilation, then erosion
    Closing,
    /// Source minus its opening, per channel
    TopHat,
}

/// Opening, closing and top-hat
///
/// The first stage is fully materialized into its own image before the
/// second stage reads any pixel of it, so results never depend on the
/// order in which pixels are visited. [`compute_color`](Filter::compute_color)
/// evaluates the first stage on demand for each neighbor of `(x, y)` and
/// gives the same answer as a full pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologicalComposite {
    kind: CompositeKind,
    element: StructuringElement,
}

impl MorphologicalComposite {
    pub fn new(kind: CompositeKind, element: StructuringElement) -> Self {
        Self { kind, element }
    }

    pub fn opening(element: StructuringElement) -> Self {
        Self::new(CompositeKind::Opening, element)
    }

    pub fn closing(element: StructuringElement) -> Self {
        Self::new(CompositeKind::Closing, element)
    }

    pub fn top_hat(element: StructuringElement) -> Self {
        Self::new(CompositeKind::TopHat, element)
    }

    pub fn kind(&self) -> CompositeKind {
        self.kind
    }

    fn first_operation(&self) -> MorphologyOperation {
        match self.kind {
            CompositeKind::Opening | CompositeKind::TopHat => MorphologyOperation::Erosion,
            CompositeKind::Closing => MorphologyOperation::Dilation,
        }
    }

    fn stages(&self) -> (MorphologyFilter, MorphologyFilter) {
        let first = self.first_operation();
        (
            MorphologyFilter::new(first, self.element.clone()),
            MorphologyFilter::new(first.opposite(), self.element.clone()),
        )
    }
}

/// Per-channel `source - opened`, saturating at 0.
fn subtract(source: Rgb<u8>, opened: Rgb<u8>) -> Rgb<u8> {
    let Rgb([r, g, b]) = source;
    let Rgb([o, _, _]) = opened;
    Rgb([r.saturating_sub(o), g.saturating_sub(o), b.saturating_sub(o)])
}

impl Filter for MorphologicalComposite {
    fn compute_color(&self, source: &Image<Rgb<u8>>, x: u32, y: u32) -> Rgb<u8> {
        let first = self.first_operation();
        let dimensions = source.dimensions();
        let level = first
            .opposite()
            .reduce(&self.element, dimensions, x, y, |nx, ny| {
                first.reduce(&self.element, dimensions, nx, ny, |sx, sy| {
                    source.get_pixel(sx, sy)[0]
                })
            });
        let combined = Rgb([level, level, level]);

        match self.kind {
            CompositeKind::TopHat => subtract(*source.get_pixel(x, y), combined),
            CompositeKind::Opening | CompositeKind::Closing => combined,
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            CompositeKind::Opening => "opening",
            CompositeKind::Closing => "closing",
            CompositeKind::TopHat => "top-hat",
        }
    }

    fn render(
        &self,
        source: &Image<Rgb<u8>>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Option<Image<Rgb<u8>>> {
        let (first, second) = self.stages();
        let intermediate = run_columns(&first, source, progress, cancel, ProgressSpan::stage(0, 2))?;
        let mut output = run_columns(
            &second,
            &intermediate,
            progress,
            cancel,
            ProgressSpan::stage(1, 2),
        )?;

        if self.kind == CompositeKind::TopHat {
            for (x, y, pixel) in output.enumerate_pixels_mut() {
                *pixel = subtract(*source.get_pixel(x, y), *pixel);
            }
        }
        Some(output)
    }
}
