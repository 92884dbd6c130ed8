use thiserror::Error;

/// Error type for filter construction and processing
///
/// Cancellation is not represented here: a cancelled pass is a normal
/// outcome and is reported through [`PassOutcome::Cancelled`](crate::PassOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Kernel or structuring element with an unusable shape
    ///
    /// Returned at construction when a dimension is zero or even, or
    /// when the rows have different lengths.
    #[error("Invalid kernel ({width}x{height}): {reason}")]
    InvalidKernel {
        /// Width of the first row (0 when there are no rows)
        width: usize,
        /// Number of rows
        height: usize,
        /// What is wrong with the shape
        reason: &'static str,
    },

    /// Image dimensions do not match
    ///
    /// Returned at the start of a pass when the destination buffer differs
    /// from the source, or when a filter that prescanned one image is
    /// applied to an image of another size.
    #[error("Image dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// No filter is registered under this name
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// The background pass thread panicked before producing an outcome
    #[error("Filter worker thread panicked")]
    WorkerPanicked,
}
