use itertools::iproduct;
use tracing::trace;

use crate::error::Error;

/// Gradient direction of the Sobel and Prewitt kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientAxis {
    /// Responds to intensity changes along x (vertical edges)
    X,
    /// Responds to intensity changes along y (horizontal edges)
    Y,
}

/// Checks that `rows` form a non-empty, rectangular, odd-sized grid.
///
/// Returns `(width, height)`.
fn validate_grid<T>(rows: &[Vec<T>]) -> Result<(usize, usize), Error> {
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    let invalid = |reason| Error::InvalidKernel {
        width,
        height,
        reason,
    };

    if width == 0 || height == 0 {
        return Err(invalid("dimensions must be non-zero"));
    }
    if rows.iter().any(|row| row.len() != width) {
        return Err(invalid("all rows must have the same length"));
    }
    if width % 2 == 0 || height % 2 == 0 {
        return Err(invalid("dimensions must be odd"));
    }
    Ok((width, height))
}

/// Grid of convolution weights
///
/// Rows run along y and columns along x, so `weight(dx, dy)` is the factor
/// applied to the neighbor at `(x + dx, y + dy)`. Both dimensions are odd
/// and the radii are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    width: usize,
    height: usize,
    radius_x: i64,
    radius_y: i64,
}

impl Kernel {
    /// Builds a kernel from rows of weights.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidKernel` - If there are no rows, the rows differ in
    ///   length, or either dimension is even
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imageops_filters::Kernel;
    ///
    /// let kernel = Kernel::new(vec![vec![0.0, 1.0, 0.0]]).unwrap();
    /// assert_eq!(kernel.radius(), (1, 0));
    /// assert!(Kernel::new(vec![vec![1.0, 1.0]]).is_err());
    /// ```
    pub fn new(rows: Vec<Vec<f32>>) -> Result<Self, Error> {
        let (width, height) = validate_grid(&rows)?;
        trace!(width, height, "kernel created");
        Ok(Self {
            weights: rows.into_iter().flatten().collect(),
            width,
            height,
            radius_x: (width / 2) as i64,
            radius_y: (height / 2) as i64,
        })
    }

    fn from_fixed<const N: usize>(rows: [[f32; N]; N]) -> Self {
        let radius = (N / 2) as i64;
        Self {
            weights: rows.iter().flatten().copied().collect(),
            width: N,
            height: N,
            radius_x: radius,
            radius_y: radius,
        }
    }

    /// 3×3 box blur, every weight `1/9`.
    pub fn box_blur() -> Self {
        Self::from_fixed([[1.0 / 9.0; 3]; 3])
    }

    /// Square Gaussian kernel of side `2 * radius + 1`.
    ///
    /// Weights are `exp(-(i² + j²) / sigma²)` normalized to sum to 1. A
    /// `sigma` that is zero, negative or NaN gives the identity kernel of
    /// the same size.
    pub fn gaussian(radius: u32, sigma: f32) -> Self {
        let r = radius as i64;
        let side = 2 * radius as usize + 1;

        if sigma.is_nan() || sigma <= 0.0 {
            let mut weights = vec![0.0; side * side];
            weights[side * side / 2] = 1.0;
            return Self {
                weights,
                width: side,
                height: side,
                radius_x: r,
                radius_y: r,
            };
        }

        let sigma_sq = sigma * sigma;
        let mut weights: Vec<f32> = iproduct!(-r..=r, -r..=r)
            .map(|(j, i)| (-((i * i + j * j) as f32) / sigma_sq).exp())
            .collect();
        let norm: f32 = weights.iter().sum();
        weights.iter_mut().for_each(|w| *w /= norm);

        Self {
            weights,
            width: side,
            height: side,
            radius_x: r,
            radius_y: r,
        }
    }

    /// 3×3 Sobel gradient kernel.
    pub fn sobel(axis: GradientAxis) -> Self {
        match axis {
            GradientAxis::X => {
                Self::from_fixed([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
            }
            GradientAxis::Y => {
                Self::from_fixed([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]])
            }
        }
    }

    /// 3×3 Prewitt gradient kernel.
    pub fn prewitt(axis: GradientAxis) -> Self {
        match axis {
            GradientAxis::X => {
                Self::from_fixed([[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]])
            }
            GradientAxis::Y => {
                Self::from_fixed([[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]])
            }
        }
    }

    pub fn emboss() -> Self {
        Self::from_fixed([[0.0, 1.0, 0.0], [1.0, 0.0, -1.0], [0.0, -1.0, 0.0]])
    }

    /// Cross-shaped sharpen, center weight 5.
    pub fn sharpen() -> Self {
        Self::from_fixed([[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]])
    }

    /// Full 3×3 sharpen, center weight 9.
    pub fn sharpen_strong() -> Self {
        Self::from_fixed([[-1.0, -1.0, -1.0], [-1.0, 9.0, -1.0], [-1.0, -1.0, -1.0]])
    }

    /// 7×7 kernel with `1/7` on the main diagonal and 0 elsewhere.
    ///
    /// Only samples at equal x and y offsets contribute.
    pub fn motion_blur() -> Self {
        const SIZE: usize = 7;
        let mut rows = [[0.0f32; SIZE]; SIZE];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0 / SIZE as f32;
        }
        Self::from_fixed(rows)
    }

    /// `(radius_x, radius_y)`
    pub fn radius(&self) -> (i64, i64) {
        (self.radius_x, self.radius_y)
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Weight applied to the neighbor at offset `(dx, dy)`.
    ///
    /// # Panics
    ///
    /// Panics if the offset lies outside the kernel radius.
    #[inline]
    pub fn weight(&self, dx: i64, dy: i64) -> f32 {
        let column = (dx + self.radius_x) as usize;
        let row = (dy + self.radius_y) as usize;
        self.weights[row * self.width + column]
    }

    /// Iterates `(dx, dy, weight)` row by row.
    pub fn taps(&self) -> impl Iterator<Item = (i64, i64, f32)> + '_ {
        iproduct!(-self.radius_y..=self.radius_y, -self.radius_x..=self.radius_x)
            .zip(self.weights.iter())
            .map(|((dy, dx), &w)| (dx, dy, w))
    }
}

/// Grid of participation flags for morphological operators
///
/// Same shape rules as [`Kernel`]. A `true` flag means the neighbor at that
/// offset takes part in the min/max reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    flags: Vec<bool>,
    width: usize,
    height: usize,
    radius_x: i64,
    radius_y: i64,
}

impl StructuringElement {
    /// Builds a structuring element from rows of flags.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidKernel` - If there are no rows, the rows differ in
    ///   length, or either dimension is even
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, Error> {
        let (width, height) = validate_grid(&rows)?;
        Ok(Self {
            flags: rows.into_iter().flatten().collect(),
            width,
            height,
            radius_x: (width / 2) as i64,
            radius_y: (height / 2) as i64,
        })
    }

    /// Builds a structuring element from integer cells, as typed into a grid.
    ///
    /// Only cells equal to 1 participate.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidKernel` - Same rules as [`new`](Self::new)
    pub fn from_flags<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, Error> {
        Self::new(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|&cell| cell == 1).collect())
                .collect(),
        )
    }

    /// The default 7×7 disk-like element.
    pub fn disk7() -> Self {
        const ROWS: [[u8; 7]; 7] = [
            [0, 0, 1, 1, 1, 0, 0],
            [0, 1, 1, 1, 1, 1, 0],
            [1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1],
            [0, 1, 1, 1, 1, 1, 0],
            [0, 1, 1, 1, 1, 0, 0],
        ];
        Self {
            flags: ROWS.iter().flatten().map(|&cell| cell == 1).collect(),
            width: 7,
            height: 7,
            radius_x: 3,
            radius_y: 3,
        }
    }

    /// Every cell of a `(2r + 1)`-sided square participates.
    pub fn square(radius: u32) -> Self {
        let side = 2 * radius as usize + 1;
        Self {
            flags: vec![true; side * side],
            width: side,
            height: side,
            radius_x: radius as i64,
            radius_y: radius as i64,
        }
    }

    /// Center row and center column of a `(2r + 1)`-sided square.
    pub fn cross(radius: u32) -> Self {
        let r = radius as i64;
        let side = 2 * radius as usize + 1;
        Self {
            flags: iproduct!(-r..=r, -r..=r)
                .map(|(dy, dx)| dx == 0 || dy == 0)
                .collect(),
            width: side,
            height: side,
            radius_x: r,
            radius_y: r,
        }
    }

    /// `(radius_x, radius_y)`
    pub fn radius(&self) -> (i64, i64) {
        (self.radius_x, self.radius_y)
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Offsets `(dx, dy)` of the participating cells, row by row.
    pub fn offsets(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        iproduct!(-self.radius_y..=self.radius_y, -self.radius_x..=self.radius_x)
            .zip(self.flags.iter())
            .filter(|(_, active)| **active)
            .map(|((dy, dx), _)| (dx, dy))
    }
}

impl Default for StructuringElement {
    fn default() -> Self {
        Self::disk7()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_validation() {
        assert!(Kernel::new(vec![vec![1.0]]).is_ok());
        assert!(Kernel::new(vec![vec![1.0; 3]; 5]).is_ok());

        assert_eq!(
            Kernel::new(vec![]),
            Err(Error::InvalidKernel {
                width: 0,
                height: 0,
                reason: "dimensions must be non-zero"
            })
        );
        assert!(matches!(
            Kernel::new(vec![vec![]]),
            Err(Error::InvalidKernel { .. })
        ));
        assert!(matches!(
            Kernel::new(vec![vec![1.0; 3], vec![1.0; 2], vec![1.0; 3]]),
            Err(Error::InvalidKernel { reason: "all rows must have the same length", .. })
        ));
        assert!(matches!(
            Kernel::new(vec![vec![1.0; 4]; 3]),
            Err(Error::InvalidKernel { reason: "dimensions must be odd", .. })
        ));
        assert!(matches!(
            Kernel::new(vec![vec![1.0; 3]; 2]),
            Err(Error::InvalidKernel { reason: "dimensions must be odd", .. })
        ));
    }

    #[test]
    fn test_rectangular_kernel_radius() {
        let kernel = Kernel::new(vec![vec![0.0, 0.0, 1.0, 0.0, 0.0]; 3]).unwrap();
        assert_eq!(kernel.radius(), (2, 1));
        assert_eq!(kernel.dimensions(), (5, 3));
        assert_eq!(kernel.weight(0, -1), 1.0);
        assert_eq!(kernel.weight(2, 1), 0.0);
    }

    #[test]
    fn test_gaussian_normalized() {
        let kernel = Kernel::gaussian(3, 2.0);
        assert_eq!(kernel.dimensions(), (7, 7));
        let sum: f32 = kernel.taps().map(|(_, _, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(kernel.weight(0, 0) > kernel.weight(1, 0));
        assert!((kernel.weight(1, 2) - kernel.weight(2, 1)).abs() < 1e-7);
        assert!((kernel.weight(-3, 0) - kernel.weight(3, 0)).abs() < 1e-7);
    }

    #[test]
    fn test_gaussian_degenerate_sigma_is_identity() {
        for sigma in [0.0, -1.5, f32::NAN] {
            let kernel = Kernel::gaussian(2, sigma);
            assert_eq!(kernel.dimensions(), (5, 5));
            for (dx, dy, w) in kernel.taps() {
                let expected = if (dx, dy) == (0, 0) { 1.0 } else { 0.0 };
                assert_eq!(w, expected, "sigma {sigma} at ({dx}, {dy})");
            }
        }
    }

    #[test]
    fn test_prewitt_and_emboss_orientation() {
        let x = Kernel::prewitt(GradientAxis::X);
        assert_eq!(x.weight(1, -1), 1.0);
        assert_eq!(x.weight(-1, 1), -1.0);
        assert_eq!(x.weight(0, 1), 0.0);

        let y = Kernel::prewitt(GradientAxis::Y);
        assert_eq!(y.weight(-1, 1), 1.0);
        assert_eq!(y.weight(1, -1), -1.0);
        assert_eq!(y.weight(1, 0), 0.0);

        let emboss = Kernel::emboss();
        assert_eq!(emboss.weight(-1, 0), 1.0);
        assert_eq!(emboss.weight(0, -1), 1.0);
        assert_eq!(emboss.weight(1, 0), -1.0);
        assert_eq!(emboss.weight(0, 1), -1.0);
        assert_eq!(emboss.weight(0, 0), 0.0);
    }

    #[test]
    fn test_sobel_orientation() {
        let x = Kernel::sobel(GradientAxis::X);
        assert_eq!(x.weight(1, 0), 2.0);
        assert_eq!(x.weight(-1, 0), -2.0);
        assert_eq!(x.weight(0, 1), 0.0);

        let y = Kernel::sobel(GradientAxis::Y);
        assert_eq!(y.weight(0, 1), 2.0);
        assert_eq!(y.weight(0, -1), -2.0);
        assert_eq!(y.weight(1, 0), 0.0);
    }

    #[test]
    fn test_motion_blur_diagonal() {
        let kernel = Kernel::motion_blur();
        assert_eq!(kernel.radius(), (3, 3));
        for (dx, dy, w) in kernel.taps() {
            if dx == dy {
                assert!((w - 1.0 / 7.0).abs() < 1e-7);
            } else {
                assert_eq!(w, 0.0);
            }
        }
    }

    #[test]
    fn test_taps_order() {
        let kernel = Kernel::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]])
            .unwrap();
        let taps: Vec<_> = kernel.taps().collect();
        assert_eq!(taps[0], (-1, -1, 1.0));
        assert_eq!(taps[2], (1, -1, 3.0));
        assert_eq!(taps[3], (-1, 0, 4.0));
        assert_eq!(taps[8], (1, 1, 9.0));
    }

    #[test]
    fn test_structuring_element_from_flags() {
        let element = StructuringElement::from_flags(&[[0u8, 1, 0], [1, 1, 1], [0, 2, 0]]).unwrap();
        let offsets: Vec<_> = element.offsets().collect();
        assert_eq!(offsets, vec![(0, -1), (-1, 0), (0, 0), (1, 0)]);

        assert!(StructuringElement::from_flags(&[[1u8, 1]]).is_err());
        assert!(StructuringElement::new(vec![vec![true], vec![true, true]]).is_err());
    }

    #[test]
    fn test_disk7_shape() {
        let element = StructuringElement::disk7();
        assert_eq!(element.radius(), (3, 3));
        assert_eq!(element.offsets().count(), 38);
        assert!(element.offsets().any(|o| o == (0, 0)));
        assert!(!element.offsets().any(|o| o == (-3, -3)));
    }

    #[test]
    fn test_square_and_cross() {
        assert_eq!(StructuringElement::square(1).offsets().count(), 9);
        assert_eq!(StructuringElement::square(0).offsets().collect::<Vec<_>>(), vec![(0, 0)]);
        let cross: Vec<_> = StructuringElement::cross(1).offsets().collect();
        assert_eq!(cross, vec![(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)]);
    }
}
