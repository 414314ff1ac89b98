//! Laplacian-of-Gaussian and Difference-of-Gaussians filters

use crate::blur::{BlurOptions, blur};
use crate::check::check_same_bounds;
use crate::convolve::convolve;
use crate::{FilterResult, Kernel2D};
use grayedge_core::{GrayImage, Image, to_gray};

// Row-major, 5 per row.
const LOG_COEFFICIENTS: &[f64] = &[
    0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, -16.0, 2.0, 1.0, 0.0, 1.0, 2.0,
    1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0,
];

/// 5x5 Laplacian-of-Gaussian approximation.
///
/// The coefficients sum to zero, so the normalization factor is 1.
pub static LOG_KERNEL: Kernel2D = Kernel2D::from_static(5, LOG_COEFFICIENTS, 1.0);

/// Convolve `src` with [`LOG_KERNEL`] into `dst`.
///
/// Negative responses wrap around like every other convolution output.
///
/// # Errors
///
/// Returns [`crate::FilterError::IncompatibleBounds`] if `dst` does not cover
/// the bounds of `src`.
pub fn laplacian_of_gaussian(dst: &mut GrayImage, src: &dyn Image) -> FilterResult<()> {
    check_same_bounds(src, dst)?;
    let srcg = to_gray(src);
    convolve(dst, &srcg, &LOG_KERNEL)
}

/// Write `|blur(src, sd0) - blur(src, sd1)|` into `dst`.
///
/// The result is symmetric in `sd0` and `sd1`.
///
/// # Arguments
/// * `dst` - Output image with the bounds of `src`
/// * `src` - Input image of any layout
/// * `sd0`, `sd1` - Standard deviations of the two blurs
///
/// # Errors
///
/// - [`crate::FilterError::IncompatibleBounds`] if `dst` does not cover the
///   bounds of `src`
/// - [`crate::FilterError::InvalidParameters`] if either deviation is not a
///   positive finite number
pub fn difference_of_gaussians(
    dst: &mut GrayImage,
    src: &dyn Image,
    sd0: f64,
    sd1: f64,
) -> FilterResult<()> {
    check_same_bounds(src, dst)?;
    let srcg = to_gray(src);
    let b = srcg.bounds();

    let mut m0 = GrayImage::new(b);
    blur(&mut m0, &srcg, Some(&BlurOptions::with_std_dev(sd0)))?;
    let mut m1 = GrayImage::new(b);
    blur(&mut m1, &srcg, Some(&BlurOptions::with_std_dev(sd1)))?;

    for y in b.min_y..b.max_y {
        let r0 = m0.row(y);
        let r1 = m1.row(y);
        for (out, (&a, &c)) in dst.row_mut(y).iter_mut().zip(r0.iter().zip(r1)) {
            *out = a.abs_diff(c);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;
    use grayedge_core::Rect;

    #[test]
    fn test_log_kernel_is_valid() {
        assert!(LOG_KERNEL.validate().is_ok());
        let built = Kernel2D::new(LOG_COEFFICIENTS.to_vec()).unwrap();
        assert_eq!(built, LOG_KERNEL);
        assert_eq!(LOG_KERNEL.get(2, 2), Some(-16.0));
        assert_eq!(LOG_KERNEL.radius(), 2);
    }

    #[test]
    fn test_log_flat_is_zero() {
        let mut src = GrayImage::new(Rect::new(-2, 5, 7, 11));
        src.fill(140);
        let mut dst = src.create_template();
        laplacian_of_gaussian(&mut dst, &src).unwrap();
        assert_eq!(dst.count_nonzero(), 0);
    }

    #[test]
    fn test_log_impulse() {
        let mut src = GrayImage::new(Rect::from_size(7, 7));
        src.set(3, 3, 10).unwrap();
        let mut dst = src.create_template();
        laplacian_of_gaussian(&mut dst, &src).unwrap();
        // Center: -160 + 0.5 -> -159 -> 97
        assert_eq!(dst.get(3, 3), Some(97));
        assert_eq!(dst.get(2, 3), Some(20));
        assert_eq!(dst.get(2, 2), Some(10));
        assert_eq!(dst.get(1, 3), Some(10));
        assert_eq!(dst.get(0, 0), Some(0));
    }

    #[test]
    fn test_log_bounds() {
        let src = GrayImage::new(Rect::from_size(4, 4));
        let mut dst = GrayImage::new(Rect::from_size(4, 5));
        assert!(matches!(
            laplacian_of_gaussian(&mut dst, &src),
            Err(FilterError::IncompatibleBounds { .. })
        ));
    }

    #[test]
    fn test_dog_same_deviation_is_zero() {
        let mut src = GrayImage::new(Rect::from_size(9, 6));
        for (x, y) in src.bounds().points() {
            src.set_unchecked(x, y, (x * 29 + y * 13) as u8);
        }
        let mut dst = src.create_template();
        difference_of_gaussians(&mut dst, &src, 1.1, 1.1).unwrap();
        assert_eq!(dst.count_nonzero(), 0);
    }

    #[test]
    fn test_dog_is_symmetric() {
        let mut src = GrayImage::new(Rect::from_size(8, 8));
        src.set(3, 4, 250).unwrap();
        src.set(6, 1, 90).unwrap();
        let mut d0 = src.create_template();
        let mut d1 = src.create_template();
        difference_of_gaussians(&mut d0, &src, 0.9, 1.2).unwrap();
        difference_of_gaussians(&mut d1, &src, 1.2, 0.9).unwrap();
        assert_eq!(d0, d1);
        assert!(d0.count_nonzero() > 0);
    }

    #[test]
    fn test_dog_rejects_bad_deviation() {
        let src = GrayImage::new(Rect::from_size(3, 3));
        let mut dst = src.create_template();
        assert!(matches!(
            difference_of_gaussians(&mut dst, &src, 0.0, 1.0),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(matches!(
            difference_of_gaussians(&mut dst, &src, 1e300, 1.0),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(matches!(
            difference_of_gaussians(&mut dst, &src, 0.5, 1e300),
            Err(FilterError::InvalidParameters(_))
        ));
    }
}
