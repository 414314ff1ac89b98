//! Canny edge detection
//!
//! The pipeline is: gray conversion, Gaussian blur, Sobel gradient and
//! non-maximum suppression. There is no hysteresis stage; the output keeps
//! the three suppression levels (0, 0x80 and 0xFF), leaving thresholding
//! to the caller.

use crate::blur::{BlurOptions, blur};
use crate::check::{check_present, check_same_bounds};
use crate::gradient::sobel;
use crate::nms::non_max_suppress;
use crate::FilterResult;
use grayedge_core::{GrayImage, Image, to_gray};

/// Detect edges of `src` into `dst` with the default blur.
///
/// # Arguments
/// * `dst` - Output image with the bounds of `src`
/// * `src` - Input image of any layout; converted to gray first
///
/// # Returns
/// Nothing; `dst` holds [`crate::EDGE`], [`crate::POSSIBLE_EDGE`] or
/// [`crate::NOT_EDGE`] at every pixel.
///
/// # Errors
///
/// - [`crate::FilterError::NullInput`] if `dst` or `src` has no pixels
/// - [`crate::FilterError::IncompatibleBounds`] if their bounds differ
pub fn canny(dst: &mut GrayImage, src: &dyn Image) -> FilterResult<()> {
    canny_with_options(dst, src, &BlurOptions::default())
}

/// Detect edges of `src` into `dst`, blurring with `opts` first.
///
/// # Arguments
/// * `dst` - Output image with the bounds of `src`
/// * `src` - Input image of any layout
/// * `opts` - Gaussian blur applied before the gradient
///
/// # Errors
///
/// As [`canny`], plus [`crate::FilterError::InvalidParameters`] for a bad
/// blur standard deviation.
pub fn canny_with_options(
    dst: &mut GrayImage,
    src: &dyn Image,
    opts: &BlurOptions,
) -> FilterResult<()> {
    check_present(&*dst, "dst")?;
    check_present(src, "src")?;
    check_same_bounds(src, dst)?;

    let srcg = to_gray(src);
    let b = srcg.bounds();

    let mut blurred = GrayImage::new(b);
    blur(&mut blurred, &srcg, Some(opts))?;

    let mut mag = GrayImage::new(b);
    let mut dir = GrayImage::new(b);
    sobel(Some(&mut mag), Some(&mut dir), &blurred)?;

    non_max_suppress(dst, &mag, &dir)
}
