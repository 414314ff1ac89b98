//! Tolerance-based image comparison
//!
//! Images are compared channel by channel in 16-bit premultiplied RGBA, so
//! an 8-bit difference of one level corresponds to a 16-bit difference of
//! `0x101`. Reference rasters are checked with exactly that tolerance.

use crate::error::{Error, Result};
use crate::image::Image;

/// Tolerance that accepts a one-level difference in 8-bit samples.
pub const ONE_LEVEL_TOLERANCE: u32 = 0x101;

/// Check that `got` and `want` match within `tolerance` on every channel.
///
/// # Errors
///
/// - [`Error::BoundsMismatch`] if the rectangles differ
/// - [`Error::PixelMismatch`] for the first pixel, in row-major order, whose
///   channel difference exceeds `tolerance`
pub fn within_tolerance(got: &dyn Image, want: &dyn Image, tolerance: u32) -> Result<()> {
    let b0 = got.bounds();
    let b1 = want.bounds();
    if b0 != b1 {
        return Err(Error::BoundsMismatch {
            expected: b1,
            actual: b0,
        });
    }
    for (x, y) in b0.points() {
        let c0 = got.rgba16(x, y);
        let c1 = want.rgba16(x, y);
        let exceeded = c0
            .iter()
            .zip(c1.iter())
            .any(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() > tolerance);
        if exceeded {
            return Err(Error::PixelMismatch {
                x,
                y,
                got: c0,
                want: c1,
                tolerance,
            });
        }
    }
    Ok(())
}

/// Largest absolute channel difference between two images of equal bounds.
///
/// # Errors
///
/// Returns [`Error::BoundsMismatch`] if the rectangles differ.
pub fn max_channel_diff(a: &dyn Image, b: &dyn Image) -> Result<u32> {
    if a.bounds() != b.bounds() {
        return Err(Error::BoundsMismatch {
            expected: b.bounds(),
            actual: a.bounds(),
        });
    }
    let mut max = 0u32;
    for (x, y) in a.bounds().points() {
        let c0 = a.rgba16(x, y);
        let c1 = b.rgba16(x, y);
        for (&p, &q) in c0.iter().zip(c1.iter()) {
            max = max.max((p as i32 - q as i32).unsigned_abs());
        }
    }
    Ok(max)
}
