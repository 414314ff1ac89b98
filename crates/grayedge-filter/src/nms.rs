//! Non-maximum suppression
//!
//! Thins a gradient-magnitude raster to ridges. Each pixel is compared with
//! its two neighbors along the quantized gradient direction:
//!
//! | Magnitude vs. neighbors        | Output                 |
//! |--------------------------------|------------------------|
//! | greater than both              | [`EDGE`] (0xFF)        |
//! | greater than exactly one       | [`POSSIBLE_EDGE`] (0x80) |
//! | otherwise                      | [`NOT_EDGE`] (0)       |
//!
//! Neighbors outside the raster read as 0, so a nonzero pixel on the border
//! always beats its missing neighbor.

use crate::check::{check_present, check_same_bounds};
use crate::gradient::Direction;
use crate::{FilterError, FilterResult};
use grayedge_core::GrayImage;

/// Local maximum along the gradient.
pub const EDGE: u8 = 0xFF;
/// Greater than one of the two neighbors.
pub const POSSIBLE_EDGE: u8 = 0x80;
/// Suppressed.
pub const NOT_EDGE: u8 = 0x00;

/// Classify magnitude `m` against its two gradient neighbors.
#[inline]
pub fn classify(m: u8, n0: u8, n1: u8) -> u8 {
    match (m > n0, m > n1) {
        (true, true) => EDGE,
        (true, false) | (false, true) => POSSIBLE_EDGE,
        (false, false) => NOT_EDGE,
    }
}

/// Magnitude at `(x + dx, y + dy)`, or 0 when that lies outside `mag` or
/// outside the `i32` coordinate range.
#[inline]
fn neighbor(mag: &GrayImage, x: i32, y: i32, (dx, dy): (i32, i32)) -> u8 {
    match (x.checked_add(dx), y.checked_add(dy)) {
        (Some(nx), Some(ny)) => mag.at_or_zero(nx, ny),
        _ => 0,
    }
}

/// Suppress non-maximal pixels of `mag` into `dst`.
///
/// # Arguments
/// * `dst` - Output image receiving the three suppression levels
/// * `mag` - Gradient magnitude
/// * `dir` - Direction codes as written by the gradient operators
///
/// All three rasters must share the same bounds.
///
/// # Errors
///
/// - [`FilterError::NullInput`] if `mag` or `dir` has no pixels
/// - [`FilterError::IncompatibleBounds`] if the bounds differ
/// - [`FilterError::InvalidDirection`] at the first pixel whose direction
///   code is not 0, 45, 90 or 135; `dst` is partially written in that case
pub fn non_max_suppress(dst: &mut GrayImage, mag: &GrayImage, dir: &GrayImage) -> FilterResult<()> {
    check_present(mag, "mag")?;
    check_present(dir, "dir")?;
    check_same_bounds(mag, dir)?;
    check_same_bounds(mag, dst)?;

    let b = mag.bounds();
    for y in b.min_y..b.max_y {
        for x in b.min_x..b.max_x {
            let code = dir.get_unchecked(x, y);
            let d = Direction::from_code(code).ok_or(FilterError::InvalidDirection { x, y, code })?;
            let [o0, o1] = d.neighbor_offsets();
            let n0 = neighbor(mag, x, y, o0);
            let n1 = neighbor(mag, x, y, o1);
            dst.set_unchecked(x, y, classify(mag.get_unchecked(x, y), n0, n1));
        }
    }
    Ok(())
}
