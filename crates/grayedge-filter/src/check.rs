//! Argument checks shared by the operators

use crate::{FilterError, FilterResult};
use grayedge_core::{GrayImage, Image};

/// Fail with [`FilterError::NullInput`] when `img` has no pixels.
pub(crate) fn check_present(img: &dyn Image, name: &'static str) -> FilterResult<()> {
    if img.is_empty() {
        return Err(FilterError::NullInput(name));
    }
    Ok(())
}

/// Fail with [`FilterError::IncompatibleBounds`] unless `dst` covers the
/// bounds of `src` exactly.
pub(crate) fn check_same_bounds(src: &dyn Image, dst: &GrayImage) -> FilterResult<()> {
    if src.bounds() != dst.bounds() {
        return Err(FilterError::IncompatibleBounds {
            expected: src.bounds(),
            actual: dst.bounds(),
        });
    }
    Ok(())
}
