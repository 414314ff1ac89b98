//! Conversion of arbitrary sources to 8-bit grayscale
//!
//! Every edge operator starts by normalizing its source. Gray sources are
//! borrowed as-is; anything else is copied into a fresh [`GrayImage`] with
//! the same bounds using [`Image::luma`].

use crate::gray::GrayImage;
use crate::image::Image;
use std::borrow::Cow;

/// Normalize `src` to a single-channel 8-bit image.
///
/// Returns `Cow::Borrowed` when `src` already is a [`GrayImage`].
pub fn to_gray(src: &dyn Image) -> Cow<'_, GrayImage> {
    match src.as_gray() {
        Some(gray) => Cow::Borrowed(gray),
        None => Cow::Owned(convert_to_gray(src)),
    }
}

/// Copy `src` into a new [`GrayImage`] regardless of its layout.
pub fn convert_to_gray(src: &dyn Image) -> GrayImage {
    let b = src.bounds();
    let mut dst = GrayImage::new(b);
    for y in b.min_y..b.max_y {
        for x in b.min_x..b.max_x {
            dst.set_unchecked(x, y, src.luma(x, y));
        }
    }
    dst
}
