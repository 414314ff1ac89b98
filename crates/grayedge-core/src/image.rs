//! Source image abstraction
//!
//! Edge operators accept any [`Image`] as their source. Non-gray sources are
//! normalized to a [`GrayImage`] by [`crate::convert::to_gray`] before any
//! operator logic runs; only that shim looks at color channels.
//!
//! Channel values are exposed as 16-bit premultiplied RGBA so that images of
//! different sample depths can be compared on a common scale.

use crate::gray::GrayImage;
use crate::Rect;

/// Read-only access to a source raster.
pub trait Image {
    /// Bounding rectangle of the image.
    fn bounds(&self) -> Rect;

    /// 16-bit premultiplied RGBA at (x, y); `(x, y)` must be in bounds.
    fn rgba16(&self, x: i32, y: i32) -> [u16; 4];

    /// 8-bit luminance at (x, y); `(x, y)` must be in bounds.
    fn luma(&self, x: i32, y: i32) -> u8 {
        let [r, g, b, _] = self.rgba16(x, y);
        luma_from_rgb16(r, g, b)
    }

    /// Borrow the image as a [`GrayImage`] when no conversion is needed.
    fn as_gray(&self) -> Option<&GrayImage> {
        None
    }

    /// True when the image has no pixels.
    fn is_empty(&self) -> bool {
        self.bounds().is_empty()
    }
}

/// Luminance of a 16-bit RGB triple, reduced to 8 bits.
///
/// Weights are the ITU-R 601 coefficients in 16.16 fixed point.
#[inline]
pub fn luma_from_rgb16(r: u16, g: u16, b: u16) -> u8 {
    ((19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + (1 << 15)) >> 24) as u8
}

/// Expand an 8-bit sample to 16 bits (`v * 0x101`).
#[inline]
pub fn expand_to_16(v: u8) -> u16 {
    v as u16 * 0x101
}

impl Image for GrayImage {
    fn bounds(&self) -> Rect {
        GrayImage::bounds(self)
    }

    fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
        let v = expand_to_16(self.get_unchecked(x, y));
        [v, v, v, 0xffff]
    }

    fn luma(&self, x: i32, y: i32) -> u8 {
        self.get_unchecked(x, y)
    }

    fn as_gray(&self) -> Option<&GrayImage> {
        Some(self)
    }

    fn is_empty(&self) -> bool {
        GrayImage::is_empty(self)
    }
}

/// Single-channel 16-bit image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gray16Image {
    rect: Rect,
    stride: usize,
    pix: Vec<u16>,
}

impl Gray16Image {
    /// Create a zero-filled image covering `rect`.
    pub fn new(rect: Rect) -> Self {
        let stride = rect.width().max(0) as usize;
        Gray16Image {
            rect,
            stride,
            pix: vec![0; rect.area()],
        }
    }

    /// Get the sample at (x, y), or `None` out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<u16> {
        if !self.rect.contains(x, y) {
            return None;
        }
        Some(self.pix[self.offset(x, y)])
    }

    /// Set the sample at (x, y); out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, val: u16) {
        if self.rect.contains(x, y) {
            let off = self.offset(x, y);
            self.pix[off] = val;
        }
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        (y - self.rect.min_y) as usize * self.stride + (x - self.rect.min_x) as usize
    }
}

impl Image for Gray16Image {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
        let v = self.pix[self.offset(x, y)];
        [v, v, v, 0xffff]
    }

    fn luma(&self, x: i32, y: i32) -> u8 {
        (self.pix[self.offset(x, y)] >> 8) as u8
    }
}

/// 8-bit premultiplied RGBA image, four bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RgbaImage {
    rect: Rect,
    stride: usize,
    pix: Vec<u8>,
}

impl RgbaImage {
    /// Create a transparent-black image covering `rect`.
    pub fn new(rect: Rect) -> Self {
        let stride = rect.width().max(0) as usize * 4;
        RgbaImage {
            rect,
            stride,
            pix: vec![0; rect.area() * 4],
        }
    }

    /// Get `[r, g, b, a]` at (x, y), or `None` out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if !self.rect.contains(x, y) {
            return None;
        }
        let off = self.offset(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pix[off..off + 4]);
        Some(px)
    }

    /// Set `[r, g, b, a]` at (x, y); out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, px: [u8; 4]) {
        if self.rect.contains(x, y) {
            let off = self.offset(x, y);
            self.pix[off..off + 4].copy_from_slice(&px);
        }
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        (y - self.rect.min_y) as usize * self.stride + (x - self.rect.min_x) as usize * 4
    }
}

impl Image for RgbaImage {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
        let off = self.offset(x, y);
        let p = &self.pix[off..off + 4];
        [
            expand_to_16(p[0]),
            expand_to_16(p[1]),
            expand_to_16(p[2]),
            expand_to_16(p[3]),
        ]
    }
}

/// An image of any supported sample layout, as produced by decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyImage {
    /// 8-bit grayscale
    Gray(GrayImage),
    /// 16-bit grayscale
    Gray16(Gray16Image),
    /// 8-bit RGBA
    Rgba(RgbaImage),
}

impl AnyImage {
    fn inner(&self) -> &dyn Image {
        match self {
            AnyImage::Gray(img) => img,
            AnyImage::Gray16(img) => img,
            AnyImage::Rgba(img) => img,
        }
    }
}

impl Image for AnyImage {
    fn bounds(&self) -> Rect {
        self.inner().bounds()
    }

    fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
        self.inner().rgba16(x, y)
    }

    fn luma(&self, x: i32, y: i32) -> u8 {
        self.inner().luma(x, y)
    }

    fn as_gray(&self) -> Option<&GrayImage> {
        self.inner().as_gray()
    }

    fn is_empty(&self) -> bool {
        self.inner().is_empty()
    }
}
