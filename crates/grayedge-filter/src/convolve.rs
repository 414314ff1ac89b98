//! Convolution operations
//!
//! Convolves an 8-bit grayscale image with a [`SeparableKernel`] or a
//! [`Kernel2D`].
//!
//! # Boundary handling
//!
//! Taps that fall outside the source contribute nothing; their weights are
//! added to the center weight instead. Flat regions therefore stay flat up to
//! the border and there is no vignetting.
//!
//! # Output conversion
//!
//! Each sum is rounded by adding 0.5 and then cast with [`truncate_to_u8`]:
//! the fraction is dropped and the integer part is reduced modulo 256. Values
//! are never clamped, so a derivative kernel's negative responses wrap around.

use crate::check::check_same_bounds;
use crate::{FilterResult, Kernel2D, SeparableKernel};
use grayedge_core::GrayImage;

/// Cast a real value to 8 bits by truncation.
///
/// The fraction is discarded toward zero and the integer is reduced modulo
/// 256; NaN maps to 0. This is a raw numeric cast, not a clamp: 256.0 becomes
/// 0 and -1.0 becomes 255.
#[inline]
pub fn truncate_to_u8(v: f64) -> u8 {
    v as i64 as u8
}

/// A kernel that can be applied by [`convolve`].
pub trait Convolution {
    /// Check the kernel shape before use.
    fn validate(&self) -> FilterResult<()>;

    /// Convolve `src` into `dst`; both cover the same, non-empty bounds.
    fn apply(&self, dst: &mut GrayImage, src: &GrayImage);
}

/// Convolve `src` with `kernel` into `dst`.
///
/// # Arguments
/// * `dst` - Output image with the bounds of `src`
/// * `src` - Input 8-bit grayscale image
/// * `kernel` - A [`SeparableKernel`] or [`Kernel2D`]
///
/// # Errors
///
/// - [`crate::FilterError::IncompatibleBounds`] if `dst` does not cover the
///   bounds of `src`
/// - [`crate::FilterError::InvalidKernel`] if the kernel shape is invalid
pub fn convolve(dst: &mut GrayImage, src: &GrayImage, kernel: &dyn Convolution) -> FilterResult<()> {
    check_same_bounds(src, dst)?;
    kernel.validate()?;
    if src.is_empty() {
        return Ok(());
    }
    kernel.apply(dst, src);
    Ok(())
}

impl Convolution for SeparableKernel {
    fn validate(&self) -> FilterResult<()> {
        SeparableKernel::validate(self)
    }

    fn apply(&self, dst: &mut GrayImage, src: &GrayImage) {
        let b = src.bounds();
        let width = b.width() as usize;
        let height = b.height() as usize;
        let radius = self.radius();
        let kx = self.x();
        let ky = self.y();
        let rows: Vec<&[u8]> = (b.min_y..b.max_y).map(|y| src.row(y)).collect();

        // Vertical pass with the Y weights into a float buffer.
        let mut buf = vec![0.0f64; width * height];
        for iy in 0..height {
            for ix in 0..width {
                let mut k0 = ky[radius];
                let mut sum = 0.0;
                for i in 1..=radius {
                    let f = ky[radius - i];
                    if i > iy {
                        k0 += f;
                    } else {
                        sum += rows[iy - i][ix] as f64 * f;
                    }
                    let f = ky[radius + i];
                    if i >= height - iy {
                        k0 += f;
                    } else {
                        sum += rows[iy + i][ix] as f64 * f;
                    }
                }
                sum += rows[iy][ix] as f64 * k0;
                buf[iy * width + ix] = sum;
            }
        }

        // Horizontal pass with the X weights into the destination.
        for (iy, y) in (b.min_y..b.max_y).enumerate() {
            let line = &buf[iy * width..(iy + 1) * width];
            let out = dst.row_mut(y);
            for ix in 0..width {
                let mut k0 = kx[radius];
                let mut sum = 0.0;
                for i in 1..=radius {
                    let f = kx[radius - i];
                    if i > ix {
                        k0 += f;
                    } else {
                        sum += line[ix - i] * f;
                    }
                    let f = kx[radius + i];
                    if i >= width - ix {
                        k0 += f;
                    } else {
                        sum += line[ix + i] * f;
                    }
                }
                sum += line[ix] * k0;
                out[ix] = truncate_to_u8(sum + 0.5);
            }
        }
    }
}

impl Convolution for Kernel2D {
    fn validate(&self) -> FilterResult<()> {
        Kernel2D::validate(self)
    }

    fn apply(&self, dst: &mut GrayImage, src: &GrayImage) {
        let b = src.bounds();
        let width = b.width() as isize;
        let height = b.height() as isize;
        let size = self.size();
        let radius = self.radius() as isize;
        let data = self.data();
        let norm = self.normalization();
        let rows: Vec<&[u8]> = (b.min_y..b.max_y).map(|y| src.row(y)).collect();

        // Coordinates are relative to the origin so that no tap position can
        // overflow near the ends of the i32 range.
        for (iy, y) in (0..height).zip(b.min_y..b.max_y) {
            let out = dst.row_mut(y);
            for ix in 0..width {
                let mut k0 = data[radius as usize * size + radius as usize];
                let mut sum = 0.0;
                for ky in 0..size as isize {
                    for kx in 0..size as isize {
                        if kx == radius && ky == radius {
                            continue;
                        }
                        let f = data[ky as usize * size + kx as usize];
                        let sx = ix + kx - radius;
                        let sy = iy + ky - radius;
                        if (0..width).contains(&sx) && (0..height).contains(&sy) {
                            sum += rows[sy as usize][sx as usize] as f64 * f;
                        } else {
                            k0 += f;
                        }
                    }
                }
                sum += rows[iy as usize][ix as usize] as f64 * k0;
                out[ix as usize] = truncate_to_u8(sum / norm + 0.5);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;
    use grayedge_core::Rect;

    fn checker(w: i32, h: i32) -> GrayImage {
        let mut img = GrayImage::new(Rect::from_size(w, h));
        for (x, y) in img.bounds().points() {
            img.set_unchecked(x, y, if (x + y) % 2 == 0 { 40 } else { 200 });
        }
        img
    }

    #[test]
    fn test_truncate_to_u8() {
        assert_eq!(truncate_to_u8(0.0), 0);
        assert_eq!(truncate_to_u8(254.9), 254);
        assert_eq!(truncate_to_u8(255.5), 255);
        assert_eq!(truncate_to_u8(256.0), 0);
        assert_eq!(truncate_to_u8(300.7), 44);
        assert_eq!(truncate_to_u8(-0.5), 0);
        assert_eq!(truncate_to_u8(-1.0), 255);
        assert_eq!(truncate_to_u8(-2.5), 254);
        assert_eq!(truncate_to_u8(f64::NAN), 0);
    }

    #[test]
    fn test_identity_separable() {
        let src = checker(5, 4);
        let mut dst = src.create_template();
        let k = SeparableKernel::new(vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 0.0]).unwrap();
        convolve(&mut dst, &src, &k).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_identity_full() {
        let src = checker(4, 5);
        let mut dst = src.create_template();
        let k = Kernel2D::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        convolve(&mut dst, &src, &k).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_flat_image_stays_flat_at_border() {
        let mut src = GrayImage::new(Rect::new(3, -2, 10, 4));
        src.fill(90);
        let mut dst = src.create_template();
        let k = SeparableKernel::new(
            [1.0, 4.0, 6.0, 4.0, 1.0].iter().map(|v| v / 16.0).collect(),
            vec![0.2; 5],
        )
        .unwrap();
        convolve(&mut dst, &src, &k).unwrap();
        assert!(dst.pix().iter().all(|&v| v == 90));

        let mut dst2 = src.create_template();
        convolve(&mut dst2, &src, &Kernel2D::new(vec![1.0; 25]).unwrap()).unwrap();
        assert!(dst2.pix().iter().all(|&v| v == 90));
    }

    #[test]
    fn test_derivative_wraps_negative() {
        // Step from 100 to 50 going right: central difference is -50.
        let mut src = GrayImage::new(Rect::from_size(3, 1));
        src.pix_mut().copy_from_slice(&[100, 100, 50]);
        let mut dst = src.create_template();
        let k = SeparableKernel::new(vec![-1.0, 0.0, 1.0], vec![0.0, 1.0, 0.0]).unwrap();
        convolve(&mut dst, &src, &k).unwrap();
        // x=0: left tap folds into center -> -100 + 100 = 0
        // x=1: -100 + 50 = -50 -> (-49.5) truncates to -49 -> 207
        // x=2: right tap folds -> -100 + 50 = -50 -> 207
        assert_eq!(dst.pix(), &[0, 207, 207]);
    }

    #[test]
    fn test_box_blur_full_kernel() {
        let mut src = GrayImage::new(Rect::from_size(3, 3));
        src.set(1, 1, 90).unwrap();
        let mut dst = src.create_template();
        convolve(&mut dst, &src, &Kernel2D::new(vec![1.0; 9]).unwrap()).unwrap();
        assert_eq!(dst.get(1, 1), Some(10));
        // Corner: 5 out-of-bounds weights fold onto the corner pixel (0),
        // the diagonal neighbor contributes 90 / 9.
        assert_eq!(dst.get(0, 0), Some(10));
    }

    #[test]
    fn test_bounds_at_coordinate_limits() {
        let src = checker(4, 3);
        let sep = SeparableKernel::new(vec![-1.0, 0.0, 1.0], vec![1.0, 2.0, 1.0]).unwrap();
        let full = Kernel2D::new(vec![1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0]).unwrap();
        let kernels: [&dyn Convolution; 2] = [&sep, &full];
        for kernel in kernels {
            let mut want = src.create_template();
            convolve(&mut want, &src, kernel).unwrap();
            for rect in [
                Rect::new(i32::MIN, i32::MIN, i32::MIN + 4, i32::MIN + 3),
                Rect::new(i32::MAX - 4, i32::MAX - 3, i32::MAX, i32::MAX),
            ] {
                let moved = GrayImage::from_raw(rect, 4, src.pix().to_vec()).unwrap();
                let mut dst = moved.create_template();
                convolve(&mut dst, &moved, kernel).unwrap();
                assert_eq!(dst.pix(), want.pix(), "at {rect}");
            }
        }
    }

    #[test]
    fn test_bounds_mismatch_is_rejected() {
        let src = checker(4, 4);
        let mut dst = GrayImage::new(Rect::from_size(3, 4));
        let k = SeparableKernel::new(vec![1.0], vec![1.0]).unwrap();
        assert!(matches!(
            convolve(&mut dst, &src, &k),
            Err(FilterError::IncompatibleBounds { .. })
        ));
    }

    #[test]
    fn test_invalid_static_kernel_is_rejected() {
        static BAD: SeparableKernel = SeparableKernel::from_static(&[1.0, 1.0], &[1.0, 1.0]);
        let src = checker(2, 2);
        let mut dst = src.create_template();
        assert!(matches!(
            convolve(&mut dst, &src, &BAD),
            Err(FilterError::InvalidKernel(_))
        ));
    }
}
