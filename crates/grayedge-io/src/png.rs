//! PNG image format support
//!
//! Decoding expands palettes, sub-byte gray and `tRNS` chunks, so every file
//! lands in one of three layouts: 8-bit gray, 16-bit gray, or 8-bit
//! premultiplied RGBA. Encoding writes 8-bit grayscale.

use crate::{IoError, IoResult};
use grayedge_core::{AnyImage, Gray16Image, GrayImage, Rect, RgbaImage};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Premultiply an 8-bit channel by an 8-bit alpha, rounding to nearest.
#[inline]
fn premultiply(c: u8, a: u8) -> u8 {
    ((c as u32 * a as u32 + 127) / 255) as u8
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<AnyImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width as i32;
    let height = output_info.height as i32;
    let rect = Rect::from_size(width, height);
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let (color_type, bit_depth) = reader.output_color_type();

    let image = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => {
            let mut img = GrayImage::new(rect);
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                img.row_mut(y)
                    .copy_from_slice(&data[row_start..row_start + width as usize]);
            }
            AnyImage::Gray(img)
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            let mut img = Gray16Image::new(rect);
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * 2;
                    img.set(x, y, u16::from_be_bytes([data[idx], data[idx + 1]]));
                }
            }
            AnyImage::Gray16(img)
        }
        (ColorType::GrayscaleAlpha, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 4 } else { 2 };
            let mut img = RgbaImage::new(rect);
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * samples;
                    let (g, a) = (data[idx], data[idx + samples / 2]);
                    let g = premultiply(g, a);
                    img.set(x, y, [g, g, g, a]);
                }
            }
            AnyImage::Rgba(img)
        }
        (ColorType::Rgb, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 6 } else { 3 };
            let step = samples / 3;
            let mut img = RgbaImage::new(rect);
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * samples;
                    img.set(
                        x,
                        y,
                        [data[idx], data[idx + step], data[idx + 2 * step], 0xFF],
                    );
                }
            }
            AnyImage::Rgba(img)
        }
        (ColorType::Rgba, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 8 } else { 4 };
            let step = samples / 4;
            let mut img = RgbaImage::new(rect);
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * samples;
                    let a = data[idx + 3 * step];
                    img.set(
                        x,
                        y,
                        [
                            premultiply(data[idx], a),
                            premultiply(data[idx + step], a),
                            premultiply(data[idx + 2 * step], a),
                            a,
                        ],
                    );
                }
            }
            AnyImage::Rgba(img)
        }
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(image)
}

/// Write an 8-bit grayscale PNG image
///
/// The image origin is not stored; the file covers the image's width and
/// height only.
pub fn write_png<W: Write>(img: &GrayImage, writer: W) -> IoResult<()> {
    if img.is_empty() {
        return Err(IoError::InvalidData("cannot encode an empty image".to_string()));
    }
    let b = img.bounds();

    let mut encoder = Encoder::new(writer, b.width() as u32, b.height() as u32);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(b.area());
    for y in b.min_y..b.max_y {
        data.extend_from_slice(img.row(y));
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grayedge_core::Image;
    use std::io::Cursor;

    fn encode(
        width: u32,
        height: u32,
        color: ColorType,
        palette: Option<Vec<u8>>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, width, height);
            encoder.set_color(color);
            encoder.set_depth(BitDepth::Eight);
            if let Some(p) = palette {
                encoder.set_palette(p);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut img = GrayImage::new(Rect::from_size(10, 7));
        for (x, y) in img.bounds().points() {
            img.set_unchecked(x, y, ((x + y) * 10) as u8);
        }

        let mut buffer = Vec::new();
        write_png(&img, &mut buffer).unwrap();

        match read_png(Cursor::new(buffer)).unwrap() {
            AnyImage::Gray(back) => assert_eq!(back, img),
            other => panic!("expected gray image, got {other:?}"),
        }
    }

    #[test]
    fn test_png_write_drops_origin() {
        let mut img = GrayImage::new(Rect::new(-3, 2, 1, 4));
        img.fill(9);
        let mut buffer = Vec::new();
        write_png(&img, &mut buffer).unwrap();
        let back = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(back.bounds(), Rect::from_size(4, 2));
        assert_eq!(back.luma(3, 1), 9);
    }

    #[test]
    fn test_png_read_rgb() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        let buffer = encode(2, 2, ColorType::Rgb, None, &data);
        let AnyImage::Rgba(img) = read_png(Cursor::new(buffer)).unwrap() else {
            panic!("expected RGBA image");
        };
        assert_eq!(img.get(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(img.get(1, 1), Some([10, 20, 30, 255]));
        assert_eq!(img.luma(0, 0), 76);
    }

    #[test]
    fn test_png_read_rgba_premultiplies() {
        let data = [200, 100, 50, 0, 200, 100, 50, 255];
        let buffer = encode(2, 1, ColorType::Rgba, None, &data);
        let AnyImage::Rgba(img) = read_png(Cursor::new(buffer)).unwrap() else {
            panic!("expected RGBA image");
        };
        assert_eq!(img.get(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(img.get(1, 0), Some([200, 100, 50, 255]));
    }

    #[test]
    fn test_png_read_palette_expands() {
        let palette = vec![10, 20, 30, 200, 100, 50];
        let buffer = encode(2, 1, ColorType::Indexed, Some(palette), &[1, 0]);
        let AnyImage::Rgba(img) = read_png(Cursor::new(buffer)).unwrap() else {
            panic!("expected RGBA image");
        };
        assert_eq!(img.get(0, 0), Some([200, 100, 50, 255]));
        assert_eq!(img.get(1, 0), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_png_read_garbage() {
        assert!(matches!(
            read_png(Cursor::new(b"not a png".to_vec())),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_png_write_empty() {
        let mut buffer = Vec::new();
        assert!(write_png(&GrayImage::default(), &mut buffer).is_err());
    }
}
