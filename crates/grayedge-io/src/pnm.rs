//! PGM (Portable Gray Map) format support
//!
//! Reads and writes binary PGM (`P5`). A maxval up to 255 gives one byte per
//! sample; larger maxvals give two big-endian bytes per sample and decode to
//! a 16-bit image. Samples are rescaled to the full range when maxval is not
//! 255 (or 65535). ASCII and color variants are not supported.

use crate::{IoError, IoResult};
use grayedge_core::{AnyImage, Gray16Image, GrayImage, Rect};
use std::io::{BufRead, Read, Write};

/// Largest raster, in bytes, accepted from a PGM header.
pub const MAX_RASTER_BYTES: u64 = 1 << 30;

/// Read one whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("truncated PGM header".to_string()));
            }
            return Ok(token);
        }
        match byte[0] {
            b'#' if token.is_empty() => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    return Ok(token);
                }
            }
            b => token.push(b as char),
        }
    }
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("bad PGM {what}: {token:?}")))
}

/// Read a binary PGM image from a reader.
///
/// # Returns
/// [`AnyImage::Gray`] for maxval up to 255, [`AnyImage::Gray16`] otherwise.
///
/// # Errors
/// [`IoError::InvalidData`] for a malformed header, a raster larger than
/// [`MAX_RASTER_BYTES`], or a raster shorter than the header declares.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<AnyImage> {
    let magic = read_token(&mut reader)?;
    if magic != "P5" {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM variant {magic:?} is not supported"
        )));
    }
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(IoError::InvalidData(format!(
            "invalid PGM dimensions: {width}x{height}"
        )));
    }
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PGM maxval: {maxval}")));
    }

    let rect = Rect::from_size(width as i32, height as i32);
    let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
    let raster_len = (width as u64)
        .checked_mul(height as u64)
        .and_then(|n| n.checked_mul(bytes_per_sample as u64))
        .filter(|&n| n <= MAX_RASTER_BYTES)
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "PGM raster {width}x{height} exceeds {MAX_RASTER_BYTES} bytes"
            ))
        })? as usize;

    // Grows with the bytes actually present, not with the header's claim.
    let mut data = Vec::new();
    let read = reader.by_ref().take(raster_len as u64).read_to_end(&mut data)?;
    if read < raster_len {
        return Err(IoError::InvalidData(format!(
            "truncated PGM raster: {read} of {raster_len} bytes"
        )));
    }

    if bytes_per_sample == 1 {
        let mut img = GrayImage::new(rect);
        for (y, row) in (0..height as i32).zip(data.chunks_exact(width as usize)) {
            for (dst, &v) in img.row_mut(y).iter_mut().zip(row) {
                *dst = if maxval == 255 {
                    v
                } else {
                    ((v.min(maxval as u8) as u32 * 255 + maxval / 2) / maxval) as u8
                };
            }
        }
        Ok(AnyImage::Gray(img))
    } else {
        let mut img = Gray16Image::new(rect);
        let mut samples = data.chunks_exact(2);
        for (x, y) in rect.points() {
            let Some(s) = samples.next() else { break };
            let v = (u16::from_be_bytes([s[0], s[1]]) as u32).min(maxval);
            let v = if maxval == 65535 {
                v
            } else {
                (v * 65535 + maxval / 2) / maxval
            };
            img.set(x, y, v as u16);
        }
        Ok(AnyImage::Gray16(img))
    }
}

/// Write an 8-bit gray image as binary PGM (`P5`, maxval 255).
pub fn write_pnm<W: Write>(img: &GrayImage, mut writer: W) -> IoResult<()> {
    if img.is_empty() {
        return Err(IoError::InvalidData("cannot encode an empty image".to_string()));
    }
    let b = img.bounds();
    write!(writer, "P5\n{} {}\n255\n", b.width(), b.height())?;
    for y in b.min_y..b.max_y {
        writer.write_all(img.row(y))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grayedge_core::Image;
    use std::io::Cursor;

    #[test]
    fn test_pgm_roundtrip() {
        let mut img = GrayImage::new(Rect::from_size(5, 3));
        for (x, y) in img.bounds().points() {
            img.set_unchecked(x, y, (x * 50 + y) as u8);
        }
        let mut buffer = Vec::new();
        write_pnm(&img, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P5\n5 3\n255\n"));
        assert_eq!(buffer.len(), 11 + 15);

        match read_pnm(Cursor::new(buffer)).unwrap() {
            AnyImage::Gray(back) => assert_eq!(back, img),
            other => panic!("expected gray image, got {other:?}"),
        }
    }

    #[test]
    fn test_pgm_header_comments() {
        let mut data = b"P5 # made by hand\n# another\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[7, 200]);
        let img = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(img.bounds(), Rect::from_size(2, 1));
        assert_eq!(img.luma(0, 0), 7);
        assert_eq!(img.luma(1, 0), 200);
    }

    #[test]
    fn test_pgm_small_maxval_is_scaled() {
        let mut data = b"P5\n3 1\n15\n".to_vec();
        data.extend_from_slice(&[0, 15, 5]);
        let img = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(img.luma(0, 0), 0);
        assert_eq!(img.luma(1, 0), 255);
        assert_eq!(img.luma(2, 0), 85);
    }

    #[test]
    fn test_pgm_16bit() {
        let mut data = b"P5\n2 1\n65535\n".to_vec();
        data.extend_from_slice(&[0x12, 0x34, 0xFF, 0xFF]);
        let AnyImage::Gray16(img) = read_pnm(Cursor::new(data)).unwrap() else {
            panic!("expected 16-bit image");
        };
        assert_eq!(img.get(0, 0), Some(0x1234));
        assert_eq!(img.get(1, 0), Some(0xFFFF));
    }

    #[test]
    fn test_pgm_oversized_header() {
        let data = b"P5 2000000000 2000000000 255\n\0\0\0\0".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
        let data = b"P5\n65536 8193\n65535\n\0\0".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_pgm_truncated_large_raster() {
        // Within the size limit but missing almost all of its samples.
        let data = b"P5\n4096 4096\n255\n\x01\x02".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_pgm_errors() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P2\n1 1\n255\n0\n".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n0 1\n255\n".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n2 2\n255\n\x01".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\nwide 2\n255\n".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n2".to_vec())),
            Err(IoError::InvalidData(_))
        ));
    }
}
