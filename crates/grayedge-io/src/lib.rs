//! grayedge-io - Image I/O for grayedge
//!
//! Reads PNG and binary PGM files into [`AnyImage`] and writes 8-bit gray
//! results back. Each format sits behind a cargo feature (`png-format`,
//! `pnm`), both enabled by default.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use grayedge_core::{AnyImage, GrayImage};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<AnyImage> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<AnyImage> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format(reader: Cursor<&[u8]>, format: ImageFormat) -> IoResult<AnyImage> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => {
            let _ = reader;
            Err(IoError::UnsupportedFormat(format!(
                "{other:?} support not enabled"
            )))
        }
    }
}

/// Write a gray image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(img: &GrayImage, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(img, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Write a gray image to a file path, choosing the format by extension.
pub fn write_image_auto<P: AsRef<Path>>(img: &GrayImage, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        IoError::UnsupportedFormat(format!("no format for {}", path.display()))
    })?;
    write_image(img, path, format)
}

/// Encode a gray image into memory in the given format.
pub fn write_image_mem(img: &GrayImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(img, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(img: &GrayImage, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(img, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(img, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = (img, writer);
            Err(IoError::UnsupportedFormat(format!(
                "{other:?} support not enabled"
            )))
        }
    }
}
