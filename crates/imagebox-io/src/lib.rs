//! imagebox-io - Image I/O
//!
//! Decodes PNG, JPEG and WebP into the toolbox's RGB [`Bitmap`] and encodes
//! results as PNG or JPEG. Decoding always normalizes the image:
//!
//! - embedded EXIF orientation is applied, so the bitmap is upright
//! - gray and CMYK are converted to RGB
//! - transparency is composited onto white
//!
//! Batch results (slices, free crops) can be packed into a ZIP archive of
//! PNGs with the `zip-archive` feature.
//!
//! # Features
//!
//! | Feature | Enables |
//! |---|---|
//! | `png-format` | PNG read/write |
//! | `jpeg` | JPEG read/write |
//! | `webp-format` | WebP read |
//! | `zip-archive` | [`archive`] |

mod error;
pub mod format;
pub mod orientation;
mod raw;

#[cfg(feature = "zip-archive")]
pub mod archive;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "webp-format")]
mod webp;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
#[cfg(feature = "jpeg")]
pub use jpeg::JpegOptions;
pub use orientation::Orientation;

use imagebox_core::Bitmap;
use raw::RawImage;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use tracing::debug;

/// Read and normalize an image file.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Decode an in-memory image.
///
/// The format is detected from the magic number, not from any file name.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for unknown or disabled formats,
/// [`IoError::DecodeError`] / [`IoError::InvalidData`] for corrupt input.
pub fn read_image_mem(data: &[u8]) -> IoResult<Bitmap> {
    let format = detect_format_from_bytes(data)?;
    let raw = decode_raw(format, data)?;
    let orientation = raw
        .exif
        .as_deref()
        .map(Orientation::from_exif_block)
        .unwrap_or_default();
    debug!(
        ?format,
        width = raw.width,
        height = raw.height,
        ?orientation,
        "decoded image"
    );
    let bitmap = raw.into_bitmap()?;
    orientation.apply(&bitmap)
}

fn decode_raw(format: ImageFormat, data: &[u8]) -> IoResult<RawImage> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[cfg(feature = "webp-format")]
        ImageFormat::WebP => webp::read_webp(Cursor::new(data)),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Encode a bitmap; JPEG uses [`JpegOptions::default`] (quality 100, 4:4:4).
pub fn write_image_mem(bitmap: &Bitmap, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(bitmap, &mut buf, format)?;
    Ok(buf)
}

/// Encode a bitmap to a file.
pub fn write_image<P: AsRef<Path>>(bitmap: &Bitmap, path: P, format: ImageFormat) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_to(bitmap, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode a bitmap to any writer.
pub fn write_image_to<W: Write>(bitmap: &Bitmap, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(bitmap, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(bitmap, writer, &JpegOptions::default()),
        ImageFormat::WebP => Err(IoError::UnsupportedFormat(
            "WebP output is not supported".to_string(),
        )),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebox_core::Color;

    #[test]
    fn test_read_unknown() {
        assert!(matches!(
            read_image_mem(b"hello world"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_webp_output_rejected() {
        let bmp = Bitmap::new(2, 2).unwrap();
        assert!(matches!(
            write_image_mem(&bmp, ImageFormat::WebP),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[cfg(all(feature = "png-format", feature = "jpeg"))]
    #[test]
    fn test_format_dispatch() {
        let bmp = Bitmap::new_filled(8, 8, Color::new(10, 20, 30)).unwrap();
        let png = write_image_mem(&bmp, ImageFormat::Png).unwrap();
        assert_eq!(detect_format_from_bytes(&png).unwrap(), ImageFormat::Png);
        assert!(read_image_mem(&png).unwrap().equals(&bmp));

        let jpg = write_image_mem(&bmp, ImageFormat::Jpeg).unwrap();
        assert_eq!(detect_format_from_bytes(&jpg).unwrap(), ImageFormat::Jpeg);
        assert_eq!(read_image_mem(&jpg).unwrap().dimensions(), (8, 8));
    }
}
