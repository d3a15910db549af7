//! WebP image format support
//!
//! Read-only. Animated WebP images (multiple frames) are not supported.

use crate::raw::{RawImage, SampleLayout};
use crate::{IoError, IoResult};
use image_webp::WebPDecoder;
use std::io::{BufRead, Seek};

/// Read the single frame of a WebP image.
pub(crate) fn read_webp<R: BufRead + Seek>(reader: R) -> IoResult<RawImage> {
    let mut decoder = WebPDecoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("WebP decode error: {}", e)))?;

    if decoder.is_animated() {
        return Err(IoError::UnsupportedFormat(
            "animated WebP not supported".to_string(),
        ));
    }

    let (width, height) = decoder.dimensions();
    let layout = if decoder.has_alpha() {
        SampleLayout::Rgba
    } else {
        SampleLayout::Rgb
    };

    // metadata is optional; a broken EXIF chunk must not fail the decode
    let exif = decoder.exif_metadata().ok().flatten();

    let buffer_size = decoder.output_buffer_size().ok_or_else(|| {
        IoError::DecodeError("failed to determine output buffer size".to_string())
    })?;
    let mut samples = vec![0u8; buffer_size];
    decoder
        .read_image(&mut samples)
        .map_err(|e| IoError::DecodeError(format!("WebP read error: {}", e)))?;

    Ok(RawImage {
        width,
        height,
        layout,
        samples,
        exif,
    })
}
