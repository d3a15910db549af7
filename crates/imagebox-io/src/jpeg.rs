//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Output defaults to maximum quality with no chroma
//! subsampling, which keeps text and UI edges in screenshots crisp after
//! re-encoding.

use crate::raw::{RawImage, SampleLayout};
use crate::{IoError, IoResult};
use imagebox_core::Bitmap;
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use std::io::{Read, Write};

/// JPEG encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    /// Quality 1-100
    pub quality: u8,
    /// Keep full-resolution chroma (4:4:4) instead of 4:2:0
    pub full_chroma: bool,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self {
            quality: 100,
            full_chroma: true,
        }
    }
}

/// Read a JPEG image from a reader.
pub(crate) fn read_jpeg<R: Read>(reader: R) -> IoResult<RawImage> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let (layout, samples) = match info.pixel_format {
        PixelFormat::L8 => (SampleLayout::Gray, pixels),
        // keep the high byte of each big-endian sample
        PixelFormat::L16 => (
            SampleLayout::Gray,
            pixels.chunks_exact(2).map(|s| s[0]).collect(),
        ),
        PixelFormat::RGB24 => (SampleLayout::Rgb, pixels),
        PixelFormat::CMYK32 => (SampleLayout::Cmyk, pixels),
    };

    Ok(RawImage {
        width: info.width as u32,
        height: info.height as u32,
        layout,
        samples,
        exif: decoder.exif_data().map(|e| e.to_vec()),
    })
}

/// Write a bitmap as baseline RGB JPEG.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if a dimension exceeds 65535 (the JPEG
/// frame header limit) or the quality is outside 1-100.
pub fn write_jpeg<W: Write>(bitmap: &Bitmap, writer: W, options: &JpegOptions) -> IoResult<()> {
    if !(1..=100).contains(&options.quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be 1-100, got {}",
            options.quality
        )));
    }
    let width = u16::try_from(bitmap.width())
        .map_err(|_| IoError::EncodeError(format!("JPEG width {} too large", bitmap.width())))?;
    let height = u16::try_from(bitmap.height()).map_err(|_| {
        IoError::EncodeError(format!("JPEG height {} too large", bitmap.height()))
    })?;

    let mut encoder = Encoder::new(writer, options.quality);
    if options.full_chroma {
        encoder.set_sampling_factor(SamplingFactor::R_4_4_4);
    }
    encoder
        .encode(&bitmap.to_rgb_bytes(), width, height, ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}
