//! PNG image format support

use crate::raw::{RawImage, SampleLayout};
use crate::{IoError, IoResult};
use imagebox_core::Bitmap;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into interleaved 8-bit samples.
///
/// Palettes and low bit depths are expanded and 16-bit samples stripped,
/// so the decoder only ever yields gray, gray+alpha, RGB or RGBA.
pub(crate) fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<RawImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, _) = reader.output_color_type();
    let layout = match color_type {
        ColorType::Grayscale => SampleLayout::Gray,
        ColorType::GrayscaleAlpha => SampleLayout::GrayAlpha,
        ColorType::Rgb => SampleLayout::Rgb,
        ColorType::Rgba => SampleLayout::Rgba,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let row_bytes = width as usize * layout.channels();
    // rows may be padded to line_size
    let samples = if output_info.line_size == row_bytes {
        buf.truncate(output_info.buffer_size());
        buf
    } else {
        buf.chunks(output_info.line_size)
            .take(height as usize)
            .flat_map(|row| &row[..row_bytes.min(row.len())])
            .copied()
            .collect()
    };

    let exif = reader.info().exif_metadata.as_ref().map(|e| e.to_vec());

    Ok(RawImage {
        width,
        height,
        layout,
        samples,
        exif,
    })
}

/// Write a bitmap as 8-bit RGB PNG
pub fn write_png<W: Write>(bitmap: &Bitmap, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, bitmap.width(), bitmap.height());
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&bitmap.to_rgb_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebox_core::Color;
    use std::io::Cursor;

    fn encode_rgba(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut encoder = Encoder::new(&mut out, width, height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        let mut w = encoder.write_header().unwrap();
        w.write_image_data(data).unwrap();
        w.finish().unwrap();
        out
    }

    #[test]
    fn test_png_rgb_roundtrip() {
        let mut m = Bitmap::new_filled(5, 3, Color::new(1, 2, 3)).unwrap().to_mut();
        m.set_rgb(4, 2, 250, 128, 7).unwrap();
        let bmp: Bitmap = m.into();

        let mut buf = Vec::new();
        write_png(&bmp, &mut buf).unwrap();
        let raw = read_png(Cursor::new(&buf)).unwrap();
        assert_eq!(raw.layout, SampleLayout::Rgb);
        let back = raw.into_bitmap().unwrap();
        assert!(back.equals(&bmp));
    }

    #[test]
    fn test_png_rgba_is_flattened() {
        let data = [255, 0, 0, 0, 0, 0, 255, 255];
        let buf = encode_rgba(2, 1, &data);
        let raw = read_png(Cursor::new(&buf)).unwrap();
        assert_eq!(raw.layout, SampleLayout::Rgba);
        let bmp = raw.into_bitmap().unwrap();
        assert_eq!(bmp.get_rgb(0, 0), Some((255, 255, 255)));
        assert_eq!(bmp.get_rgb(1, 0), Some((0, 0, 255)));
    }

    #[test]
    fn test_png_garbage() {
        let r = read_png(Cursor::new(b"\x89PNG\r\n\x1a\nnot a png".to_vec()));
        assert!(matches!(r, Err(IoError::DecodeError(_))));
    }
}
