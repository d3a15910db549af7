//! Decoded sample buffers and their conversion to RGB
//!
//! Every decoder hands back interleaved 8-bit samples in one of a few
//! layouts. [`RawImage::into_bitmap`] normalizes them to the single RGB
//! model the toolbox works in: gray is replicated, CMYK is converted and
//! any alpha channel is composited onto a white background.

use crate::{IoError, IoResult};
use imagebox_core::color;
use imagebox_core::{Bitmap, BitmapMut, Color};

/// Interleaved sample layout of a decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SampleLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
    Cmyk,
}

impl SampleLayout {
    pub(crate) fn channels(self) -> usize {
        match self {
            SampleLayout::Gray => 1,
            SampleLayout::GrayAlpha => 2,
            SampleLayout::Rgb => 3,
            SampleLayout::Rgba | SampleLayout::Cmyk => 4,
        }
    }
}

/// One decoded frame plus the raw EXIF block, if the container had one
pub(crate) struct RawImage {
    pub width: u32,
    pub height: u32,
    pub layout: SampleLayout,
    pub samples: Vec<u8>,
    pub exif: Option<Vec<u8>>,
}

impl RawImage {
    pub(crate) fn into_bitmap(self) -> IoResult<Bitmap> {
        let channels = self.layout.channels();
        let expected = self.width as usize * self.height as usize * channels;
        if self.samples.len() < expected {
            return Err(IoError::InvalidData(format!(
                "decoder returned {} samples, expected {}",
                self.samples.len(),
                expected
            )));
        }

        let mut out = BitmapMut::new_filled(self.width, self.height, Color::WHITE)?;
        for (dst, px) in out
            .data_mut()
            .iter_mut()
            .zip(self.samples.chunks_exact(channels))
        {
            *dst = match self.layout {
                SampleLayout::Gray => color::compose_rgb(px[0], px[0], px[0]),
                SampleLayout::GrayAlpha => {
                    let g = color::flatten_on_white(px[0], px[1]);
                    color::compose_rgb(g, g, g)
                }
                SampleLayout::Rgb => color::compose_rgb(px[0], px[1], px[2]),
                SampleLayout::Rgba => color::compose_rgb(
                    color::flatten_on_white(px[0], px[3]),
                    color::flatten_on_white(px[1], px[3]),
                    color::flatten_on_white(px[2], px[3]),
                ),
                SampleLayout::Cmyk => {
                    let k = px[3] as u16;
                    let conv = |c: u8| 255u16.saturating_sub(c as u16 + k) as u8;
                    color::compose_rgb(conv(px[0]), conv(px[1]), conv(px[2]))
                }
            };
        }
        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(layout: SampleLayout, samples: Vec<u8>) -> RawImage {
        RawImage {
            width: 2,
            height: 1,
            layout,
            samples,
            exif: None,
        }
    }

    #[test]
    fn test_gray_is_replicated() {
        let b = raw(SampleLayout::Gray, vec![10, 200]).into_bitmap().unwrap();
        assert_eq!(b.get_rgb(0, 0), Some((10, 10, 10)));
        assert_eq!(b.get_rgb(1, 0), Some((200, 200, 200)));
    }

    #[test]
    fn test_alpha_flattens_on_white() {
        let b = raw(SampleLayout::Rgba, vec![0, 0, 0, 0, 0, 0, 0, 255])
            .into_bitmap()
            .unwrap();
        // fully transparent black becomes white, opaque black stays black
        assert_eq!(b.get_rgb(0, 0), Some((255, 255, 255)));
        assert_eq!(b.get_rgb(1, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        assert!(matches!(
            raw(SampleLayout::Rgb, vec![0; 5]).into_bitmap(),
            Err(IoError::InvalidData(_))
        ));
    }
}
