//! Embedded orientation metadata
//!
//! Cameras and phones store the sensor image as captured and record how it
//! should be displayed in the EXIF `Orientation` tag (0x0112). Decoding
//! bakes that transform into the pixels so every later operation sees the
//! image upright.

use crate::IoResult;
use imagebox_core::Bitmap;
use imagebox_transform as transform;
use tracing::debug;

const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// The eight EXIF orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// 1: stored upright
    #[default]
    Normal,
    /// 2: mirrored left-right
    FlipHorizontal,
    /// 3: upside down
    Rotate180,
    /// 4: mirrored top-bottom
    FlipVertical,
    /// 5: mirrored across the main diagonal
    Transpose,
    /// 6: needs a 90 degree clockwise turn
    Rotate90,
    /// 7: mirrored across the anti-diagonal
    Transverse,
    /// 8: needs a 90 degree counterclockwise turn
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation value; out-of-range values are `None`.
    pub fn from_exif(value: u32) -> Option<Self> {
        Some(match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => return None,
        })
    }

    /// Read the orientation from a raw EXIF block.
    ///
    /// Accepts the TIFF structure with or without the `Exif\0\0` APP1
    /// prefix. Anything unparseable is treated as [`Orientation::Normal`].
    pub fn from_exif_block(block: &[u8]) -> Self {
        let tiff = block.strip_prefix(EXIF_HEADER).unwrap_or(block);
        let parsed = match exif::Reader::new().read_raw(tiff.to_vec()) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "ignoring unreadable EXIF block");
                return Orientation::Normal;
            }
        };
        parsed
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|f| f.value.get_uint(0))
            .and_then(Self::from_exif)
            .unwrap_or_default()
    }

    /// Return an upright copy of `bitmap`.
    pub fn apply(self, bitmap: &Bitmap) -> IoResult<Bitmap> {
        let out = match self {
            Orientation::Normal => bitmap.clone(),
            Orientation::FlipHorizontal => transform::flip_lr(bitmap)?,
            Orientation::Rotate180 => transform::rotate_180(bitmap)?,
            Orientation::FlipVertical => transform::flip_tb(bitmap)?,
            Orientation::Transpose => transform::transpose(bitmap)?,
            Orientation::Rotate90 => transform::rotate_90(bitmap, true)?,
            Orientation::Transverse => transform::transverse(bitmap)?,
            Orientation::Rotate270 => transform::rotate_90(bitmap, false)?,
        };
        Ok(out)
    }
}
