//! Image comparison

use super::Bitmap;
use crate::color;
use crate::error::{Error, Result};

/// Result of a pixel-wise comparison between two equally sized bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDiff {
    /// Number of pixels with any channel differing
    pub differing: u64,
    /// Largest absolute per-channel difference
    pub max_channel_diff: u8,
}

impl PixelDiff {
    /// True when no pixel differs.
    pub fn is_identical(&self) -> bool {
        self.differing == 0
    }
}

impl Bitmap {
    /// Check whether two bitmaps have the same size and identical pixels.
    pub fn equals(&self, other: &Bitmap) -> bool {
        self.dimensions() == other.dimensions() && self.data() == other.data()
    }

    /// Compare pixel by pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn diff(&self, other: &Bitmap) -> Result<PixelDiff> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        let mut differing = 0u64;
        let mut max_channel_diff = 0u8;
        for (&a, &b) in self.data().iter().zip(other.data()) {
            if a == b {
                continue;
            }
            differing += 1;
            for c in 0..3 {
                let d = color::channel(a, c).abs_diff(color::channel(b, c));
                max_channel_diff = max_channel_diff.max(d);
            }
        }
        Ok(PixelDiff {
            differing,
            max_channel_diff,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bitmap, Color};

    #[test]
    fn test_equals_and_diff() {
        let a = Bitmap::new_filled(4, 3, Color::WHITE).unwrap();
        let mut m = a.to_mut();
        m.set_rgb(1, 1, 250, 255, 200).unwrap();
        let b: Bitmap = m.into();

        assert!(a.equals(&a.clone()));
        assert!(!a.equals(&b));

        let d = a.diff(&b).unwrap();
        assert_eq!(d.differing, 1);
        assert_eq!(d.max_channel_diff, 55);
        assert!(!d.is_identical());
    }

    #[test]
    fn test_diff_size_mismatch() {
        let a = Bitmap::new(4, 3).unwrap();
        let b = Bitmap::new(3, 4).unwrap();
        assert!(!a.equals(&b));
        assert!(a.diff(&b).is_err());
    }
}
