//! Pixel access functions
//!
//! Bounds-checked getters return `Option`, bounds-checked setters return
//! `Result`; the `_unchecked` variants panic on out-of-range coordinates
//! and are meant for inner loops that already iterate within bounds.

use super::{Bitmap, BitmapMut};
use crate::color;
use crate::error::{Error, Result};

impl Bitmap {
    /// Get a packed pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a packed pixel without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; `x >= width` reads into the next row.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[self.inner.index(x, y)]
    }

    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl BitmapMut {
    /// Get a packed pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a packed pixel without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[self.inner.index(x, y)]
    }

    /// Set a packed pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates are outside
    /// the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a packed pixel without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = val;
    }

    /// Set RGB values at (x, y).
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bitmap, Color};

    #[test]
    fn test_get_out_of_bounds() {
        let bmp = Bitmap::new(5, 4).unwrap();
        assert!(bmp.get_pixel(4, 3).is_some());
        assert!(bmp.get_pixel(5, 0).is_none());
        assert!(bmp.get_rgb(0, 4).is_none());
    }

    #[test]
    fn test_set_rgb() {
        let mut m = Bitmap::new(5, 4).unwrap().to_mut();
        m.set_rgb(3, 2, 1, 2, 3).unwrap();
        assert!(m.set_rgb(5, 0, 0, 0, 0).is_err());
        let bmp: Bitmap = m.into();
        assert_eq!(bmp.get_rgb(3, 2), Some((1, 2, 3)));
        assert_eq!(Color::from_pixel(bmp.get_pixel(0, 0).unwrap()), Color::BLACK);
    }
}
