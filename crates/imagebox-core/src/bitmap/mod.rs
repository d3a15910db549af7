//! Bitmap - the image container
//!
//! `Bitmap` is the single raster type used by every imagebox operation:
//! an 8-bit RGB image with strictly positive width and height.
//!
//! # Pixel layout
//!
//! - One packed 32-bit word per pixel, `0xRRGGBBFF` (see [`crate::color`])
//! - Rows are stored top to bottom, `width` words per row, no padding
//!
//! # Ownership model
//!
//! `Bitmap` uses `Arc` for cheap cloning (shared ownership) and is never
//! mutated in place. To modify pixel data, convert to [`BitmapMut`] via
//! [`Bitmap::try_into_mut`] or [`Bitmap::to_mut`], then convert back with
//! `Into<Bitmap>`. Every transform therefore returns a new `Bitmap` and the
//! caller's input is left untouched.

mod access;
mod clip;
mod compare;
mod paste;

pub use compare::PixelDiff;

use crate::color::{self, Color};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal bitmap data
#[derive(Debug, Clone)]
struct BitmapData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed pixels, row-major
    data: Vec<u32>,
}

impl BitmapData {
    fn filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![pixel; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Bitmap - immutable, shareable 8-bit RGB image
///
/// # Examples
///
/// ```
/// use imagebox_core::{Bitmap, Color};
///
/// let bmp = Bitmap::new_filled(640, 480, Color::WHITE).unwrap();
/// assert_eq!(bmp.width(), 640);
/// assert_eq!(bmp.height(), 480);
/// assert_eq!(bmp.get_rgb(0, 0), Some((255, 255, 255)));
/// ```
#[derive(Debug, Clone)]
pub struct Bitmap {
    inner: Arc<BitmapData>,
}

impl Bitmap {
    /// Create a new black bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, Color::BLACK)
    }

    /// Create a new bitmap with every pixel set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, fill: Color) -> Result<Self> {
        let inner = BitmapData::filled(width, height, fill.to_pixel())?;
        Ok(Bitmap {
            inner: Arc::new(inner),
        })
    }

    /// Build a bitmap from tightly packed RGB bytes (3 per pixel).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::InvalidParameter`] if `bytes` has the wrong length.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut inner = BitmapData::filled(width, height, 0)?;
        let expected = inner.data.len() * 3;
        if bytes.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "expected {} RGB bytes for {}x{}, got {}",
                expected,
                width,
                height,
                bytes.len()
            )));
        }
        for (dst, src) in inner.data.iter_mut().zip(bytes.chunks_exact(3)) {
            *dst = color::compose_rgb(src[0], src[1], src[2]);
        }
        Ok(Bitmap {
            inner: Arc::new(inner),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.inner.width as u64 * self.inner.height as u64
    }

    /// Get raw access to the packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get one row of packed pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = self.inner.index(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Get the number of strong references to this bitmap.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Serialize to tightly packed RGB bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.data.len() * 3);
        for &p in &self.inner.data {
            let (r, g, b) = color::extract_rgb(p);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    /// Create a deep copy of this bitmap.
    ///
    /// Unlike `clone()` which shares data via `Arc`, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Bitmap {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<BitmapMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(BitmapMut { inner: data }),
            Err(arc) => Err(Bitmap { inner: arc }),
        }
    }

    /// Get a mutable bitmap, copying the data only if it is shared.
    pub fn into_mut(self) -> BitmapMut {
        match self.try_into_mut() {
            Ok(m) => m,
            Err(shared) => shared.to_mut(),
        }
    }

    /// Create a mutable copy of this bitmap.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> BitmapMut {
        BitmapMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable bitmap
///
/// Allows modification of image data. Convert back to an immutable
/// [`Bitmap`] using `Into<Bitmap>`.
#[derive(Debug)]
pub struct BitmapMut {
    inner: BitmapData,
}

impl BitmapMut {
    /// Create a new mutable bitmap filled with `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, fill: Color) -> Result<Self> {
        Ok(BitmapMut {
            inner: BitmapData::filled(width, height, fill.to_pixel())?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the packed pixels.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get one mutable row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = self.inner.index(0, y);
        let end = start + self.inner.width as usize;
        &mut self.inner.data[start..end]
    }

    /// Set every pixel to `fill`.
    pub fn fill(&mut self, fill: Color) {
        let p = fill.to_pixel();
        self.inner.data.iter_mut().for_each(|d| *d = p);
    }
}

impl From<BitmapMut> for Bitmap {
    fn from(bmp: BitmapMut) -> Self {
        Bitmap {
            inner: Arc::new(bmp.inner),
        }
    }
}
