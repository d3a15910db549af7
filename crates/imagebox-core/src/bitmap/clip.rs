//! Rectangle clipping
//!
//! Extraction of rectangular sub-regions, the primitive behind slicing
//! and free-crop.

use super::{Bitmap, BitmapData};
use crate::Rect;
use crate::error::{Error, Result};
use std::sync::Arc;

impl Bitmap {
    /// Extract a rectangular sub-region from the image.
    ///
    /// If the rectangle extends beyond the image bounds, it is clipped to
    /// the valid region.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The requested width or height is 0
    /// - The rectangle origin is outside the image bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use imagebox_core::Bitmap;
    ///
    /// let bmp = Bitmap::new(100, 80).unwrap();
    /// let clipped = bmp.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);   // clipped: 100 - 80
    /// assert_eq!(clipped.height(), 20);  // clipped: 80 - 60
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Bitmap> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {}x{}",
                w, h
            )));
        }

        let src_w = self.width();
        let src_h = self.height();

        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({}, {}) is outside image bounds ({}x{})",
                x, y, src_w, src_h
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let mut data = Vec::with_capacity(clip_w as usize * clip_h as usize);
        for row in y..y + clip_h {
            let line = self.row_data(row);
            data.extend_from_slice(&line[x as usize..(x + clip_w) as usize]);
        }

        Ok(Bitmap {
            inner: Arc::new(BitmapData {
                width: clip_w,
                height: clip_h,
                data,
            }),
        })
    }

    /// Extract the part of `region` that lies inside the image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateRegion`] (with index 0) when the region has
    /// no area inside the image.
    pub fn clip_rect(&self, region: &Rect) -> Result<Bitmap> {
        let clipped = region
            .clip_to(self.width(), self.height())
            .ok_or(Error::DegenerateRegion {
                index: 0,
                width: region.w as i64,
                height: region.h as i64,
            })?;
        self.clip_rectangle(
            clipped.x as u32,
            clipped.y as u32,
            clipped.w as u32,
            clipped.h as u32,
        )
    }
}
