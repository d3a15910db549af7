//! Rect - rectangular regions
//!
//! A small `Copy` type used for tiles, crop regions and paste targets.

use crate::error::{Error, Result};

/// A rectangle region in pixel coordinates.
///
/// `x`/`y` is the top-left corner; `w`/`h` are non-negative extents.
/// The right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rect
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rect without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rect from two corner points (any order)
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            w: x1.abs_diff(x2).min(i32::MAX as u32) as i32,
            h: y1.abs_diff(y2).min(i32::MAX as u32) as i32,
        }
    }

    /// Get the right x coordinate (exclusive), saturating at `i32::MAX`
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Get the bottom y coordinate (exclusive), saturating at `i32::MAX`
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the rect is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the rect
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rect overlaps another (shared area, not just an edge)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the intersection of two rects
    ///
    /// Edges are compared in `i64`, so rects reaching past the `i32` range
    /// intersect by their true extent.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let edge = |start: i32, len: i32| start as i64 + len as i64;
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = edge(self.x, self.w).min(edge(other.x, other.w));
        let bottom = edge(self.y, self.h).min(edge(other.y, other.h));

        if (x as i64) < right && (y as i64) < bottom {
            // never wider than either input, so the extents fit in i32
            Some(Rect {
                x,
                y,
                w: (right - x as i64) as i32,
                h: (bottom - y as i64) as i32,
            })
        } else {
            None
        }
    }

    /// Clip to the bounds of a `width` x `height` image.
    ///
    /// Returns `None` when nothing of the rect lies inside the image.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Rect> {
        let bounds = Rect::new_unchecked(0, 0, width as i32, height as i32);
        self.intersect(&bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(Rect::new(0, 0, -1, 5).is_err());
        assert!(Rect::new(0, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_from_corners() {
        let r = Rect::from_corners(30, 40, 10, 5);
        assert_eq!(r, Rect::new_unchecked(10, 5, 20, 35));
    }

    #[test]
    fn test_intersect_and_overlap() {
        let a = Rect::new_unchecked(0, 0, 100, 100);
        let b = Rect::new_unchecked(50, 50, 100, 100);
        assert!(a.overlaps(&b));
        assert_eq!(a.intersect(&b), Some(Rect::new_unchecked(50, 50, 50, 50)));

        // touching edges do not overlap
        let c = Rect::new_unchecked(100, 0, 10, 10);
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_clip_to() {
        let r = Rect::new_unchecked(-10, 20, 50, 500);
        assert_eq!(r.clip_to(30, 100), Some(Rect::new_unchecked(0, 20, 30, 80)));
        assert_eq!(Rect::new_unchecked(40, 0, 5, 5).clip_to(30, 100), None);
    }

    #[test]
    fn test_far_edges_do_not_overflow() {
        let far = Rect::new_unchecked(2_000_000_000, 0, 1_000_000_000, 10);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.clip_to(50, 50), None);

        let huge = Rect::new_unchecked(i32::MAX, i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(huge.bottom(), i32::MAX);
        assert_eq!(huge.clip_to(50, 50), None);

        let wide = Rect::new_unchecked(i32::MIN, -5, i32::MAX, i32::MAX);
        assert!(wide.overlaps(&Rect::new_unchecked(-10, 0, 5, 5)));
        assert_eq!(
            wide.intersect(&Rect::new_unchecked(-10, 0, 5, 5)),
            Some(Rect::new_unchecked(-10, 0, 5, 5))
        );
    }

    #[test]
    fn test_area_and_contains() {
        let r = Rect::new_unchecked(2, 3, 4, 5);
        assert_eq!(r.area(), 20);
        assert!(r.contains_point(2, 3));
        assert!(!r.contains_point(6, 3));
        assert!(r.contains_point(5, 7));
    }
}
