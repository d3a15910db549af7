//! Guide lines for guillotine slicing
//!
//! A [`GuideSet`] holds vertical guides (x positions, cutting top to
//! bottom) and horizontal guides (y positions, cutting left to right).
//! Each axis is kept sorted and free of duplicates. Coordinates are not
//! checked against any image here; [`GuideSet::cuts`] clamps them into
//! the image when the set is used.

use crate::{LayoutError, LayoutResult};
use imagebox_core::Error;
use std::fmt;

/// Guide orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A vertical line at some x; splits columns
    Vertical,
    /// A horizontal line at some y; splits rows
    Horizontal,
}

/// Vertical and horizontal guide coordinates in source pixels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideSet {
    xs: Vec<i32>,
    ys: Vec<i32>,
}

/// Boundary cut positions for one bitmap, both axes including 0 and the
/// far edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cuts {
    pub xs: Vec<u32>,
    pub ys: Vec<u32>,
}

fn insert_sorted(v: &mut Vec<i32>, value: i32) -> bool {
    match v.binary_search(&value) {
        Ok(_) => false,
        Err(pos) => {
            v.insert(pos, value);
            true
        }
    }
}

fn normalize(mut v: Vec<i32>) -> Vec<i32> {
    v.sort_unstable();
    v.dedup();
    v
}

/// Clamp into `[0, len]`, add both ends, sort and dedup.
fn axis_cuts(guides: &[i32], len: u32) -> Vec<u32> {
    let mut cuts: Vec<u32> = guides
        .iter()
        .map(|&g| g.clamp(0, len.min(i32::MAX as u32) as i32) as u32)
        .chain([0, len])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();
    cuts
}

impl GuideSet {
    /// Create an empty guide set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw coordinate lists; duplicates are dropped.
    pub fn from_axes(xs: Vec<i32>, ys: Vec<i32>) -> Self {
        Self {
            xs: normalize(xs),
            ys: normalize(ys),
        }
    }

    /// Vertical guide positions, ascending
    pub fn xs(&self) -> &[i32] {
        &self.xs
    }

    /// Horizontal guide positions, ascending
    pub fn ys(&self) -> &[i32] {
        &self.ys
    }

    /// Guides on one axis
    pub fn axis(&self, axis: Axis) -> &[i32] {
        match axis {
            Axis::Vertical => &self.xs,
            Axis::Horizontal => &self.ys,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Vec<i32> {
        match axis {
            Axis::Vertical => &mut self.xs,
            Axis::Horizontal => &mut self.ys,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() && self.ys.is_empty()
    }

    /// Add a guide; returns false if it was already present.
    pub fn insert(&mut self, axis: Axis, coord: i32) -> bool {
        insert_sorted(self.axis_mut(axis), coord)
    }

    /// Remove a guide; returns false if it was absent.
    pub fn remove(&mut self, axis: Axis, coord: i32) -> bool {
        let v = self.axis_mut(axis);
        match v.binary_search(&coord) {
            Ok(pos) => {
                v.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Drop every guide on both axes.
    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }

    /// Replace all guides on one axis.
    pub fn set_axis(&mut self, axis: Axis, coords: Vec<i32>) {
        *self.axis_mut(axis) = normalize(coords);
    }

    /// Map a click on a zoomed preview back to a source coordinate and
    /// add it as a guide.
    ///
    /// The source coordinate is `trunc(preview_coord / (zoom_percent / 100))`.
    /// Returns the source coordinate and whether it was newly added.
    ///
    /// # Errors
    ///
    /// Returns an invalid-parameter error if `zoom_percent` is 0.
    pub fn add_from_preview(
        &mut self,
        axis: Axis,
        preview_coord: i32,
        zoom_percent: u32,
    ) -> LayoutResult<(i32, bool)> {
        if zoom_percent == 0 {
            return Err(Error::InvalidParameter("zoom must be positive".to_string()).into());
        }
        let ratio = zoom_percent as f64 / 100.0;
        let coord = (preview_coord as f64 / ratio) as i32;
        let added = self.insert(axis, coord);
        Ok((coord, added))
    }

    /// Cut positions for a `width` x `height` bitmap.
    ///
    /// Guides outside the image are clamped onto its edges, so they never
    /// produce a tile of their own.
    pub fn cuts(&self, width: u32, height: u32) -> Cuts {
        Cuts {
            xs: axis_cuts(&self.xs, width),
            ys: axis_cuts(&self.ys, height),
        }
    }

    /// A copy with every coordinate clamped into `[0, width]` / `[0, height]`.
    pub fn normalized(&self, width: u32, height: u32) -> GuideSet {
        let clamp = |v: &[i32], len: u32| {
            let hi = len.min(i32::MAX as u32) as i32;
            normalize(v.iter().map(|&g| g.clamp(0, hi)).collect())
        };
        GuideSet {
            xs: clamp(&self.xs, width),
            ys: clamp(&self.ys, height),
        }
    }

    /// Parse a comma-separated coordinate list.
    ///
    /// ASCII `,` and full-width `，` both separate entries; surrounding
    /// whitespace and empty entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns an invalid-parameter error naming the first token that is
    /// not an integer.
    pub fn parse_axis(text: &str) -> LayoutResult<Vec<i32>> {
        let mut out = Vec::new();
        for token in text.split([',', '，']) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let v = token.parse::<i32>().map_err(|_| {
                LayoutError::Core(Error::InvalidParameter(format!(
                    "guide coordinate {token:?} is not an integer"
                )))
            })?;
            out.push(v);
        }
        Ok(normalize(out))
    }

    /// Render coordinates as `"100,200,300"`.
    pub fn format_axis(coords: &[i32]) -> String {
        coords
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for GuideSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x=[{}] y=[{}]",
            Self::format_axis(&self.xs),
            Self::format_axis(&self.ys)
        )
    }
}
