//! Paste and fill operations
//!
//! Rectangular copy of one bitmap into another (the compositor's only
//! drawing primitive) and solid rectangle fills. Both clip silently at the
//! destination edges.

use super::{Bitmap, BitmapMut};
use crate::Rect;
use crate::color::Color;

impl BitmapMut {
    /// Copy `src` into this bitmap with its top-left corner at (x, y).
    ///
    /// Parts of `src` falling outside the destination are dropped.
    pub fn paste(&mut self, src: &Bitmap, x: i32, y: i32) {
        let target = Rect::new_unchecked(x, y, src.width() as i32, src.height() as i32);
        let Some(visible) = target.clip_to(self.width(), self.height()) else {
            return;
        };

        let sx0 = (visible.x - x) as usize;
        let sy0 = visible.y - y;
        let w = visible.w as usize;
        for row in 0..visible.h {
            let src_row = &src.row_data((sy0 + row) as u32)[sx0..sx0 + w];
            let dst_row = self.row_data_mut((visible.y + row) as u32);
            dst_row[visible.x as usize..visible.x as usize + w].copy_from_slice(src_row);
        }
    }

    /// Fill `region` with a solid color.
    pub fn fill_rect(&mut self, region: &Rect, fill: Color) {
        let Some(visible) = region.clip_to(self.width(), self.height()) else {
            return;
        };
        let p = fill.to_pixel();
        for row in visible.y..visible.bottom() {
            let line = self.row_data_mut(row as u32);
            line[visible.x as usize..visible.right() as usize].fill(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bitmap, BitmapMut, Color, Rect};

    #[test]
    fn test_paste_inside() {
        let mut canvas = BitmapMut::new_filled(10, 10, Color::WHITE).unwrap();
        let tile = Bitmap::new_filled(3, 2, Color::BLACK).unwrap();
        canvas.paste(&tile, 4, 5);
        let out: Bitmap = canvas.into();
        assert_eq!(out.get_rgb(4, 5), Some((0, 0, 0)));
        assert_eq!(out.get_rgb(6, 6), Some((0, 0, 0)));
        assert_eq!(out.get_rgb(7, 6), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(4, 7), Some((255, 255, 255)));
    }

    #[test]
    fn test_paste_clips_at_edges() {
        let mut canvas = BitmapMut::new_filled(4, 4, Color::WHITE).unwrap();
        let mut tile = Bitmap::new_filled(3, 3, Color::BLACK).unwrap().to_mut();
        tile.set_rgb(2, 2, 9, 9, 9).unwrap();
        let tile: Bitmap = tile.into();
        canvas.paste(&tile, -2, -2);
        let out: Bitmap = canvas.into();
        assert_eq!(out.get_rgb(0, 0), Some((9, 9, 9)));
        assert_eq!(out.get_rgb(1, 0), Some((255, 255, 255)));

        let mut canvas = BitmapMut::new_filled(4, 4, Color::WHITE).unwrap();
        canvas.paste(&Bitmap::new(2, 2).unwrap(), 10, 10);
        let out: Bitmap = canvas.into();
        assert!(out.data().iter().all(|&p| p == Color::WHITE.to_pixel()));
    }

    #[test]
    fn test_fill_rect() {
        let mut canvas = BitmapMut::new_filled(5, 5, Color::WHITE).unwrap();
        canvas.fill_rect(&Rect::new_unchecked(3, 3, 10, 10), Color::BLACK);
        let out: Bitmap = canvas.into();
        assert_eq!(out.get_rgb(4, 4), Some((0, 0, 0)));
        assert_eq!(out.get_rgb(2, 4), Some((255, 255, 255)));
    }
}
