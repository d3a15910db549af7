//! Rotation and flip operations
//!
//! This module provides:
//! - Orthogonal rotations (90/180/270 degrees), always lossless
//! - Horizontal and vertical flips
//! - Transpose (mirror across the main diagonal) and transverse (mirror
//!   across the anti-diagonal)
//!
//! Rotation never clips content: a quarter turn swaps width and height,
//! which is the expanded bounding box for multiples of 90 degrees.

use crate::{TransformError, TransformResult};
use imagebox_core::{Bitmap, BitmapMut, Color};

/// Rotate an image by a number of clockwise quarter turns.
///
/// # Arguments
/// * `bitmap` - Input image
/// * `quads` - Number of 90-degree clockwise turns; taken modulo 4
pub fn rotate_orth(bitmap: &Bitmap, quads: u32) -> TransformResult<Bitmap> {
    match quads % 4 {
        0 => Ok(bitmap.clone()),
        1 => rotate_90(bitmap, true),
        2 => rotate_180(bitmap),
        3 => rotate_90(bitmap, false),
        _ => unreachable!(),
    }
}

/// Rotate by `degrees` clockwise, which must be a multiple of 90.
///
/// Negative angles rotate counterclockwise.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if `degrees` is not a
/// multiple of 90.
pub fn rotate_degrees(bitmap: &Bitmap, degrees: i32) -> TransformResult<Bitmap> {
    if degrees % 90 != 0 {
        return Err(TransformError::InvalidParameters(format!(
            "rotation must be a multiple of 90 degrees, got {degrees}"
        )));
    }
    let quads = degrees.rem_euclid(360) / 90;
    rotate_orth(bitmap, quads as u32)
}

/// Rotate an image 90 degrees
///
/// # Arguments
/// * `bitmap` - Input image
/// * `clockwise` - If true, rotate clockwise; otherwise counterclockwise
pub fn rotate_90(bitmap: &Bitmap, clockwise: bool) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    remap(bitmap, h, w, |x, y| {
        // (x, y) in the output; return the source coordinate
        if clockwise { (y, h - 1 - x) } else { (w - 1 - y, x) }
    })
}

/// Rotate an image 180 degrees
pub fn rotate_180(bitmap: &Bitmap) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    remap(bitmap, w, h, |x, y| (w - 1 - x, h - 1 - y))
}

/// Flip an image left-right (horizontal mirror)
pub fn flip_lr(bitmap: &Bitmap) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    remap(bitmap, w, h, |x, y| (w - 1 - x, y))
}

/// Flip an image top-bottom (vertical mirror)
pub fn flip_tb(bitmap: &Bitmap) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    remap(bitmap, w, h, |x, y| (x, h - 1 - y))
}

/// Mirror across the main diagonal: `out(x, y) = in(y, x)`.
pub fn transpose(bitmap: &Bitmap) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    remap(bitmap, h, w, |x, y| (y, x))
}

/// Mirror across the anti-diagonal: `out(x, y) = in(w - 1 - y, h - 1 - x)`.
pub fn transverse(bitmap: &Bitmap) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    remap(bitmap, h, w, |x, y| (w - 1 - y, h - 1 - x))
}

/// Build an `out_w` x `out_h` image by pulling each pixel from `source(x, y)`.
fn remap<F>(bitmap: &Bitmap, out_w: u32, out_h: u32, source: F) -> TransformResult<Bitmap>
where
    F: Fn(u32, u32) -> (u32, u32),
{
    let mut out = BitmapMut::new_filled(out_w, out_h, Color::BLACK)?;
    for y in 0..out_h {
        let row = out.row_data_mut(y);
        for (x, dst) in row.iter_mut().enumerate() {
            let (sx, sy) = source(x as u32, y);
            *dst = bitmap.get_pixel_unchecked(sx, sy);
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 image with a distinct value in every pixel
    fn sample() -> Bitmap {
        let mut m = Bitmap::new(3, 2).unwrap().to_mut();
        for y in 0..2 {
            for x in 0..3 {
                m.set_rgb(x, y, (y * 3 + x) as u8, 0, 0).unwrap();
            }
        }
        m.into()
    }

    fn red_at(b: &Bitmap, x: u32, y: u32) -> u8 {
        b.get_rgb(x, y).unwrap().0
    }

    #[test]
    fn test_rotate_90_cw() {
        // 0 1 2        3 0
        // 3 4 5   ->   4 1
        //              5 2
        let r = rotate_90(&sample(), true).unwrap();
        assert_eq!(r.dimensions(), (2, 3));
        assert_eq!(red_at(&r, 0, 0), 3);
        assert_eq!(red_at(&r, 1, 0), 0);
        assert_eq!(red_at(&r, 0, 2), 5);
        assert_eq!(red_at(&r, 1, 2), 2);
    }

    #[test]
    fn test_rotate_90_ccw() {
        // 0 1 2        2 5
        // 3 4 5   ->   1 4
        //              0 3
        let r = rotate_90(&sample(), false).unwrap();
        assert_eq!(r.dimensions(), (2, 3));
        assert_eq!(red_at(&r, 0, 0), 2);
        assert_eq!(red_at(&r, 1, 0), 5);
        assert_eq!(red_at(&r, 0, 2), 0);
    }

    #[test]
    fn test_rotate_180_and_flips() {
        let s = sample();
        let r = rotate_180(&s).unwrap();
        assert_eq!(red_at(&r, 0, 0), 5);
        assert_eq!(red_at(&r, 2, 1), 0);

        let both = flip_tb(&flip_lr(&s).unwrap()).unwrap();
        assert!(both.equals(&r));
    }

    #[test]
    fn test_transpose_transverse() {
        let s = sample();
        let t = transpose(&s).unwrap();
        assert_eq!(t.dimensions(), (2, 3));
        assert_eq!(red_at(&t, 1, 0), 3);
        assert_eq!(red_at(&t, 0, 2), 2);

        let tv = transverse(&s).unwrap();
        assert_eq!(red_at(&tv, 0, 0), 5);
        assert_eq!(red_at(&tv, 1, 2), 0);
    }

    #[test]
    fn test_rotate_degrees() {
        let s = sample();
        assert!(rotate_degrees(&s, 0).unwrap().equals(&s));
        assert!(
            rotate_degrees(&s, -90)
                .unwrap()
                .equals(&rotate_90(&s, false).unwrap())
        );
        assert!(
            rotate_degrees(&s, 450)
                .unwrap()
                .equals(&rotate_90(&s, true).unwrap())
        );
        assert!(rotate_degrees(&s, 45).is_err());
    }
}
