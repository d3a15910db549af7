//! Kernel convolution
//!
//! Pixels closer to the border than the kernel's half-size are copied
//! unchanged, and images smaller than the kernel are returned as-is.
//! Sums are taken in `f32` and truncated back to 8 bits after clamping.

use crate::{FilterResult, Kernel};
use imagebox_core::color::{self, BLUE, GREEN, RED};
use imagebox_core::Bitmap;

#[inline]
fn clip8(v: f32) -> u8 {
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

/// Convolve every channel of `bitmap` with `kernel`.
pub fn convolve(bitmap: &Bitmap, kernel: &Kernel) -> FilterResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    let (kw, kh) = (kernel.width(), kernel.height());
    if w < kw || h < kh {
        return Ok(bitmap.clone());
    }
    let (hx, hy) = (kw / 2, kh / 2);

    let mut out = bitmap.to_mut();
    for y in hy..h - hy {
        for x in hx..w - hx {
            let mut acc = [kernel.offset(); 3];
            for ky in 0..kh {
                let row = bitmap.row_data(y + ky - hy);
                for kx in 0..kw {
                    let p = row[(x + kx - hx) as usize];
                    let k = kernel.data()[(ky * kw + kx) as usize];
                    acc[RED] += color::channel(p, RED) as f32 * k;
                    acc[GREEN] += color::channel(p, GREEN) as f32 * k;
                    acc[BLUE] += color::channel(p, BLUE) as f32 * k;
                }
            }
            out.set_pixel_unchecked(
                x,
                y,
                color::compose_rgb(clip8(acc[RED]), clip8(acc[GREEN]), clip8(acc[BLUE])),
            );
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebox_core::Color;

    #[test]
    fn test_border_is_copied() {
        let mut m = Bitmap::new_filled(4, 4, Color::BLACK).unwrap().to_mut();
        m.set_rgb(0, 0, 255, 255, 255).unwrap();
        let b: Bitmap = m.into();
        let out = convolve(&b, &Kernel::smooth()).unwrap();
        assert_eq!(out.get_rgb(0, 0), Some((255, 255, 255)));
        // the bright corner leaks 1/13 into its interior neighbor
        assert_eq!(out.get_rgb(1, 1), Some((19, 19, 19)));
    }

    #[test]
    fn test_small_image_unchanged() {
        let b = Bitmap::new_filled(2, 5, Color::new(1, 2, 3)).unwrap();
        let out = convolve(&b, &Kernel::smooth()).unwrap();
        assert!(out.equals(&b));
    }

    #[test]
    fn test_flat_image_stays_flat() {
        let b = Bitmap::new_filled(6, 6, Color::new(100, 150, 200)).unwrap();
        let k = Kernel::from_slice(3, 3, &[1.0; 9], None).unwrap();
        let out = convolve(&b, &k).unwrap();
        // f32 rounding may land just below the exact value
        let d = b.diff(&out).unwrap();
        assert!(d.max_channel_diff <= 1);
    }
}
