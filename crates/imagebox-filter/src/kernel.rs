//! Convolution kernels
//!
//! Kernels are square or rectangular with odd sides and are stored
//! pre-divided by their scale, so convolution is a plain weighted sum.

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// Kernel data (row-major order), already divided by the scale
    data: Vec<f32>,
    /// Value added to every output sample
    offset: f32,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// `scale` divides every weight; pass `None` to use the sum of the
    /// weights (or 1 when they sum to 0).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] unless both sides are odd and
    /// `data` has `width * height` entries.
    pub fn from_slice(
        width: u32,
        height: u32,
        data: &[f32],
        scale: Option<f32>,
    ) -> FilterResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel sides must be odd, got {width}x{height}"
            )));
        }
        if data.len() != (width * height) as usize {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for {}x{}, got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }
        let scale = match scale {
            Some(s) if s != 0.0 => s,
            Some(_) => {
                return Err(FilterError::InvalidKernel("scale cannot be 0".to_string()));
            }
            None => {
                let sum: f32 = data.iter().sum();
                if sum == 0.0 { 1.0 } else { sum }
            }
        };
        Ok(Self {
            width,
            height,
            data: data.iter().map(|v| v / scale).collect(),
            offset: 0.0,
        })
    }

    /// The 3x3 smoothing kernel: a heavy center with unit neighbors, /13.
    pub fn smooth() -> Self {
        let mut data = vec![1.0 / 13.0; 9];
        data[4] = 5.0 / 13.0;
        Self {
            width: 3,
            height: 3,
            data,
            offset: 0.0,
        }
    }

    /// Set the value added after the weighted sum.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Weight at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// All weights, row-major.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_sums_to_one() {
        let k = Kernel::smooth();
        let sum: f32 = k.data().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert_eq!(k.get(1, 1), Some(5.0 / 13.0));
        assert_eq!(k.get(3, 0), None);
    }

    #[test]
    fn test_from_slice_scales() {
        let k = Kernel::from_slice(3, 1, &[1.0, 2.0, 1.0], None).unwrap();
        assert_eq!(k.data(), &[0.25, 0.5, 0.25]);
        let k = Kernel::from_slice(1, 3, &[-1.0, 0.0, 1.0], None).unwrap();
        assert_eq!(k.data(), &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_from_slice_rejects() {
        assert!(Kernel::from_slice(2, 1, &[1.0, 1.0], None).is_err());
        assert!(Kernel::from_slice(3, 3, &[1.0; 8], None).is_err());
        assert!(Kernel::from_slice(1, 1, &[1.0], Some(0.0)).is_err());
    }
}
