//! Packed pixel helpers and RGB colors
//!
//! # Pixel format
//!
//! Pixels are stored one per 32-bit word as `0xRRGGBBAA` (red in MSB).
//! The alpha byte is always 255 inside a [`Bitmap`](crate::Bitmap);
//! transparency is flattened when an image is decoded.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Red channel index (MSB, byte 0)
pub const RED: usize = 0;
/// Green channel index (byte 1)
pub const GREEN: usize = 1;
/// Blue channel index (byte 2)
pub const BLUE: usize = 2;

/// Shift amounts for extracting color channels
pub const RED_SHIFT: u32 = 24;
pub const GREEN_SHIFT: u32 = 16;
pub const BLUE_SHIFT: u32 = 8;
pub const ALPHA_SHIFT: u32 = 0;

/// Extract red component from a packed pixel.
#[inline]
pub fn red(pixel: u32) -> u8 {
    ((pixel >> RED_SHIFT) & 0xff) as u8
}

/// Extract green component from a packed pixel.
#[inline]
pub fn green(pixel: u32) -> u8 {
    ((pixel >> GREEN_SHIFT) & 0xff) as u8
}

/// Extract blue component from a packed pixel.
#[inline]
pub fn blue(pixel: u32) -> u8 {
    ((pixel >> BLUE_SHIFT) & 0xff) as u8
}

/// Compose a packed RGB pixel (alpha = 255).
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << RED_SHIFT)
        | ((g as u32) << GREEN_SHIFT)
        | ((b as u32) << BLUE_SHIFT)
        | (255 << ALPHA_SHIFT)
}

/// Extract RGB values from a packed pixel.
#[inline]
pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
    (red(pixel), green(pixel), blue(pixel))
}

/// Extract one channel (0 = red, 1 = green, 2 = blue).
#[inline]
pub fn channel(pixel: u32, index: usize) -> u8 {
    match index {
        RED => red(pixel),
        GREEN => green(pixel),
        _ => blue(pixel),
    }
}

/// ITU-R 601-2 luma transform in 16.16 fixed point.
///
/// `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, rounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Luma of a packed pixel.
#[inline]
pub fn luma_of(pixel: u32) -> u8 {
    let (r, g, b) = extract_rgb(pixel);
    luma(r, g, b)
}

/// Composite a straight-alpha sample onto a white background.
#[inline]
pub fn flatten_on_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((value as u32 * a + 255 * (255 - a) + 127) / 255) as u8
}

/// An 8-bit RGB color.
///
/// Parses from `#rgb`, `#rrggbb`, `rgb(r, g, b)` and a small table of
/// named colors. Names and hex digits are case-insensitive.
///
/// # Examples
///
/// ```
/// use imagebox_core::Color;
///
/// let c: Color = "#ff8000".parse().unwrap();
/// assert_eq!(c, Color::new(255, 128, 0));
/// assert_eq!("white".parse::<Color>().unwrap(), Color::WHITE);
/// assert!("#12345".parse::<Color>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("white", Color::WHITE),
    ("black", Color::BLACK),
    ("red", Color::new(255, 0, 0)),
    ("lime", Color::new(0, 255, 0)),
    ("green", Color::new(0, 128, 0)),
    ("blue", Color::new(0, 0, 255)),
    ("yellow", Color::new(255, 255, 0)),
    ("cyan", Color::new(0, 255, 255)),
    ("aqua", Color::new(0, 255, 255)),
    ("magenta", Color::new(255, 0, 255)),
    ("fuchsia", Color::new(255, 0, 255)),
    ("gray", Color::new(128, 128, 128)),
    ("grey", Color::new(128, 128, 128)),
    ("silver", Color::new(192, 192, 192)),
    ("maroon", Color::new(128, 0, 0)),
    ("olive", Color::new(128, 128, 0)),
    ("purple", Color::new(128, 0, 128)),
    ("teal", Color::new(0, 128, 128)),
    ("navy", Color::new(0, 0, 128)),
    ("orange", Color::new(255, 165, 0)),
    // Flattened onto the white background like every other transparent pixel
    ("transparent", Color::WHITE),
];

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0xRRGGBBFF` representation.
    #[inline]
    pub fn to_pixel(self) -> u32 {
        compose_rgb(self.r, self.g, self.b)
    }

    /// Unpack from a packed pixel, ignoring alpha.
    #[inline]
    pub fn from_pixel(pixel: u32) -> Self {
        let (r, g, b) = extract_rgb(pixel);
        Self { r, g, b }
    }

    /// Parse a color string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] naming the input and the reason.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let invalid = |reason: &str| Error::InvalidColor {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("empty color string"));
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid("expected #rgb or #rrggbb"));
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(invalid("rgb() takes exactly three components"));
            }
            let mut comps = [0u8; 3];
            for (slot, part) in comps.iter_mut().zip(&parts) {
                *slot = part
                    .parse::<u8>()
                    .map_err(|_| invalid(&format!("component {part:?} is not in 0..=255")))?;
            }
            return Ok(Color::new(comps[0], comps[1], comps[2]));
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
            .ok_or_else(|| invalid("unknown color name"))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Color::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_extract() {
        let p = compose_rgb(10, 20, 30);
        assert_eq!(extract_rgb(p), (10, 20, 30));
        assert_eq!(p & 0xff, 0xff);
        assert_eq!(channel(p, GREEN), 20);
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_flatten_on_white() {
        assert_eq!(flatten_on_white(0, 0), 255);
        assert_eq!(flatten_on_white(0, 255), 0);
        assert_eq!(flatten_on_white(100, 255), 100);
        // half-transparent black lands mid-gray
        let v = flatten_on_white(0, 128);
        assert!((126..=128).contains(&v), "got {v}");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#FFFFFF").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#f80").unwrap(), Color::new(255, 136, 0));
        assert_eq!(Color::parse("  #010203 ").unwrap(), Color::new(1, 2, 3));
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!(
            Color::parse("rgb(12, 34, 56)").unwrap(),
            Color::new(12, 34, 56)
        );
        assert!(Color::parse("rgb(12, 34)").is_err());
        assert!(Color::parse("rgb(12, 34, 256)").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("Black").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("grey").unwrap(), Color::new(128, 128, 128));
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["", "#12", "#gggggg", "not-a-color", "#1234567"] {
            match Color::parse(bad) {
                Err(Error::InvalidColor { value, .. }) => assert_eq!(value, bad),
                other => panic!("expected InvalidColor for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let c = Color::new(0xab, 0x01, 0xff);
        assert_eq!(c.to_string(), "#ab01ff");
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }
}
