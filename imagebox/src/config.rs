//! Tool configuration
//!
//! Settings suitable for a JSON config file and for command-line
//! defaults. Every section and field is optional in the file; missing
//! values take the defaults below.
//!
//! ```json
//! {
//!   "stitch": { "mode": "grid", "columns": 3, "padding": 10, "background": "#000" },
//!   "enhance": { "upscale": 1.0, "sharpness": 2.5 },
//!   "output": { "format": "jpeg" }
//! }
//! ```

use crate::{ToolError, ToolResult};
use clap::ValueEnum;
use imagebox_filter::EnhanceParams;
use imagebox_io::ImageFormat;
use imagebox_io::archive::ArchiveCompression;
use imagebox_layout::{Alignment, StitchLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Encoded output format for single images
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    /// Quality 100, no chroma subsampling
    Jpeg,
}

impl OutputFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Vertical,
    Horizontal,
    Grid,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentChoice {
    /// Resize items to the largest width or height
    #[default]
    Stretch,
    /// Keep item sizes, center them
    Original,
}

impl From<AlignmentChoice> for Alignment {
    fn from(a: AlignmentChoice) -> Self {
        match a {
            AlignmentChoice::Stretch => Alignment::Stretch,
            AlignmentChoice::Original => Alignment::Original,
        }
    }
}

/// Stitch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    pub mode: LayoutMode,
    /// Grid columns; ignored by the stack modes
    pub columns: u32,
    pub alignment: AlignmentChoice,
    pub padding: u32,
    /// Any color string accepted by [`imagebox_core::Color::parse`]
    pub background: String,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Vertical,
            columns: 2,
            alignment: AlignmentChoice::Stretch,
            padding: 0,
            background: "#ffffff".to_string(),
        }
    }
}

impl StitchConfig {
    /// Build the layout these settings describe.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-color layout error if `background` does not
    /// parse.
    pub fn to_layout(&self) -> ToolResult<StitchLayout> {
        let layout = match self.mode {
            LayoutMode::Vertical => StitchLayout::vertical(),
            LayoutMode::Horizontal => StitchLayout::horizontal(),
            LayoutMode::Grid => StitchLayout::grid(self.columns),
        };
        Ok(layout
            .with_alignment(self.alignment.into())
            .with_padding(self.padding)
            .with_background_str(&self.background)?)
    }
}

/// Enhancement factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub upscale: f64,
    pub sharpness: f32,
    pub contrast: f32,
    pub color: f32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        let p = EnhanceParams::default();
        Self {
            upscale: p.upscale,
            sharpness: p.sharpness,
            contrast: p.contrast,
            color: p.color,
        }
    }
}

impl From<EnhanceConfig> for EnhanceParams {
    fn from(c: EnhanceConfig) -> Self {
        EnhanceParams {
            upscale: c.upscale,
            sharpness: c.sharpness,
            contrast: c.contrast,
            color: c.color,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Deflate ZIP entries instead of storing them
    pub deflate: bool,
}

impl OutputConfig {
    pub fn compression(&self) -> ArchiveCompression {
        if self.deflate {
            ArchiveCompression::Deflated
        } else {
            ArchiveCompression::Stored
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub stitch: StitchConfig,
    pub enhance: EnhanceConfig,
    pub output: OutputConfig,
}

impl ToolConfig {
    /// Parse a JSON document.
    pub fn from_json(text: &str) -> ToolResult<Self> {
        serde_json::from_str(text).map_err(|e| ToolError::Config(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> ToolResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| ToolError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_json(&self) -> ToolResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ToolError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebox_layout::StitchMode;

    #[test]
    fn test_defaults_match_pipeline() {
        let c = ToolConfig::default();
        assert_eq!(EnhanceParams::from(c.enhance), EnhanceParams::default());
        assert_eq!(c.output.format, OutputFormat::Png);
        assert_eq!(c.output.compression(), ArchiveCompression::Stored);
        assert_eq!(c.stitch.to_layout().unwrap(), StitchLayout::default());
    }

    #[test]
    fn test_partial_file() {
        let c = ToolConfig::from_json(
            r#"{"stitch": {"mode": "grid", "columns": 3, "background": "black"},
                "output": {"format": "jpeg"}}"#,
        )
        .unwrap();
        let layout = c.stitch.to_layout().unwrap();
        assert_eq!(layout.mode, StitchMode::Grid { columns: 3 });
        assert_eq!(layout.background, imagebox_core::Color::BLACK);
        assert_eq!(c.output.format.image_format(), ImageFormat::Jpeg);
        assert_eq!(c.enhance, EnhanceConfig::default());
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            ToolConfig::from_json(r#"{"stitch": {"mode": "diagonal"}}"#),
            Err(ToolError::Config(_))
        ));
        let c = ToolConfig::from_json(r##"{"stitch": {"background": "#12"}}"##).unwrap();
        assert!(matches!(c.stitch.to_layout(), Err(ToolError::Layout(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut c = ToolConfig::default();
        c.stitch.padding = 7;
        c.output.deflate = true;
        let text = c.to_json().unwrap();
        assert_eq!(ToolConfig::from_json(&text).unwrap(), c);
    }
}
