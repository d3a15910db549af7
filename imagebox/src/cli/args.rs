use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use imagebox::config::{AlignmentChoice, LayoutMode, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "imagebox",
    version,
    about = "Stitch, slice, crop and enhance images"
)]
pub struct CliArgs {
    /// JSON config file; command-line flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log geometry decisions (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Combine several images into one canvas
    Stitch(StitchArgs),
    /// Cut an image along guide lines into a ZIP of tiles
    Slice(SliceArgs),
    /// Cut drawn rectangles out of an image into a ZIP
    Crop(CropArgs),
    /// Upscale, sharpen and boost contrast and color
    Enhance(EnhanceArgs),
    /// Build a before/after split view
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
pub struct StitchArgs {
    /// Input images, in upload order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(long, value_enum)]
    pub mode: Option<LayoutMode>,

    /// Grid columns
    #[arg(long)]
    pub columns: Option<u32>,

    #[arg(long, value_enum)]
    pub alignment: Option<AlignmentChoice>,

    /// Gap between items in pixels
    #[arg(long)]
    pub padding: Option<u32>,

    /// Background color (#rgb, #rrggbb, rgb(r,g,b) or a name)
    #[arg(long)]
    pub background: Option<String>,

    /// 1-based position of each input, comma separated (e.g. 2,1,3)
    #[arg(long, value_delimiter = ',')]
    pub rank: Vec<u32>,

    /// Per-input scale factors, comma separated
    #[arg(long, value_delimiter = ',')]
    pub scale: Vec<f64>,

    /// Per-input clockwise rotation in degrees, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub rotate: Vec<i32>,

    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct SliceArgs {
    pub input: PathBuf,

    /// Output ZIP archive
    #[arg(short, long)]
    pub output: PathBuf,

    /// Vertical guide x coordinates (e.g. "100,200")
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub xs: String,

    /// Horizontal guide y coordinates
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ys: String,

    /// Also write a preview with the guides drawn in
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Preview zoom in percent (10-100)
    #[arg(long, default_value_t = 100)]
    pub zoom: u32,

    /// Deflate archive entries
    #[arg(long, default_value_t = false)]
    pub deflate: bool,
}

#[derive(Args, Debug)]
pub struct CropArgs {
    pub input: PathBuf,

    /// Output ZIP archive
    #[arg(short, long)]
    pub output: PathBuf,

    /// Rectangle as "left,top,width,height"; repeatable, kept in order
    #[arg(long = "rect", allow_hyphen_values = true)]
    pub rects: Vec<String>,

    /// Canvas JSON exported by a drawing tool
    #[arg(long)]
    pub canvas: Option<PathBuf>,

    /// Source pixels per drawing unit
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Deflate archive entries
    #[arg(long, default_value_t = false)]
    pub deflate: bool,
}

#[derive(Args, Debug)]
pub struct EnhanceArgs {
    pub input: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    /// Upscale factor; values up to 1 keep the size
    #[arg(long)]
    pub upscale: Option<f64>,

    #[arg(long)]
    pub sharpness: Option<f32>,

    #[arg(long)]
    pub contrast: Option<f32>,

    #[arg(long)]
    pub color: Option<f32>,

    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    pub original: PathBuf,
    pub enhanced: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    /// Display zoom in percent (10-100)
    #[arg(long, default_value_t = 50)]
    pub zoom: u32,

    /// Slider position as a fraction of the width
    #[arg(long, default_value_t = 0.5)]
    pub split: f64,

    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}
