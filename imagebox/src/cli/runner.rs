use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use imagebox::config::{OutputFormat, ToolConfig};
use imagebox::filter::{EnhanceParams, enhance};
use imagebox::io::archive::{ArchiveCompression, CROP_PREFIX, SLICE_PREFIX, write_png_archive};
use imagebox::io::{read_image, write_image};
use imagebox::layout::{
    GuideSet, Rectangle, StitchItem, crop_rectangles, order_by_rank, rectangles_from_canvas_json,
    render_guides, slice, stitch,
};
use imagebox::{Bitmap, ToolError, compare};

use super::args::{
    CliArgs, Command, CompareArgs, CropArgs, EnhanceArgs, SliceArgs, StitchArgs,
};
use super::errors::AppError;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load(path: &Path) -> Result<Bitmap, AppError> {
    let bmp = read_image(path).map_err(ToolError::from)?;
    debug!(path = %path.display(), width = bmp.width(), height = bmp.height(), "loaded");
    Ok(bmp)
}

fn save(bmp: &Bitmap, path: &Path, format: OutputFormat) -> Result<(), AppError> {
    write_image(bmp, path, format.image_format()).map_err(ToolError::from)?;
    info!(
        "Wrote {:?} ({}x{}, {:?})",
        path,
        bmp.width(),
        bmp.height(),
        format
    );
    Ok(())
}

fn save_archive<'a, I>(
    bitmaps: I,
    prefix: &str,
    path: &Path,
    compression: ArchiveCompression,
) -> Result<usize, AppError>
where
    I: IntoIterator<Item = &'a Bitmap>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let count =
        write_png_archive(&mut writer, prefix, bitmaps, compression).map_err(ToolError::from)?;
    writer.flush()?;
    info!("Wrote {} entries to {:?}", count, path);
    Ok(count)
}

/// Per-input list from the command line: empty means "default for all".
fn per_input<T: Copy>(values: &[T], n: usize, default: T, arg: &str) -> Result<Vec<T>, AppError> {
    match values.len() {
        0 => Ok(vec![default; n]),
        len if len == n => Ok(values.to_vec()),
        len => Err(AppError::CountMismatch {
            arg: arg.to_string(),
            given: len,
            expected: n,
        }),
    }
}

fn parse_rect(text: &str) -> Result<Rectangle, AppError> {
    let invalid = |reason: &str| AppError::InvalidArgument {
        arg: "--rect".to_string(),
        value: text.to_string(),
        reason: reason.to_string(),
    };
    let parts = text
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid("components must be numbers"))?;
    match parts[..] {
        [left, top, width, height] => Ok(Rectangle::new(left, top, width, height)),
        _ => Err(invalid("expected left,top,width,height")),
    }
}

fn run_stitch(args: StitchArgs, config: &ToolConfig) -> CliResult {
    let mut settings = config.stitch.clone();
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if let Some(columns) = args.columns {
        settings.columns = columns;
    }
    if let Some(alignment) = args.alignment {
        settings.alignment = alignment;
    }
    if let Some(padding) = args.padding {
        settings.padding = padding;
    }
    if let Some(background) = args.background {
        settings.background = background;
    }
    let layout = settings.to_layout()?;

    let n = args.inputs.len();
    let default_ranks: Vec<u32> = (1..=n as u32).collect();
    let ranks = if args.rank.is_empty() {
        default_ranks
    } else {
        per_input(&args.rank, n, 0, "--rank")?
    };
    let scales = per_input(&args.scale, n, 1.0, "--scale")?;
    let rotations = per_input(&args.rotate, n, 0, "--rotate")?;

    let mut ranked = Vec::with_capacity(n);
    for (i, path) in args.inputs.iter().enumerate() {
        let item = StitchItem::new(load(path)?)
            .with_scale(scales[i])
            .with_rotation(rotations[i]);
        ranked.push((item, ranks[i]));
    }
    let items = order_by_rank(ranked);

    info!("Stitching {} images ({:?})", items.len(), layout.mode);
    let out = stitch(&items, &layout).map_err(ToolError::from)?;
    save(&out, &args.output, args.format.unwrap_or(config.output.format))?;
    Ok(())
}

fn run_slice(args: SliceArgs, config: &ToolConfig) -> CliResult {
    let bmp = load(&args.input)?;
    let xs = GuideSet::parse_axis(&args.xs).map_err(ToolError::from)?;
    let ys = GuideSet::parse_axis(&args.ys).map_err(ToolError::from)?;
    let guides = GuideSet::from_axes(xs, ys);
    info!("Slicing along {}", guides);

    if let Some(preview) = &args.preview {
        let overlay = render_guides(&bmp, &guides, args.zoom).map_err(ToolError::from)?;
        save(&overlay, preview, OutputFormat::Png)?;
    }

    let tiles = slice(&bmp, &guides).map_err(ToolError::from)?;
    let compression = if args.deflate {
        ArchiveCompression::Deflated
    } else {
        config.output.compression()
    };
    save_archive(&tiles, SLICE_PREFIX, &args.output, compression)?;
    Ok(())
}

fn run_crop(args: CropArgs, config: &ToolConfig) -> CliResult {
    let mut rects = Vec::new();
    if let Some(canvas) = &args.canvas {
        let json = std::fs::read_to_string(canvas)?;
        let parsed = rectangles_from_canvas_json(&json, args.scale).map_err(ToolError::from)?;
        for e in &parsed.rejected {
            warn!("{}", e);
        }
        rects.extend(parsed.rectangles);
    }
    for text in &args.rects {
        rects.push(parse_rect(text)?.with_scale(args.scale));
    }
    if rects.is_empty() {
        return Err(AppError::MissingArgument {
            arg: "--rect or --canvas".to_string(),
        }
        .into());
    }

    let bmp = load(&args.input)?;
    let batch = crop_rectangles(&bmp, &rects).map_err(ToolError::from)?;
    if !batch.skipped.is_empty() {
        warn!(
            "Skipped {} of {} rectangles",
            batch.skipped.len(),
            rects.len()
        );
    }
    let compression = if args.deflate {
        ArchiveCompression::Deflated
    } else {
        config.output.compression()
    };
    save_archive(batch.bitmaps(), CROP_PREFIX, &args.output, compression)?;
    Ok(())
}

fn run_enhance(args: EnhanceArgs, config: &ToolConfig) -> CliResult {
    let mut params = EnhanceParams::from(config.enhance);
    if let Some(v) = args.upscale {
        params.upscale = v;
    }
    if let Some(v) = args.sharpness {
        params.sharpness = v;
    }
    if let Some(v) = args.contrast {
        params.contrast = v;
    }
    if let Some(v) = args.color {
        params.color = v;
    }

    let bmp = load(&args.input)?;
    info!("Enhancing with {:?}", params);
    let out = enhance(&bmp, &params).map_err(ToolError::from)?;
    save(&out, &args.output, args.format.unwrap_or(config.output.format))?;
    Ok(())
}

fn run_compare(args: CompareArgs, config: &ToolConfig) -> CliResult {
    let original = load(&args.original)?;
    let enhanced = load(&args.enhanced)?;
    let (before, after) = compare::comparison_pair(&original, &enhanced, args.zoom)?;
    let view = compare::split_view(&before, &after, args.split)?;
    save(&view, &args.output, args.format.unwrap_or(config.output.format))?;
    Ok(())
}

pub fn run(args: CliArgs) -> CliResult {
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => {
            info!("Using config {:?}", path);
            ToolConfig::load(path)?
        }
        None => ToolConfig::default(),
    };

    match args.command {
        Command::Stitch(a) => run_stitch(a, &config),
        Command::Slice(a) => run_slice(a, &config),
        Command::Crop(a) => run_crop(a, &config),
        Command::Enhance(a) => run_enhance(a, &config),
        Command::Compare(a) => run_compare(a, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rect() {
        let r = parse_rect(" 1, 2.5 ,3,4").unwrap();
        assert_eq!((r.left, r.top, r.width, r.height), (1.0, 2.5, 3.0, 4.0));
        assert!(matches!(
            parse_rect("1,2,3"),
            Err(AppError::InvalidArgument { .. })
        ));
        assert!(parse_rect("a,b,c,d").is_err());
    }

    #[test]
    fn test_per_input() {
        assert_eq!(per_input::<f64>(&[], 3, 1.0, "--scale").unwrap(), vec![1.0; 3]);
        assert_eq!(per_input(&[90, 0], 2, 0, "--rotate").unwrap(), vec![90, 0]);
        assert!(matches!(
            per_input(&[1.0], 2, 1.0, "--scale"),
            Err(AppError::CountMismatch { given: 1, expected: 2, .. })
        ));
    }
}
