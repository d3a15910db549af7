//! Batch output as a ZIP archive of PNG files
//!
//! Slices and free crops are delivered as one archive with one PNG per
//! bitmap, named `<prefix>_<n>.png` with `n` counting from 1 in emission
//! order.

use crate::png::write_png;
use crate::{IoError, IoResult};
use imagebox_core::Bitmap;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entry prefix for guide slices
pub const SLICE_PREFIX: &str = "slice";
/// Entry prefix for free-crop rectangles
pub const CROP_PREFIX: &str = "crop";

/// How archive entries are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveCompression {
    /// No compression; PNG payloads are already deflated
    #[default]
    Stored,
    /// Deflate each entry again
    Deflated,
}

impl From<ArchiveCompression> for CompressionMethod {
    fn from(c: ArchiveCompression) -> Self {
        match c {
            ArchiveCompression::Stored => CompressionMethod::Stored,
            ArchiveCompression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Name of the `index`-th (0-based) entry.
pub fn entry_name(prefix: &str, index: usize) -> String {
    format!("{}_{}.png", prefix, index + 1)
}

/// Write `bitmaps` into a ZIP archive on `writer`.
///
/// Returns the number of entries written.
pub fn write_png_archive<'a, W, I>(
    writer: W,
    prefix: &str,
    bitmaps: I,
    compression: ArchiveCompression,
) -> IoResult<usize>
where
    W: Write + Seek,
    I: IntoIterator<Item = &'a Bitmap>,
{
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(compression.into());

    let mut count = 0;
    let mut png = Vec::new();
    for (i, bitmap) in bitmaps.into_iter().enumerate() {
        png.clear();
        write_png(bitmap, &mut png)?;
        let name = entry_name(prefix, i);
        debug!(entry = %name, bytes = png.len(), "archive entry");
        zip.start_file(name, options)
            .map_err(|e| IoError::Archive(e.to_string()))?;
        zip.write_all(&png)?;
        count += 1;
    }
    if count == 0 {
        warn!(prefix, "writing empty archive");
    }
    zip.finish().map_err(|e| IoError::Archive(e.to_string()))?;
    Ok(count)
}

/// Build the archive in memory.
pub fn png_archive_mem<'a, I>(
    prefix: &str,
    bitmaps: I,
    compression: ArchiveCompression,
) -> IoResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Bitmap>,
{
    let mut cursor = Cursor::new(Vec::new());
    write_png_archive(&mut cursor, prefix, bitmaps, compression)?;
    Ok(cursor.into_inner())
}
