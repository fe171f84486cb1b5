//! JPEG encoding and atomic file output.
//!
//! Both pipelines end here: a `DynamicImage` becomes JPEG bytes in memory,
//! then the bytes are written to a temp file in the destination directory
//! and renamed over the destination. A run killed mid-write therefore leaves
//! either the old file or the new one, never a truncated image.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Encode `img` as a baseline JPEG at `quality` (1–100).
///
/// The JPEG encoder only accepts 8-bit grey or RGB, so any other layout is
/// converted to RGB first (alpha is dropped, not composited).
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img.write_with_encoder(encoder)?,
        other => DynamicImage::ImageRgb8(other.to_rgb8()).write_with_encoder(encoder)?,
    }
    debug!("Encoded {}x{} → {} bytes JPEG", img.width(), img.height(), buf.len());
    Ok(buf)
}

/// Write `bytes` to `path` via temp file + rename.
///
/// Parent directories are created when absent. When `path` already exists
/// its permissions are carried over to the replacement.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;

    if let Ok(existing) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), existing.permissions())?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
