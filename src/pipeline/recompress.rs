//! Recompression of a single thumbnail image.
//!
//! open → normalise colour → downscale to the width cap → JPEG at fixed
//! quality → atomic write. Every step maps its failure to a tagged
//! [`ItemError`] so the batch can record why an item was left unchanged.

use crate::error::ItemError;
use crate::pipeline::encode::{encode_jpeg, write_atomic};
use crate::report::CompressedFile;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Convert to a layout the JPEG encoder accepts.
///
/// 8-bit grey and 8-bit RGB pass through. Alpha, palette-expanded, 16-bit
/// and float images become plain RGB; alpha is discarded, not blended
/// against a background.
pub fn normalize_color(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Target dimensions for a `width`×`height` image under `max_width`.
///
/// Images at or under the cap keep their size; wider images are scaled to
/// exactly `max_width` with the height rounded to the nearest pixel (at
/// least 1).
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let h = (f64::from(height) * f64::from(max_width) / f64::from(width)).round() as u32;
    (max_width, h.max(1))
}

/// Downscale `img` with Lanczos3 when it is wider than `max_width`.
pub fn downscale(img: DynamicImage, max_width: u32) -> DynamicImage {
    let (w, h) = scaled_dimensions(img.width(), img.height(), max_width);
    if (w, h) == (img.width(), img.height()) {
        return img;
    }
    img.resize_exact(w, h, FilterType::Lanczos3)
}

/// Percentage by which `after` is smaller than `before`; 0 when `before` is 0.
pub fn reduction_percent(before: u64, after: u64) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (before as f64 - after as f64) / before as f64 * 100.0
}

/// Recompress `source` and write the JPEG bytes to `destination`.
///
/// `destination` may equal `source` (in-place mode). The format is sniffed
/// from the file contents, so a `.png` that already holds JPEG bytes from an
/// earlier run decodes fine.
pub fn recompress_image(
    source: &Path,
    destination: &Path,
    max_width: u32,
    quality: u8,
) -> Result<CompressedFile, ItemError> {
    let before = fs::metadata(source)
        .map_err(|e| ItemError::Read {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?
        .len();

    let img = ImageReader::open(source)
        .map_err(|e| ItemError::Read {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?
        .with_guessed_format()
        .map_err(|e| ItemError::Read {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?
        .decode()
        .map_err(|e| ItemError::Decode {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?;

    let (orig_w, orig_h) = (img.width(), img.height());
    let img = downscale(normalize_color(img), max_width);
    debug!(
        "{}: {}x{} → {}x{}",
        source.display(),
        orig_w,
        orig_h,
        img.width(),
        img.height()
    );

    let bytes = encode_jpeg(&img, quality).map_err(|e| ItemError::Encode {
        path: source.to_path_buf(),
        detail: e.to_string(),
    })?;

    write_atomic(destination, &bytes).map_err(|e| ItemError::Write {
        path: destination.to_path_buf(),
        detail: e.to_string(),
    })?;

    Ok(CompressedFile {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        before_bytes: before,
        after_bytes: bytes.len() as u64,
        width: img.width(),
        height: img.height(),
    })
}
