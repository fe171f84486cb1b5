//! Image-compression batch entry point.
//!
//! Discover every thumbnail image under the root, then recompress them one
//! at a time. A failing image is recorded and counted at its original size;
//! only a missing root stops the run.

use crate::config::CompressConfig;
use crate::error::ThumbsError;
use crate::pipeline::{discover, recompress};
use crate::report::CompressionSummary;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Recompress every thumbnail image under `config.root`.
///
/// # Errors
/// Returns `Err(ThumbsError)` only when the root is missing. Per-image
/// failures are recorded in [`CompressionSummary::failures`].
pub fn compress_thumbnails(config: &CompressConfig) -> Result<CompressionSummary, ThumbsError> {
    let start = Instant::now();
    info!("Compressing thumbnails under {}", config.root.display());

    let images = discover::find_thumbnail_images(&config.root, config.dir_match)?;
    let total = images.len();
    info!("Found {} thumbnail images", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut summary = CompressionSummary::default();

    for (i, source) in images.iter().enumerate() {
        let item = i + 1;
        let label = display_name(source);
        if let Some(ref cb) = config.progress_callback {
            cb.on_item_start(item, total, &label);
        }

        let destination = config.output.destination(&config.root, source);
        match recompress::recompress_image(source, &destination, config.max_width, config.quality)
        {
            Ok(file) => {
                debug!("{}", file);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_complete(item, total, &file.to_string());
                }
                summary.record_success(file);
            }
            Err(e) => {
                warn!("Error processing {}: {}", label, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_error(item, total, &format!("Error processing {label}: {e}"));
                }
                let original = original_size(source);
                summary.record_failure(label, original, e);
            }
        }
    }

    info!(
        "Compression complete: {}/{} files, {:.1}% reduction, {}ms",
        summary.files_compressed(),
        total,
        summary.reduction_percent(),
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, summary.files_compressed());
    }

    Ok(summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Size to count for a failed file: its on-disk size, or 0 when even the
/// metadata cannot be read.
fn original_size(source: &Path) -> u64 {
    fs::metadata(source).map(|m| m.len()).unwrap_or(0)
}
