//! PDF-thumbnail batch entry points.
//!
//! For each source in order: map the destination, render page 1, encode as
//! JPEG, write. A failing PDF is recorded and the batch moves on; every
//! source still appears in the mapping dump.

use crate::config::ThumbnailConfig;
use crate::error::{ItemError, ThumbsError};
use crate::pipeline::encode::{encode_jpeg, write_atomic};
use crate::pipeline::rasterize::{PdfRasterizer, PdfiumRasterizer};
use crate::report::{ItemFailure, RenderedThumbnail, ThumbnailSummary};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Render thumbnails for every source in `config` using `rasterizer`.
///
/// Never fails: per-PDF errors land in [`ThumbnailSummary::failures`].
pub fn generate_thumbnails(
    config: &ThumbnailConfig,
    rasterizer: &dyn PdfRasterizer,
) -> ThumbnailSummary {
    let start = Instant::now();
    let total = config.sources.len();
    info!(
        "Generating {} PDF thumbnails at {} DPI under {}",
        total,
        config.dpi,
        config.root.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut summary = ThumbnailSummary::default();

    for (i, source) in config.sources.iter().enumerate() {
        let item = i + 1;
        let mapped = config.rules.map(source);
        summary.mappings.push((source.clone(), mapped.clone()));

        if let Some(ref cb) = config.progress_callback {
            cb.on_item_start(item, total, source);
        }

        match render_one(config, rasterizer, source, &mapped) {
            Ok(thumb) => {
                debug!("{} ({}x{})", thumb, thumb.width, thumb.height);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_complete(item, total, &thumb.to_string());
                }
                summary.rendered.push(thumb);
            }
            Err(error) => {
                let failure = ItemFailure {
                    source: source.clone(),
                    error,
                };
                warn!("{}", failure);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_error(item, total, &failure.to_string());
                }
                summary.failures.push(failure);
            }
        }
    }

    info!(
        "Thumbnail generation complete: {} succeeded, {} failed, {}ms",
        summary.success_count(),
        summary.failure_count(),
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, summary.success_count());
    }

    summary
}

/// Bind pdfium and render thumbnails for every source in `config`.
///
/// # Errors
/// Fatal only when the root is missing or pdfium cannot be bound.
pub fn generate_thumbnails_with_pdfium(
    config: &ThumbnailConfig,
) -> Result<ThumbnailSummary, ThumbsError> {
    if !config.root.is_dir() {
        return Err(ThumbsError::ProjectRootNotFound {
            path: config.root.clone(),
        });
    }
    let rasterizer = PdfiumRasterizer::bind()?;
    Ok(generate_thumbnails(config, &rasterizer))
}

fn render_one(
    config: &ThumbnailConfig,
    rasterizer: &dyn PdfRasterizer,
    source: &str,
    mapped: &str,
) -> Result<RenderedThumbnail, ItemError> {
    let pdf_path = config.source_path(source);
    let output_path = config.root.join(mapped);

    let image = rasterizer.render_first_page(&pdf_path, config.dpi)?;

    let bytes = encode_jpeg(&image, config.jpeg_quality).map_err(|e| ItemError::Encode {
        path: pdf_path.clone(),
        detail: e.to_string(),
    })?;

    write_atomic(&output_path, &bytes).map_err(|e| ItemError::Write {
        path: output_path.clone(),
        detail: e.to_string(),
    })?;

    Ok(RenderedThumbnail {
        source: source.to_string(),
        destination: mapped.to_string(),
        width: image.width(),
        height: image.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::BatchProgressCallback;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    /// Renders a fixed-size page for any `.pdf` that exists and is non-empty;
    /// zero-byte files count as empty documents.
    struct FakeRasterizer;

    impl PdfRasterizer for FakeRasterizer {
        fn render_first_page(&self, pdf_path: &Path, dpi: u32) -> Result<DynamicImage, ItemError> {
            let bytes = std::fs::read(pdf_path).map_err(|e| ItemError::Read {
                path: pdf_path.to_path_buf(),
                detail: e.to_string(),
            })?;
            if bytes.is_empty() {
                return Err(ItemError::EmptyDocument {
                    path: pdf_path.to_path_buf(),
                });
            }
            let side = dpi / 10;
            Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                side,
                side,
                Rgba([200, 200, 200, 255]),
            )))
        }
    }

    #[test]
    fn empty_document_is_tagged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("A/B")).unwrap();
        std::fs::write(dir.path().join("A/B/blank.pdf"), b"").unwrap();

        let config = ThumbnailConfig::builder(dir.path())
            .sources(["A/B/blank.pdf"])
            .build()
            .unwrap();
        let summary = generate_thumbnails(&config, &FakeRasterizer);

        assert_eq!(summary.success_count(), 0);
        assert_eq!(summary.failure_count(), 1);
        assert_eq!(summary.failures[0].error.kind(), "empty_document");
        assert!(!dir.path().join("A/thumbnails/blank.jpg").exists());
    }

    #[test]
    fn dpi_reaches_the_rasterizer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cv.pdf"), b"%PDF").unwrap();

        let config = ThumbnailConfig::builder(dir.path())
            .sources(["cv.pdf"])
            .dpi(300)
            .build()
            .unwrap();
        let summary = generate_thumbnails(&config, &FakeRasterizer);

        assert_eq!(summary.rendered[0].width, 30);
        let written = image::open(dir.path().join("thumbnails/cv.jpg")).unwrap();
        assert_eq!(written.width(), 30);
    }

    /// Records every callback as one line, in call order.
    #[derive(Default)]
    struct EventLog {
        events: Mutex<Vec<String>>,
    }

    impl EventLog {
        fn push(&self, event: String) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }

    impl BatchProgressCallback for EventLog {
        fn on_batch_start(&self, total: usize) {
            self.push(format!("batch_start {total}"));
        }
        fn on_item_start(&self, item: usize, total: usize, label: &str) {
            self.push(format!("start {item}/{total} {label}"));
        }
        fn on_item_complete(&self, item: usize, total: usize, line: &str) {
            self.push(format!("complete {item}/{total} {line}"));
        }
        fn on_item_error(&self, item: usize, total: usize, _error: &str) {
            self.push(format!("error {item}/{total}"));
        }
        fn on_batch_complete(&self, total: usize, success_count: usize) {
            self.push(format!("batch_complete {total} {success_count}"));
        }
    }

    #[test]
    fn progress_events_follow_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("c.pdf"), b"%PDF").unwrap();

        let log = Arc::new(EventLog::default());
        let config = ThumbnailConfig::builder(dir.path())
            .sources(["a.pdf", "missing.pdf", "c.pdf"])
            .progress_callback(log.clone() as Arc<dyn BatchProgressCallback>)
            .build()
            .unwrap();
        generate_thumbnails(&config, &FakeRasterizer);

        let events = log.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "batch_start 3",
                "start 1/3 a.pdf",
                "complete 1/3 Created: thumbnails/a.jpg",
                "start 2/3 missing.pdf",
                "error 2/3",
                "start 3/3 c.pdf",
                "complete 3/3 Created: thumbnails/c.jpg",
                "batch_complete 3 2",
            ]
        );
    }

    #[test]
    fn missing_root_is_fatal_before_binding() {
        let config = ThumbnailConfig::builder("/definitely/not/a/root")
            .build()
            .unwrap();
        let err = generate_thumbnails_with_pdfium(&config).unwrap_err();
        assert!(matches!(err, ThumbsError::ProjectRootNotFound { .. }));
    }
}
