//! PDF rasterisation: render the first page of a PDF via pdfium.
//!
//! The renderer sits behind [`PdfRasterizer`] so the batch logic (mapping,
//! failure counting, reporting) can be exercised without a pdfium library.
//!
//! ## Scale, not target size
//!
//! Thumbnails are rendered at a physical density: a page of `w × h` points
//! becomes `w × dpi/72 × h × dpi/72` pixels. 72 is the number of PDF points
//! per inch.

use crate::error::{ItemError, ThumbsError};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// PDF points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Scale factor that renders a page at `dpi`.
pub fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / POINTS_PER_INCH
}

/// Renders the first page of a PDF into an image.
pub trait PdfRasterizer {
    /// Rasterise page index 0 of `pdf_path` at `dpi`.
    ///
    /// A document with no pages must yield [`ItemError::EmptyDocument`].
    fn render_first_page(&self, pdf_path: &Path, dpi: u32) -> Result<DynamicImage, ItemError>;
}

/// Bind to a pdfium library.
///
/// Resolution order (first match wins):
///
/// 1. `PDFIUM_LIB_PATH` — an explicit library file.
/// 2. The platform library name in the working directory.
/// 3. The system library search path.
pub fn bind_pdfium() -> Result<Pdfium, ThumbsError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => {
            debug!("Binding pdfium from PDFIUM_LIB_PATH={}", path);
            Pdfium::bind_to_library(path)
        }
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ThumbsError::PdfiumBindingFailed(format!("{:?}", e)))?;

    info!("pdfium library bound");
    Ok(Pdfium::new(bindings))
}

/// [`PdfRasterizer`] backed by a bound pdfium instance.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Wrap an already bound pdfium instance.
    pub fn new(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }

    /// Bind pdfium with [`bind_pdfium`] and wrap it.
    pub fn bind() -> Result<Self, ThumbsError> {
        bind_pdfium().map(Self::new)
    }
}

impl PdfRasterizer for PdfiumRasterizer {
    fn render_first_page(&self, pdf_path: &Path, dpi: u32) -> Result<DynamicImage, ItemError> {
        // pdfium reports a missing file as a generic load failure; check first
        // so it is tagged as a read error.
        if !pdf_path.is_file() {
            return Err(ItemError::Read {
                path: pdf_path.to_path_buf(),
                detail: "file not found".into(),
            });
        }

        let document = self
            .pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| ItemError::Decode {
                path: pdf_path.to_path_buf(),
                detail: format!("{:?}", e),
            })?;

        let pages = document.pages();
        if pages.len() == 0 {
            return Err(ItemError::EmptyDocument {
                path: pdf_path.to_path_buf(),
            });
        }

        let page = pages.get(0).map_err(|e| ItemError::Render {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale_for_dpi(dpi));
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| ItemError::Render {
                path: pdf_path.to_path_buf(),
                detail: format!("{:?}", e),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered {} page 1 at {} DPI → {}x{} px",
            pdf_path.display(),
            dpi,
            image.width(),
            image.height()
        );
        Ok(image)
    }
}
