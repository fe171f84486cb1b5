//! # portfolio-thumbs
//!
//! Batch thumbnail tools for a portfolio `Projects/` tree.
//!
//! Two independent jobs share one library:
//!
//! * **Image compressor** ([`compress_thumbnails`]): finds every `.jpg`,
//!   `.jpeg` and `.png` inside `thumbnails/` folders, caps the width at
//!   400 px and re-encodes as JPEG at quality 65.
//! * **Thumbnail generator** ([`generate_thumbnails`]): renders page 1 of
//!   each listed PDF at a target DPI and saves it as JPEG at a path derived
//!   from the PDF's folder layout.
//!
//! Both jobs are strictly sequential. A bad item is recorded as an
//! [`ItemError`] in the run summary and never stops the batch.
//!
//! ## Pipeline Overview
//!
//! ```text
//! compress-thumbnails                     generate-thumbnails
//!  │                                       │
//!  ├─ 1. Discover  walk root               ├─ 1. Enumerate  PDF list / manifest
//!  ├─ 2. Decode    sniffed format          ├─ 2. Map        folder-depth rules
//!  ├─ 3. Normalise RGB / grey              ├─ 3. Render     pdfium, dpi / 72
//!  ├─ 4. Resize    width ≤ 400, Lanczos3   ├─ 4. Encode     JPEG
//!  ├─ 5. Encode    JPEG q65, atomic write  ├─ 5. Write      atomic, mkdir -p
//!  └─ 6. Report    sizes + reduction       └─ 6. Report     counts + mapping dump
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portfolio_thumbs::{compress_thumbnails, CompressConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Writes to Projects-compressed/ by default; `.in_place()` overwrites.
//!     let config = CompressConfig::builder("Projects").build()?;
//!     let summary = compress_thumbnails(&config)?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables both binaries (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod compress;
pub mod config;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod pipeline;
pub mod progress;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use compress::compress_thumbnails;
pub use config::{
    CompressConfig, CompressConfigBuilder, DirMatch, OutputTarget, ThumbnailConfig,
    ThumbnailConfigBuilder,
};
pub use error::{ItemError, ThumbsError};
pub use generate::{generate_thumbnails, generate_thumbnails_with_pdfium};
pub use manifest::{load_manifest, DEFAULT_PDFS};
pub use pipeline::mapping::{map_thumbnail_path, MappingRules};
pub use pipeline::rasterize::{PdfRasterizer, PdfiumRasterizer};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{CompressedFile, CompressionSummary, ItemFailure, RenderedThumbnail, ThumbnailSummary};
