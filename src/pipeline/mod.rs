//! Pipeline stages shared by the two batch jobs.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own and the PDF renderer can be swapped without touching the rest.
//!
//! ## Data Flow
//!
//! ```text
//! images: discover ──▶ recompress ──▶ encode
//!         (walkdir)    (normalise,    (JPEG, atomic write)
//!                       downscale)
//!
//! PDFs:   mapping ──▶ rasterize ──▶ encode
//!         (rules)     (pdfium)      (JPEG, atomic write)
//! ```
//!
//! 1. [`discover`]   — find images inside thumbnail directories
//! 2. [`mapping`]    — derive a thumbnail path from a PDF path
//! 3. [`recompress`] — colour normalisation and width cap for one image
//! 4. [`rasterize`]  — render page 1 of a PDF behind [`rasterize::PdfRasterizer`]
//! 5. [`encode`]     — JPEG-encode and write through a temp file

pub mod discover;
pub mod encode;
pub mod mapping;
pub mod rasterize;
pub mod recompress;
