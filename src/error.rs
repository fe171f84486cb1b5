//! Error types for the portfolio-thumbs library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ThumbsError`] — **Fatal**: the batch cannot start at all (project
//!   root missing, bad configuration, PDF engine not loadable). Returned as
//!   `Err(ThumbsError)` from [`crate::compress_thumbnails`] and
//!   [`crate::generate_thumbnails`].
//!
//! * [`ItemError`] — **Non-fatal**: one image or PDF failed (corrupt file,
//!   empty document, unwritable destination) but the rest of the batch is
//!   fine. Stored in the run summary next to the source path so callers can
//!   react per kind instead of only seeing "something went wrong".

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the portfolio-thumbs library.
///
/// Per-item failures use [`ItemError`] and are stored in
/// [`crate::report::ItemFailure`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ThumbsError {
    // ── Startup errors ────────────────────────────────────────────────────
    /// The project root directory does not exist or is not a directory.
    #[error("Project root not found: '{path}'\nPass --root or set THUMBS_ROOT.")]
    ProjectRootNotFound { path: PathBuf },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A PDF manifest file could not be read.
    #[error("Failed to read PDF manifest '{path}': {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mapping-rules file could not be read.
    #[error("Failed to read mapping rules '{path}': {source}")]
    RulesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mapping-rules file is not valid JSON or has the wrong shape.
    #[error("Mapping rules '{path}' are malformed: {detail}")]
    RulesParse { path: PathBuf, detail: String },

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Place libpdfium next to the working directory.\n\
  • Install pdfium system-wide.\n"
    )]
    PdfiumBindingFailed(String),
}

/// A non-fatal error for a single image or PDF.
///
/// The batch always continues after one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemError {
    /// The source is missing or cannot be read.
    #[error("cannot read '{path}': {detail}")]
    Read { path: PathBuf, detail: String },

    /// The source bytes are not a decodable image or PDF.
    #[error("cannot decode '{path}': {detail}")]
    Decode { path: PathBuf, detail: String },

    /// The PDF opened but has no pages.
    #[error("'{path}' has no pages")]
    EmptyDocument { path: PathBuf },

    /// pdfium failed to rasterise the first page.
    #[error("rasterisation failed for '{path}': {detail}")]
    Render { path: PathBuf, detail: String },

    /// JPEG encoding failed.
    #[error("JPEG encoding failed for '{path}': {detail}")]
    Encode { path: PathBuf, detail: String },

    /// The destination could not be created or written.
    #[error("cannot write '{path}': {detail}")]
    Write { path: PathBuf, detail: String },
}

impl ItemError {
    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ItemError::Read { .. } => "read",
            ItemError::Decode { .. } => "decode",
            ItemError::EmptyDocument { .. } => "empty_document",
            ItemError::Render { .. } => "render",
            ItemError::Encode { .. } => "encode",
            ItemError::Write { .. } => "write",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_root_display_mentions_path() {
        let e = ThumbsError::ProjectRootNotFound {
            path: PathBuf::from("/nowhere/Projects"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/nowhere/Projects"), "got: {msg}");
    }

    #[test]
    fn empty_document_display() {
        let e = ItemError::EmptyDocument {
            path: PathBuf::from("Baumit/blank.pdf"),
        };
        assert!(e.to_string().contains("Baumit/blank.pdf"));
        assert!(e.to_string().contains("no pages"));
    }

    #[test]
    fn item_error_kinds_are_distinct() {
        let p = PathBuf::from("x");
        let kinds = [
            ItemError::Read { path: p.clone(), detail: String::new() }.kind(),
            ItemError::Decode { path: p.clone(), detail: String::new() }.kind(),
            ItemError::EmptyDocument { path: p.clone() }.kind(),
            ItemError::Render { path: p.clone(), detail: String::new() }.kind(),
            ItemError::Encode { path: p.clone(), detail: String::new() }.kind(),
            ItemError::Write { path: p, detail: String::new() }.kind(),
        ];
        let mut sorted = kinds.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), kinds.len());
    }

    #[test]
    fn item_error_serialises_with_kind_tag() {
        let e = ItemError::Write {
            path: PathBuf::from("out/a.jpg"),
            detail: "disk full".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"kind\":\"write\""), "got: {json}");
    }
}
