//! Run results: per-item outcomes and the aggregate summaries.
//!
//! Each summary is created fresh for a run, updated once per item in order,
//! and handed back to the caller. The `Display` impls produce the console
//! text; `Serialize` backs the binaries' `--json` output.

use crate::error::ItemError;
use crate::pipeline::recompress::reduction_percent;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;
const RULE_WIDTH: usize = 50;

/// One successfully recompressed image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub before_bytes: u64,
    pub after_bytes: u64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl CompressedFile {
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.before_bytes, self.after_bytes)
    }

    fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

impl fmt::Display for CompressedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compressed: {} - {}KB -> {}KB ({:.1}% reduction)",
            self.file_name(),
            self.before_bytes / KB,
            self.after_bytes / KB,
            self.reduction_percent()
        )
    }
}

/// One successfully rendered PDF thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedThumbnail {
    /// Source PDF, relative to the project root.
    pub source: String,
    /// Thumbnail, relative to the project root.
    pub destination: String,
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for RenderedThumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Created: {}", self.destination)
    }
}

/// A source that failed, with the tagged reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub source: String,
    pub error: ItemError,
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error processing {}: {}", self.source, self.error)
    }
}

// ── Image compressor ─────────────────────────────────────────────────────

/// Aggregate result of an image-compression run.
///
/// Failed files count toward both totals with their original size, so the
/// overall reduction only reflects files that were actually rewritten.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompressionSummary {
    pub compressed: Vec<CompressedFile>,
    pub failures: Vec<ItemFailure>,
    pub total_before_bytes: u64,
    pub total_after_bytes: u64,
}

impl CompressionSummary {
    pub fn record_success(&mut self, file: CompressedFile) {
        self.total_before_bytes += file.before_bytes;
        self.total_after_bytes += file.after_bytes;
        self.compressed.push(file);
    }

    /// Record a failure; `original_bytes` is counted as unchanged.
    pub fn record_failure(&mut self, source: String, original_bytes: u64, error: ItemError) {
        self.total_before_bytes += original_bytes;
        self.total_after_bytes += original_bytes;
        self.failures.push(ItemFailure { source, error });
    }

    pub fn files_compressed(&self) -> usize {
        self.compressed.len()
    }

    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.total_before_bytes, self.total_after_bytes)
    }
}

impl fmt::Display for CompressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Total files compressed: {}", self.files_compressed())?;
        if !self.failures.is_empty() {
            writeln!(f, "Total files failed: {}", self.files_failed())?;
        }
        writeln!(
            f,
            "Total size before: {} KB ({} MB)",
            self.total_before_bytes / KB,
            self.total_before_bytes / MB
        )?;
        writeln!(
            f,
            "Total size after: {} KB ({} MB)",
            self.total_after_bytes / KB,
            self.total_after_bytes / MB
        )?;
        write!(f, "Total reduction: {:.1}%", self.reduction_percent())
    }
}

// ── Thumbnail generator ──────────────────────────────────────────────────

/// Aggregate result of a PDF-thumbnail run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThumbnailSummary {
    pub rendered: Vec<RenderedThumbnail>,
    pub failures: Vec<ItemFailure>,
    /// Every `(source, mapped destination)` pair in input order, whether or
    /// not the render succeeded.
    pub mappings: Vec<(String, String)>,
}

impl ThumbnailSummary {
    pub fn success_count(&self) -> usize {
        self.rendered.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// The `'<source>' => '<destination>'` dump used to cross-check a
    /// consumer that hard-codes the same mapping.
    pub fn mapping_dump(&self) -> String {
        let mut out = String::new();
        out.push_str("Thumbnail mapping:\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        for (source, destination) in &self.mappings {
            out.push_str(&format!("'{source}' => '{destination}'\n"));
        }
        out
    }
}

impl fmt::Display for ThumbnailSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        write!(
            f,
            "Complete! Success: {}, Failed: {}",
            self.success_count(),
            self.failure_count()
        )
    }
}
