//! Progress-callback trait for per-item batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::CompressConfigBuilder::progress_callback`] or
//! [`crate::config::ThumbnailConfigBuilder::progress_callback`] to receive
//! events as each image or PDF is processed.
//!
//! The library never prints to stdout itself. The binaries implement this
//! trait to print the per-item console lines (above an `indicatif` bar);
//! library callers can forward events anywhere they like.
//!
//! # Example
//!
//! ```rust
//! use portfolio_thumbs::{BatchProgressCallback, CompressConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     failed: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for CountingCallback {
//!     fn on_item_error(&self, item: usize, total: usize, error: &str) {
//!         self.failed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("[{item}/{total}] {error}");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { failed: AtomicUsize::new(0) });
//!
//! let config = CompressConfig::builder("Projects")
//!     .progress_callback(counter as Arc<dyn BatchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by a batch as it processes each item.
///
/// Items are processed strictly one after another, but the trait is still
/// `Send + Sync` so a callback can be shared with a progress-bar ticker
/// thread. All methods have default no-op implementations.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before the first item, with the number of items.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called just before an item is processed.
    ///
    /// # Arguments
    /// * `item`  — 1-indexed position in the batch
    /// * `total` — number of items in the batch
    /// * `label` — display name of the source (file name or relative path)
    fn on_item_start(&self, item: usize, total: usize, label: &str) {
        let _ = (item, total, label);
    }

    /// Called when an item succeeds, with its human-readable report line.
    fn on_item_complete(&self, item: usize, total: usize, line: &str) {
        let _ = (item, total, line);
    }

    /// Called when an item fails, with a human-readable error description.
    fn on_item_error(&self, item: usize, total: usize, error: &str) {
        let _ = (item, total, error);
    }

    /// Called once after every item has been attempted.
    fn on_batch_complete(&self, total: usize, success_count: usize) {
        let _ = (total, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in the batch configs.
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
