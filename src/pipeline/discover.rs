//! Discovery: find the thumbnail images under the project root.
//!
//! The walk is sorted by file name so runs are reproducible. Unreadable
//! directory entries are logged and skipped; only a missing root is fatal.

use crate::config::DirMatch;
use crate::error::ThumbsError;
use crate::pipeline::mapping::THUMBNAILS_DIR;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions (lower-case) the compressor accepts.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Check an extension against [`IMAGE_EXTENSIONS`], ignoring case.
pub fn is_image_extension(extension: &str) -> bool {
    let ext = extension.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Does the directory `dir` (relative to the root) hold thumbnails?
pub fn is_thumbnail_dir(dir: &Path, rule: DirMatch) -> bool {
    match rule {
        DirMatch::Segment => dir
            .file_name()
            .is_some_and(|name| name == THUMBNAILS_DIR),
        DirMatch::Substring => dir.to_string_lossy().contains(THUMBNAILS_DIR),
    }
}

/// Verify `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<(), ThumbsError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(ThumbsError::ProjectRootNotFound {
            path: root.to_path_buf(),
        })
    }
}

/// Collect every image under `root` whose parent directory matches `rule`.
///
/// Returned paths are absolute-or-root-joined (as produced by the walk), in
/// sorted walk order.
pub fn find_thumbnail_images(root: &Path, rule: DirMatch) -> Result<Vec<PathBuf>, ThumbsError> {
    check_root(root)?;

    let mut images = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let is_image = path
            .extension()
            .is_some_and(|ext| is_image_extension(&ext.to_string_lossy()));
        if !is_image {
            continue;
        }

        let parent = path.parent().unwrap_or(root);
        let relative_dir = parent.strip_prefix(root).unwrap_or(parent);
        if is_thumbnail_dir(relative_dir, rule) {
            images.push(path.to_path_buf());
        }
    }

    debug!("Discovered {} thumbnail images under {}", images.len(), root.display());
    Ok(images)
}
