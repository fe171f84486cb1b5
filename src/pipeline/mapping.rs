//! Path mapping: derive a thumbnail's relative path from a PDF's relative path.
//!
//! Thumbnails for a project live in a `thumbnails/` folder at the project's
//! top level. Most projects are a single folder under the root, but some
//! root folders group several projects (`MFG - Projects/MFG - Glyne Gap/…`),
//! so their thumbnails sit one level deeper. [`MappingRules`] records that as
//! data: a root folder name maps to how many leading folders are kept.
//!
//! ```text
//! Baumit/Group FD/BFY-FD-A1B119-0.pdf        → Baumit/thumbnails/BFY-FD-A1B119-0.jpg
//! Oxford LT/Castle View/725014-….pdf         → Oxford LT/Castle View/thumbnails/725014-….jpg
//! Modern Professional CV Resume.pdf          → thumbnails/Modern Professional CV Resume.jpg
//! ```
//!
//! Mapping is a pure function of the path string. File contents are never
//! consulted.

use crate::error::ThumbsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Name of the per-project thumbnail folder.
pub const THUMBNAILS_DIR: &str = "thumbnails";

/// Extension given to every mapped thumbnail.
pub const THUMBNAIL_EXTENSION: &str = "jpg";

/// Root folders that group several projects in the built-in rule table.
pub const DEFAULT_GROUPING_ROOTS: [&str; 3] = ["MFG - Projects", "Oxford LT", "Oxford XL"];

/// Declarative folder-depth rules for the path mapper.
///
/// Loadable from JSON:
///
/// ```json
/// {
///   "default_depth": 1,
///   "grouping_roots": { "MFG - Projects": 2, "Oxford LT": 2, "Oxford XL": 2 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRules {
    /// Leading folders kept for a root folder with no explicit rule. Default: 1.
    #[serde(default = "default_depth")]
    pub default_depth: usize,

    /// Root folder name → leading folders kept.
    #[serde(default)]
    pub grouping_roots: BTreeMap<String, usize>,
}

fn default_depth() -> usize {
    1
}

impl Default for MappingRules {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
            grouping_roots: DEFAULT_GROUPING_ROOTS
                .iter()
                .map(|root| (root.to_string(), 2))
                .collect(),
        }
    }
}

impl MappingRules {
    /// A rule table with no grouping roots: every project is one folder deep.
    pub fn flat() -> Self {
        Self {
            default_depth: default_depth(),
            grouping_roots: BTreeMap::new(),
        }
    }

    /// Add or replace a grouping root.
    pub fn with_grouping_root(mut self, root: impl Into<String>, depth: usize) -> Self {
        self.grouping_roots.insert(root.into(), depth);
        self
    }

    /// Parse a rule table from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a rule table from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ThumbsError> {
        let text = std::fs::read_to_string(path).map_err(|e| ThumbsError::RulesRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&text).map_err(|e| ThumbsError::RulesParse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Leading folders kept for a source whose first folder is `first`.
    pub fn depth_for(&self, first: &str) -> usize {
        self.grouping_roots
            .get(first)
            .copied()
            .unwrap_or(self.default_depth)
    }

    /// The thumbnail directory for `source`, without a trailing separator.
    pub fn thumbnail_dir(&self, source: &str) -> String {
        let (folders, _) = split_source(source);
        let kept = match folders.first() {
            Some(first) => self.depth_for(first).min(folders.len()),
            None => 0,
        };

        let mut parts: Vec<&str> = folders[..kept].to_vec();
        parts.push(THUMBNAILS_DIR);
        parts.join("/")
    }

    /// Map a PDF's relative path to its thumbnail's relative path.
    ///
    /// Both paths are relative to the project root and use `/` separators.
    pub fn map(&self, source: &str) -> String {
        let (_, file_name) = split_source(source);
        let mapped = format!(
            "{}/{}",
            self.thumbnail_dir(source),
            thumbnail_file_name(file_name)
        );
        debug!("Mapped '{}' → '{}'", source, mapped);
        mapped
    }
}

/// Map `source` with the built-in rule table.
pub fn map_thumbnail_path(source: &str) -> String {
    MappingRules::default().map(source)
}

/// Split a relative path into its folder names and file name.
///
/// Both `/` and `\` count as separators; empty and `.` segments are ignored.
fn split_source(source: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = source
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let file_name = segments.pop().unwrap_or("");
    (segments, file_name)
}

/// Replace the extension of `file_name` with `.jpg`.
///
/// Leading dots do not start an extension (`.hidden` has none), matching the
/// usual stem/extension split.
fn thumbnail_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(i) if !file_name[..i].trim_start_matches('.').is_empty() => &file_name[..i],
        _ => file_name,
    };
    format!("{stem}.{THUMBNAIL_EXTENSION}")
}
