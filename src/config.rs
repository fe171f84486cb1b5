//! Configuration types for the two batch jobs.
//!
//! [`CompressConfig`] drives the image compressor and [`ThumbnailConfig`]
//! drives the PDF thumbnail generator. Both are built through a builder that
//! starts from the defaults the binaries use when run without flags, so
//! `CompressConfig::builder("Projects").build()` is a complete, valid run.
//!
//! Quality and width caps are constants, not knobs: every thumbnail on the
//! site is meant to share one size and one compression level.

use crate::error::ThumbsError;
use crate::manifest::default_sources;
use crate::pipeline::mapping::MappingRules;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Maximum output width of a recompressed thumbnail, in pixels.
pub const MAX_WIDTH: u32 = 400;

/// JPEG quality used by the image compressor.
pub const JPEG_QUALITY: u8 = 65;

/// JPEG quality used for rendered PDF pages.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 95;

/// Default rendering density for PDF thumbnails.
pub const DEFAULT_DPI: u32 = 150;

/// Accepted DPI range.
pub const DPI_RANGE: std::ops::RangeInclusive<u32> = 72..=400;

/// Which directories count as thumbnail directories during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirMatch {
    /// The image's parent directory is named exactly `thumbnails`. (default)
    #[default]
    Segment,
    /// The parent directory's path relative to the root contains
    /// `thumbnails` anywhere. Also catches `old-thumbnails/` and anything
    /// nested below a `thumbnails/` folder.
    Substring,
}

/// Where recompressed images are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputTarget {
    /// Write under this directory, mirroring each image's path relative to
    /// the root. Originals are left untouched.
    Mirror(PathBuf),
    /// Overwrite each original. Irreversible.
    InPlace,
}

impl OutputTarget {
    /// Destination for `source`, which must live under `root`.
    pub fn destination(&self, root: &Path, source: &Path) -> PathBuf {
        match self {
            OutputTarget::InPlace => source.to_path_buf(),
            OutputTarget::Mirror(dir) => {
                let relative = source.strip_prefix(root).unwrap_or(source);
                dir.join(relative)
            }
        }
    }
}

/// Default mirror directory: a `-compressed` sibling of the root.
///
/// `Projects` → `Projects-compressed`.
pub fn default_mirror_dir(root: &Path) -> Option<PathBuf> {
    let name = root.file_name()?;
    let mut sibling = name.to_os_string();
    sibling.push("-compressed");
    Some(root.with_file_name(sibling))
}

// ── Image compressor ─────────────────────────────────────────────────────

/// Configuration for an image-compression run.
#[derive(Clone)]
pub struct CompressConfig {
    /// Project root to walk.
    pub root: PathBuf,

    /// Thumbnail directory rule. Default: [`DirMatch::Segment`].
    pub dir_match: DirMatch,

    /// Output location. Default: mirror into [`default_mirror_dir`].
    pub output: OutputTarget,

    /// Width cap in pixels. Always [`MAX_WIDTH`] for the binaries.
    pub max_width: u32,

    /// JPEG quality. Always [`JPEG_QUALITY`] for the binaries.
    pub quality: u8,

    /// Optional per-item progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for CompressConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressConfig")
            .field("root", &self.root)
            .field("dir_match", &self.dir_match)
            .field("output", &self.output)
            .field("max_width", &self.max_width)
            .field("quality", &self.quality)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl CompressConfig {
    /// Create a new builder rooted at `root`.
    pub fn builder(root: impl Into<PathBuf>) -> CompressConfigBuilder {
        CompressConfigBuilder {
            root: root.into(),
            dir_match: DirMatch::default(),
            output: None,
            progress_callback: None,
        }
    }
}

/// Builder for [`CompressConfig`].
pub struct CompressConfigBuilder {
    root: PathBuf,
    dir_match: DirMatch,
    output: Option<OutputTarget>,
    progress_callback: Option<ProgressCallback>,
}

impl CompressConfigBuilder {
    pub fn dir_match(mut self, rule: DirMatch) -> Self {
        self.dir_match = rule;
        self
    }

    pub fn output(mut self, target: OutputTarget) -> Self {
        self.output = Some(target);
        self
    }

    pub fn in_place(self) -> Self {
        self.output(OutputTarget::InPlace)
    }

    pub fn mirror_to(self, dir: impl Into<PathBuf>) -> Self {
        self.output(OutputTarget::Mirror(dir.into()))
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<CompressConfig, ThumbsError> {
        let output = match self.output {
            Some(target) => target,
            None => OutputTarget::Mirror(default_mirror_dir(&self.root).ok_or_else(|| {
                ThumbsError::InvalidConfig(format!(
                    "cannot derive an output directory from root '{}'; choose one or run in place",
                    self.root.display()
                ))
            })?),
        };

        if let OutputTarget::Mirror(ref dir) = output {
            if normalize_path(dir).starts_with(normalize_path(&self.root)) {
                return Err(ThumbsError::InvalidConfig(format!(
                    "output directory '{}' must not be inside the root '{}'",
                    dir.display(),
                    self.root.display()
                )));
            }
        }

        Ok(CompressConfig {
            root: self.root,
            dir_match: self.dir_match,
            output,
            max_width: MAX_WIDTH,
            quality: JPEG_QUALITY,
            progress_callback: self.progress_callback,
        })
    }
}

/// Absolute, lexically normalised form of `path` for containment checks.
///
/// `.` segments are dropped and `..` pops the previous segment, so
/// `./Projects/out` and `Projects/x/../out` both compare as inside
/// `<cwd>/Projects`. Symlinks are not resolved.
fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

// ── Thumbnail generator ──────────────────────────────────────────────────

/// Configuration for a PDF-thumbnail run.
#[derive(Clone)]
pub struct ThumbnailConfig {
    /// Project root; sources and thumbnails are relative to it.
    pub root: PathBuf,

    /// Rendering DPI. Range: 72–400. Default: 150.
    pub dpi: u32,

    /// JPEG quality of the written thumbnail. Always [`THUMBNAIL_JPEG_QUALITY`].
    pub jpeg_quality: u8,

    /// Folder-depth rules for the path mapper. Default: [`MappingRules::default`].
    pub rules: MappingRules,

    /// Ordered PDF paths relative to `root`. Default: the built-in list.
    pub sources: Vec<String>,

    /// Optional per-item progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ThumbnailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailConfig")
            .field("root", &self.root)
            .field("dpi", &self.dpi)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("rules", &self.rules)
            .field("sources", &self.sources.len())
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl ThumbnailConfig {
    /// Create a new builder rooted at `root`.
    pub fn builder(root: impl Into<PathBuf>) -> ThumbnailConfigBuilder {
        ThumbnailConfigBuilder {
            config: ThumbnailConfig {
                root: root.into(),
                dpi: DEFAULT_DPI,
                jpeg_quality: THUMBNAIL_JPEG_QUALITY,
                rules: MappingRules::default(),
                sources: default_sources(),
                progress_callback: None,
            },
        }
    }

    /// Absolute (root-joined) path of a source PDF.
    pub fn source_path(&self, source: &str) -> PathBuf {
        self.root.join(source)
    }
}

/// Builder for [`ThumbnailConfig`].
pub struct ThumbnailConfigBuilder {
    config: ThumbnailConfig,
}

impl ThumbnailConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn rules(mut self, rules: MappingRules) -> Self {
        self.config.rules = rules;
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ThumbnailConfig, ThumbsError> {
        let c = &self.config;
        if !DPI_RANGE.contains(&c.dpi) {
            return Err(ThumbsError::InvalidConfig(format!(
                "DPI must be 72–400, got {}",
                c.dpi
            )));
        }
        Ok(self.config)
    }
}
