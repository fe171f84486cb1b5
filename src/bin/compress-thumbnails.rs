//! CLI binary: recompress every image inside `thumbnails/` folders.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `CompressConfig` and prints the per-file lines and summary.

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use common::{init_tracing, CliProgress};
use portfolio_thumbs::{compress_thumbnails, BatchProgressCallback, CompressConfig, DirMatch};
use std::path::PathBuf;
use std::sync::Arc;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Recompress into Projects-compressed/ (originals untouched)
  compress-thumbnails

  # Overwrite the originals (irreversible)
  compress-thumbnails --in-place

  # Another tree, explicit output directory
  compress-thumbnails --root site/Projects --out-dir /tmp/thumbs

  # Legacy discovery: any directory whose path contains "thumbnails"
  compress-thumbnails --match-substring

BEHAVIOUR:
  Images wider than 400 px are scaled to 400 px wide (Lanczos3); narrower
  images keep their size. Every image is re-encoded as JPEG at quality 65.
  File names and extensions are kept, so a .png ends up holding JPEG bytes.

ENVIRONMENT VARIABLES:
  THUMBS_ROOT   Project root (default: Projects)
  RUST_LOG      Override the log filter (e.g. portfolio_thumbs=debug)
"#;

/// Recompress thumbnail images to a 400 px width cap at JPEG quality 65.
#[derive(Parser, Debug)]
#[command(
    name = "compress-thumbnails",
    version,
    about = "Recompress the images inside every thumbnails/ folder",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Project root to walk.
    #[arg(long, env = "THUMBS_ROOT", default_value = "Projects")]
    root: PathBuf,

    /// Overwrite originals instead of writing to an output directory.
    #[arg(long, env = "THUMBS_IN_PLACE", conflicts_with = "out_dir")]
    in_place: bool,

    /// Output directory mirroring the root [default: <root>-compressed].
    #[arg(short, long, env = "THUMBS_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Treat any directory whose path contains "thumbnails" as a thumbnail directory.
    #[arg(long, env = "THUMBS_MATCH_SUBSTRING")]
    match_substring: bool,

    /// Print the run summary as JSON instead of text.
    #[arg(long, env = "THUMBS_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "THUMBS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "THUMBS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "THUMBS_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    init_tracing(cli.verbose, cli.quiet, show_progress);

    let progress = CliProgress::new(show_progress, cli.quiet || cli.json, "images");
    let config = build_config(&cli, progress)?;

    let summary = compress_thumbnails(&config).context("Compression failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        println!();
        println!("{summary}");
    }

    Ok(())
}

/// Map CLI args to `CompressConfig`.
fn build_config(cli: &Cli, progress: Arc<CliProgress>) -> Result<CompressConfig> {
    let mut builder = CompressConfig::builder(&cli.root)
        .dir_match(if cli.match_substring {
            DirMatch::Substring
        } else {
            DirMatch::Segment
        })
        .progress_callback(progress as Arc<dyn BatchProgressCallback>);

    if cli.in_place {
        builder = builder.in_place();
    } else if let Some(ref dir) = cli.out_dir {
        builder = builder.mirror_to(dir);
    }

    builder.build().context("Invalid configuration")
}
