//! CLI binary: render page 1 of each portfolio PDF to a JPEG thumbnail.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ThumbnailConfig`, binds pdfium, and prints results plus the
//! source → thumbnail mapping dump.

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use common::{init_tracing, CliProgress};
use portfolio_thumbs::{
    generate_thumbnails_with_pdfium, load_manifest, BatchProgressCallback, MappingRules,
    ThumbnailConfig,
};
use std::path::PathBuf;
use std::sync::Arc;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render the built-in PDF list at 150 DPI
  generate-thumbnails

  # Sharper thumbnails
  generate-thumbnails --dpi 200

  # Custom PDF list and grouping rules
  generate-thumbnails --manifest pdfs.txt --rules rules.json

PATH MAPPING:
  Baumit/Group FD/X.pdf              → Baumit/thumbnails/X.jpg
  MFG - Projects/MFG - Glyne Gap/Y.pdf → MFG - Projects/MFG - Glyne Gap/thumbnails/Y.jpg
  CV.pdf                             → thumbnails/CV.jpg

  Grouping roots (default: "MFG - Projects", "Oxford LT", "Oxford XL") keep
  two folder levels. A rules file overrides them:
    {"default_depth": 1, "grouping_roots": {"MFG - Projects": 2}}

MANIFEST:
  One PDF path per line, relative to the root. Blank lines and lines
  starting with # are ignored.

ENVIRONMENT VARIABLES:
  THUMBS_ROOT      Project root (default: Projects)
  PDFIUM_LIB_PATH  Path to an existing libpdfium
  RUST_LOG         Override the log filter (e.g. portfolio_thumbs=debug)
"#;

/// Render the first page of each portfolio PDF to a JPEG thumbnail.
#[derive(Parser, Debug)]
#[command(
    name = "generate-thumbnails",
    version,
    about = "Render the first page of each portfolio PDF to a JPEG thumbnail",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Project root; PDFs and thumbnails are relative to it.
    #[arg(long, env = "THUMBS_ROOT", default_value = "Projects")]
    root: PathBuf,

    /// Rendering DPI (72–400).
    #[arg(long, env = "THUMBS_DPI", default_value_t = 150,
          value_parser = clap::value_parser!(u32).range(72..=400))]
    dpi: u32,

    /// File listing the PDFs to render, one per line [default: built-in list].
    #[arg(long, env = "THUMBS_MANIFEST")]
    manifest: Option<PathBuf>,

    /// JSON file with grouping-root rules [default: built-in rules].
    #[arg(long, env = "THUMBS_RULES")]
    rules: Option<PathBuf>,

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

    let progress = CliProgress::new(show_progress, cli.quiet || cli.json, "PDFs");
    let config = build_config(&cli, progress)?;

    if !cli.quiet && !cli.json {
        println!("Generating PDF thumbnails...");
        println!("{}", "=".repeat(50));
    }

    let summary = generate_thumbnails_with_pdfium(&config).context("Thumbnail generation failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        println!("{summary}");
        println!("\n");
        print!("{}", summary.mapping_dump());
    }

    Ok(())
}

/// Map CLI args to `ThumbnailConfig`.
fn build_config(cli: &Cli, progress: Arc<CliProgress>) -> Result<ThumbnailConfig> {
    let mut builder = ThumbnailConfig::builder(&cli.root)
        .dpi(cli.dpi)
        .progress_callback(progress as Arc<dyn BatchProgressCallback>);

    if let Some(ref path) = cli.manifest {
        let sources = load_manifest(path).context("Failed to load PDF manifest")?;
        builder = builder.sources(sources);
    }

    if let Some(ref path) = cli.rules {
        let rules = MappingRules::from_file(path).context("Failed to load mapping rules")?;
        builder = builder.rules(rules);
    }

    builder.build().context("Invalid configuration")
}
