//! Terminal plumbing shared by both binaries: colours, the progress
//! callback, and tracing setup.

use indicatif::{ProgressBar, ProgressStyle};
use portfolio_thumbs::BatchProgressCallback;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

pub fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
pub fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
pub fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
pub fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
pub fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: [&str; 11] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

/// Install the stderr tracing subscriber.
///
/// Library INFO logs are suppressed while the progress bar is active; the
/// bar and the per-item lines carry everything the user needs.
pub fn init_tracing(verbose: bool, quiet: bool, show_progress: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Prints one line per item and, when enabled, keeps a progress bar pinned
/// below the lines.
pub struct CliProgress {
    bar: Option<ProgressBar>,
    quiet: bool,
    /// What the bar counts, e.g. "images" or "PDFs".
    noun: &'static str,
}

impl CliProgress {
    pub fn new(show_bar: bool, quiet: bool, noun: &'static str) -> Arc<Self> {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(0);
            let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&TICKS);
            bar.set_style(spinner_style);
            bar.set_prefix("Scanning");
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        Arc::new(Self { bar, quiet, noun })
    }

    /// Print a line above the bar, or plainly when there is no bar.
    fn emit(&self, plain: &str, decorated: impl FnOnce() -> String) {
        if self.quiet {
            return;
        }
        match self.bar {
            Some(ref bar) => bar.println(decorated()),
            None => println!("{plain}"),
        }
    }
}

impl BatchProgressCallback for CliProgress {
    fn on_batch_start(&self, total: usize) {
        if let Some(ref bar) = self.bar {
            let template = format!(
                "{{spinner:.cyan}} {{prefix:.bold}}  [{{bar:42.green/238}}] {{pos:>3}}/{{len}} {}  {{msg}}",
                self.noun
            );
            let style = ProgressStyle::with_template(&template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  ")
                .tick_strings(&TICKS);
            bar.set_length(total as u64);
            bar.set_style(style);
            bar.set_prefix("Processing");
            bar.reset_eta();
        }
    }

    fn on_item_start(&self, _item: usize, _total: usize, label: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(label.to_string());
        }
    }

    fn on_item_complete(&self, item: usize, total: usize, line: &str) {
        self.emit(line, || {
            format!("  {} {}  {}", green("✓"), dim(&format!("{item:>3}/{total:<3}")), line)
        });
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    fn on_item_error(&self, item: usize, total: usize, error: &str) {
        self.emit(error, || {
            format!("  {} {}  {}", red("✗"), dim(&format!("{item:>3}/{total:<3}")), red(error))
        });
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    fn on_batch_complete(&self, total: usize, success_count: usize) {
        let Some(ref bar) = self.bar else {
            return;
        };
        bar.finish_and_clear();
        if self.quiet {
            return;
        }
        let failed = total.saturating_sub(success_count);
        if failed == 0 {
            eprintln!("{} {} {} processed", green("✔"), bold(&success_count.to_string()), self.noun);
        } else {
            eprintln!(
                "{} {}/{} {} processed  ({} failed)",
                if failed == total { red("✘") } else { cyan("⚠") },
                bold(&success_count.to_string()),
                total,
                self.noun,
                red(&failed.to_string()),
            );
        }
    }
}
