//! CLI binary for chrome-pdf.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use chrome_pdf::{convert, convert_to_file, ConversionConfig, ReadinessCondition};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert an HTML string
  chrome-pdf '<h1>Hello</h1><p>World</p>' hello.pdf

  # Convert an HTML file
  chrome-pdf --file invoice.html invoice.pdf

  # Read HTML from stdin, print base64 PDF to stdout
  cat page.html | chrome-pdf --file - --base64

  # Skip the load event and sleep a fixed 500 ms before printing
  chrome-pdf --wait delay --settle-ms 500 page.html out.pdf --file

  # JSON stats
  chrome-pdf --json '<p>x</p>' out.pdf

CHROMIUM LAYOUT:
  The browser is looked up relative to the current directory, the
  executable's directory, then the per-user data dir:
    linux    chromium/linux/chrome-linux/chrome
    macos    chromium/macos/chrome-mac/Chromium.app/Contents/MacOS/Chromium
    windows  chromium/windows/chrome-win/chrome.exe

ENVIRONMENT VARIABLES:
  CHROMIUM_PATH           Existing Chromium executable (used when it exists)
  CHROMIUM_ROOT           Directory containing the chromium/ tree
  CHROME_PDF_WAIT         Readiness condition: load | delay
  CHROME_PDF_SETTLE_MS    Milliseconds to wait before printing
  CHROME_PDF_TEMP_DIR     Directory for the temporary HTML file
  CHROME_PDF_NO_PROGRESS  Disable the spinner
  CHROME_PDF_VERBOSE      Enable debug logs
  CHROME_PDF_QUIET        Suppress all output except errors
  RUST_LOG                Override log filter (e.g. chrome_pdf=debug)

  CHROMIUM_PATH and CHROMIUM_ROOT are read by the browser lookup, after
  --chromium and --chromium-root. A CHROMIUM_PATH that does not exist is
  skipped with a warning.
"#;

/// Convert HTML to PDF with a bundled headless Chromium.
#[derive(Parser, Debug)]
#[command(
    name = "chrome-pdf",
    version,
    about = "Convert HTML to PDF with a bundled headless Chromium",
    long_about = "Render HTML in a headless Chromium and save the browser's print-to-PDF \
output (US Letter, backgrounds included) to a file, or print it as base64.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// HTML content to convert (a file path with --file, "-" for stdin).
    html: Option<String>,

    /// Write the PDF to this file.
    output: Option<PathBuf>,

    /// Print the PDF as base64 on stdout instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    base64: bool,

    /// Treat the HTML argument as a path to read the markup from.
    #[arg(long)]
    file: bool,

    /// Chromium executable to launch, bypassing the platform lookup.
    /// Without it, CHROMIUM_PATH is consulted when that file exists.
    #[arg(long)]
    chromium: Option<PathBuf>,

    /// Directory containing the chromium/<platform>/ tree (default: CHROMIUM_ROOT).
    #[arg(long)]
    chromium_root: Option<PathBuf>,

    /// Readiness condition before printing: load event + settle, or a fixed delay.
    #[arg(long, env = "CHROME_PDF_WAIT", value_enum, default_value = "load")]
    wait: WaitArg,

    /// Milliseconds to wait before printing (0–60000).
    #[arg(long, env = "CHROME_PDF_SETTLE_MS", default_value_t = 2000,
          value_parser = clap::value_parser!(u64).range(0..=60_000))]
    settle_ms: u64,

    /// Directory for the temporary HTML file.
    #[arg(long, env = "CHROME_PDF_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// Output conversion stats as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "CHROME_PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CHROME_PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "CHROME_PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum WaitArg {
    Load,
    Delay,
}

/// Where the PDF goes.
enum Target<'a> {
    File(&'a Path),
    Base64,
}

impl Cli {
    /// The HTML argument and target, or None when too few arguments were given.
    fn request(&self) -> Option<(&str, Target<'_>)> {
        let html = self.html.as_deref()?;
        let target = match (&self.output, self.base64) {
            (Some(path), _) => Target::File(path),
            (None, true) => Target::Base64,
            (None, false) => return None,
        };
        Some((html, target))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some((html_arg, target)) = cli.request() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers user feedback; library INFO logs would tear it.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && matches!(target, Target::File(_));
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
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

    // Failures are reported, not signalled through the exit status.
    if let Err(e) = run(&cli, html_arg, target, show_progress).await {
        eprintln!("{}", failure_line(&e, io::stderr().is_terminal()));
    }
    Ok(())
}

/// The stderr report for a failed conversion. Plain text unless on a terminal.
fn failure_line(err: &anyhow::Error, styled: bool) -> String {
    let line = format!("Error generating PDF: {err:#}");
    if styled {
        format!("{} {line}", red("✘"))
    } else {
        line
    }
}

async fn run(cli: &Cli, html_arg: &str, target: Target<'_>, show_progress: bool) -> Result<()> {
    let html = load_html(html_arg, cli.file).await?;
    let config = build_config(cli)?;

    match target {
        Target::File(path) => {
            let spinner = show_progress.then(spinner);
            let result = convert_to_file(&html, path, &config).await;
            if let Some(bar) = spinner {
                bar.finish_and_clear();
            }
            let stats = result?;

            if cli.json {
                let json = serde_json::json!({ "output": path, "stats": stats });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).context("Failed to serialise stats")?
                );
            } else if !cli.quiet {
                println!("PDF successfully saved to {}", path.display());
                eprintln!(
                    "{}  {}",
                    green("✔"),
                    dim(&format!(
                        "{} bytes  launch {}ms  render {}ms  total {}ms",
                        stats.pdf_bytes,
                        stats.launch_duration_ms,
                        stats.render_duration_ms,
                        stats.total_duration_ms
                    )),
                );
            }
        }
        Target::Base64 => {
            let output = convert(&html, &config).await?;
            if cli.json {
                let json = serde_json::json!({
                    "base64": output.to_base64(),
                    "stats": output.stats,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).context("Failed to serialise output")?
                );
            } else {
                println!("{}", output.to_base64());
            }
        }
    }

    Ok(())
}

/// The HTML itself, or the contents of the file / stdin it names.
async fn load_html(arg: &str, from_file: bool) -> Result<String> {
    if !from_file {
        return Ok(arg.to_owned());
    }
    if arg == "-" {
        let mut html = String::new();
        tokio::io::stdin()
            .read_to_string(&mut html)
            .await
            .context("Failed to read HTML from stdin")?;
        return Ok(html);
    }
    tokio::fs::read_to_string(arg)
        .await
        .with_context(|| format!("Failed to read HTML from {arg:?}"))
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let readiness = match cli.wait {
        WaitArg::Load => ReadinessCondition::Load {
            settle_ms: cli.settle_ms,
        },
        WaitArg::Delay => ReadinessCondition::FixedDelay { ms: cli.settle_ms },
    };

    let mut builder = ConversionConfig::builder().readiness(readiness);
    if let Some(ref path) = cli.chromium {
        builder = builder.browser_path(path);
    }
    if let Some(ref root) = cli.chromium_root {
        builder = builder.browser_root(root);
    }
    if let Some(ref dir) = cli.temp_dir {
        builder = builder.temp_dir(dir);
    }

    builder.build().context("Invalid configuration")
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS),
    );
    bar.set_prefix("Rendering");
    bar.set_message("Chromium…");
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
