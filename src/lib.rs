//! # chrome-pdf
//!
//! Convert HTML to PDF by driving a headless Chromium and calling its
//! built-in print-to-PDF.
//!
//! ## Why a real browser?
//!
//! Layout engines written for PDF generation support a subset of CSS. Chromium
//! already renders the HTML exactly as users see it in a browser, so this crate
//! only orchestrates it: the rendering, the DevTools protocol and the process
//! lifecycle all live in Chromium and the `headless_chrome` client.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTML
//!  │
//!  ├─ 1. Locate   per-platform Chromium path (chromium/<os>/…)
//!  ├─ 2. Launch   headless, no sandbox, GPU and software rasterizer off
//!  ├─ 3. Document HTML written to a unique temp .html file
//!  ├─ 4. Load     navigate to its file:// URL, wait for readiness
//!  ├─ 5. Print    US Letter (8.5 × 11 in), backgrounds on
//!  └─ 6. Output   bytes, file (atomic) or base64; temp file and process released
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrome_pdf::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Chromium is looked up under ./chromium/<platform>/ by default
//!     let config = ConversionConfig::default();
//!     let stats = convert_to_file("<h1>Invoice</h1>", "invoice.pdf", &config).await?;
//!     eprintln!("{} bytes in {}ms", stats.pdf_bytes, stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `chrome-pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! chrome-pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ReadinessCondition};
pub use convert::{convert, convert_sync, convert_to_base64, convert_to_file};
pub use error::{ChromePdfError, ErrorKind};
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::print::{PAPER_HEIGHT_IN, PAPER_WIDTH_IN};
