//! Conversion results.

use crate::pipeline::encode;
use serde::{Deserialize, Serialize};

/// The PDF produced by one conversion, plus timing statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Raw PDF bytes exactly as printed by the browser.
    #[serde(skip)]
    pub pdf: Vec<u8>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Standard base64 text of the PDF.
    pub fn to_base64(&self) -> String {
        encode::encode_pdf(&self.pdf)
    }

    /// Whether the buffer starts with the `%PDF-` header.
    pub fn is_pdf(&self) -> bool {
        self.pdf.starts_with(b"%PDF-")
    }
}

/// Timings and sizes for a single conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Length of the input HTML in bytes.
    pub html_bytes: usize,
    /// Length of the produced PDF in bytes.
    pub pdf_bytes: usize,
    /// Browser start-up and tab creation.
    pub launch_duration_ms: u64,
    /// Navigation, readiness wait and printing.
    pub render_duration_ms: u64,
    /// Whole call, including output handling.
    pub total_duration_ms: u64,
    /// The Chromium executable that was launched.
    pub browser_path: String,
}
