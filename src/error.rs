//! Error types for the chrome-pdf library.
//!
//! Every failure is fatal: a conversion either produces a complete PDF or
//! returns one [`ChromePdfError`]. There is no partial-success state and no
//! retry, so callers only need [`ChromePdfError::kind`] to decide what to
//! report.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the chrome-pdf library.
#[derive(Debug, Error)]
pub enum ChromePdfError {
    // ── Browser resolution ────────────────────────────────────────────────
    /// No Chromium layout is known for the running operating system.
    #[error(
        "Unsupported platform: {os}/{arch}\n\
Chromium builds are only known for linux, macos and windows.\n\
Pass an explicit browser path (--chromium / CHROMIUM_PATH) to override."
    )]
    UnsupportedPlatform { os: String, arch: String },

    /// The browser binary is missing, not executable, or refused to start.
    #[error(
        "Failed to launch Chromium at '{path}': {reason}\n\
Check that the binary exists and is executable, or set CHROMIUM_PATH."
    )]
    ProcessLaunch { path: PathBuf, reason: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// The temporary HTML document could not be created or written.
    #[error("Failed to write temporary HTML file: {source}")]
    TempFile {
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The browser could not load the temporary document.
    #[error("Navigation to '{url}' failed: {detail}")]
    NavigationFailed { url: String, detail: String },

    /// The browser reported an error from its print-to-PDF operation.
    #[error("Print to PDF failed: {detail}")]
    PrintFailed { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error category, one per failure mode a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedPlatform,
    ProcessLaunch,
    Io,
    Render,
    Config,
    Internal,
}

impl ChromePdfError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChromePdfError::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            ChromePdfError::ProcessLaunch { .. } => ErrorKind::ProcessLaunch,
            ChromePdfError::TempFile { .. } | ChromePdfError::OutputWriteFailed { .. } => {
                ErrorKind::Io
            }
            ChromePdfError::NavigationFailed { .. } | ChromePdfError::PrintFailed { .. } => {
                ErrorKind::Render
            }
            ChromePdfError::InvalidConfig(_) => ErrorKind::Config,
            ChromePdfError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<chromium_locate::LocateError> for ChromePdfError {
    fn from(e: chromium_locate::LocateError) -> Self {
        match e {
            chromium_locate::LocateError::UnsupportedPlatform { os, arch } => {
                ChromePdfError::UnsupportedPlatform { os, arch }
            }
        }
    }
}
