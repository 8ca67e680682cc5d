//! One browser session from launch to printed bytes.
//!
//! ## Why spawn_blocking?
//!
//! The `headless_chrome` client is synchronous: every DevTools call blocks the
//! calling thread until Chromium answers, and the readiness wait is a plain
//! sleep. `tokio::task::spawn_blocking` moves the whole session onto the
//! blocking pool so Tokio worker threads never stall on subprocess I/O.
//!
//! ## Cleanup order
//!
//! The temporary document lives inside [`with_document`], so it is deleted on
//! every path before the browser process is killed.

use crate::config::ReadinessCondition;
use crate::error::ChromePdfError;
use crate::pipeline::browser::{self, BrowserSession};
use crate::pipeline::document::HtmlDocument;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

/// Everything the blocking render needs, owned so it can cross threads.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub html: String,
    pub browser_path: PathBuf,
    pub readiness: ReadinessCondition,
    pub temp_dir: Option<PathBuf>,
}

/// Printed bytes plus per-phase timings.
#[derive(Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub launch_duration_ms: u64,
    pub render_duration_ms: u64,
}

/// Launch, load, wait, print. Runs inside `spawn_blocking`.
pub async fn render_pdf(job: RenderJob) -> Result<RenderedPdf, ChromePdfError> {
    tokio::task::spawn_blocking(move || render_blocking(&job))
        .await
        .map_err(|e| ChromePdfError::Internal(format!("Render task panicked: {}", e)))?
}

/// Blocking implementation of a single conversion session.
fn render_blocking(job: &RenderJob) -> Result<RenderedPdf, ChromePdfError> {
    // ── Launch browser ───────────────────────────────────────────────────
    let launch_start = Instant::now();
    let session = browser::launch(&job.browser_path)?;
    let launch_duration_ms = launch_start.elapsed().as_millis() as u64;

    // ── Materialise HTML, navigate, wait, print ──────────────────────────
    let render_start = Instant::now();
    let bytes = with_document(&job.html, job.temp_dir.as_deref(), |url| {
        session.navigate(url)?;
        wait_until_ready(&session, url, job.readiness)?;
        session.print_to_pdf()
    })?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    info!(
        "Printed {} bytes of PDF in {}ms (launch {}ms, {})",
        bytes.len(),
        render_duration_ms,
        launch_duration_ms,
        session.path().display()
    );

    session.close();

    Ok(RenderedPdf {
        bytes,
        launch_duration_ms,
        render_duration_ms,
    })
}

/// Write `html` to a temporary document, hand its URL to `load`, then remove
/// the document whether or not `load` succeeded.
fn with_document<T>(
    html: &str,
    temp_dir: Option<&Path>,
    load: impl FnOnce(&Url) -> Result<T, ChromePdfError>,
) -> Result<T, ChromePdfError> {
    let document = HtmlDocument::create(html, temp_dir)?;
    let result = document.url().and_then(|url| load(&url));
    document.close();
    result
}

/// Apply the readiness condition between navigation and printing.
fn wait_until_ready(
    session: &BrowserSession,
    url: &Url,
    readiness: ReadinessCondition,
) -> Result<(), ChromePdfError> {
    if readiness.awaits_load() {
        session.wait_until_loaded(url)?;
        debug!("Load finished for {}", url);
    }

    let wait = readiness.wait();
    if !wait.is_zero() {
        debug!("Settling for {}ms before printing", wait.as_millis());
        std::thread::sleep(wait);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn document_removed_after_navigation_failure() {
        let temp = tempfile::tempdir().unwrap();
        let mut seen = None;

        let err = with_document("<p>x</p>", Some(temp.path()), |url| -> Result<(), _> {
            seen = url.to_file_path().ok();
            assert_eq!(entries(temp.path()), 1, "document exists while loading");
            Err(ChromePdfError::NavigationFailed {
                url: url.to_string(),
                detail: "net::ERR_ABORTED".into(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, ChromePdfError::NavigationFailed { .. }));
        assert!(!seen.unwrap().exists());
        assert_eq!(entries(temp.path()), 0);
    }

    #[test]
    fn document_removed_after_print_failure() {
        let temp = tempfile::tempdir().unwrap();

        let err = with_document("", Some(temp.path()), |_| -> Result<Vec<u8>, _> {
            Err(ChromePdfError::PrintFailed {
                detail: "connection closed".into(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, ChromePdfError::PrintFailed { .. }));
        assert_eq!(entries(temp.path()), 0);
    }

    #[test]
    fn document_removed_after_success() {
        let temp = tempfile::tempdir().unwrap();

        let html = with_document("<h1>ok</h1>", Some(temp.path()), |url| {
            let path = url.to_file_path().unwrap();
            Ok(std::fs::read_to_string(path).unwrap())
        })
        .unwrap();

        assert_eq!(html, "<h1>ok</h1>");
        assert_eq!(entries(temp.path()), 0);
    }

    #[test]
    fn no_load_when_document_cannot_be_written() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("absent");

        let err = with_document("<p>x</p>", Some(&missing), |_| -> Result<(), _> {
            panic!("load must not run without a document")
        })
        .unwrap_err();

        assert!(matches!(err, ChromePdfError::TempFile { .. }));
    }
}
