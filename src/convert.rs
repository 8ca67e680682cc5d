//! Conversion entry points.
//!
//! All three async forms share one pipeline and differ only in what happens
//! to the printed bytes: returned as-is ([`convert`]), written atomically to a
//! path ([`convert_to_file`]) or base64-encoded ([`convert_to_base64`]).

use crate::config::ConversionConfig;
use crate::error::ChromePdfError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::encode;
use crate::pipeline::render::{self, RenderJob};
use chromium_locate::Platform;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert HTML to PDF bytes in memory.
///
/// # Arguments
/// * `html`   — arbitrary HTML text; not validated, may be empty
/// * `config` — conversion configuration
///
/// # Errors
/// - `UnsupportedPlatform` — no Chromium layout for this OS (nothing launched)
/// - `ProcessLaunch` — the browser binary is missing or refused to start
/// - `TempFile` — the temporary HTML document could not be written
/// - `NavigationFailed` / `PrintFailed` — the browser reported an error
pub async fn convert(
    html: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ChromePdfError> {
    convert_for_platform(html.as_ref(), config, &Platform::current()).await
}

/// Convert HTML to PDF and write it to `output_path`.
///
/// Uses atomic write (temp file + rename) so the destination either holds a
/// complete PDF or is left untouched.
pub async fn convert_to_file(
    html: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, ChromePdfError> {
    let total_start = Instant::now();
    let output = convert(html, config).await?;
    let path = output_path.as_ref();

    write_pdf(path, &output.pdf).await?;
    info!("PDF saved to {}", path.display());

    Ok(ConversionStats {
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        ..output.stats
    })
}

/// Convert HTML to PDF and return it as standard base64 text.
pub async fn convert_to_base64(
    html: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<String, ChromePdfError> {
    let output = convert(html, config).await?;
    Ok(encode::encode_pdf(&output.pdf))
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    html: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ChromePdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ChromePdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(html, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

pub(crate) async fn convert_for_platform(
    html: &str,
    config: &ConversionConfig,
    platform: &Platform,
) -> Result<ConversionOutput, ChromePdfError> {
    let total_start = Instant::now();
    info!("Starting conversion: {} bytes of HTML", html.len());

    // ── Step 1: Resolve browser ──────────────────────────────────────────
    let browser_path = resolve_browser(config, platform)?;

    // ── Steps 2–6: Launch, load, wait, print (cleanup included) ──────────
    let rendered = render::render_pdf(RenderJob {
        html: html.to_owned(),
        browser_path: browser_path.clone(),
        readiness: config.readiness,
        temp_dir: config.temp_dir.clone(),
    })
    .await?;

    let stats = ConversionStats {
        html_bytes: html.len(),
        pdf_bytes: rendered.bytes.len(),
        launch_duration_ms: rendered.launch_duration_ms,
        render_duration_ms: rendered.render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        browser_path: browser_path.display().to_string(),
    };

    info!(
        "Conversion complete: {} bytes, {}ms total",
        stats.pdf_bytes, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        pdf: rendered.bytes,
        stats,
    })
}

/// Resolve the Chromium executable, from most-specific to least-specific.
///
/// 1. **Explicit path** (`config.browser_path`) — used as-is, the platform
///    table is not consulted.
/// 2. **Platform table** — `chromium_locate` checks the OS first (unknown OS
///    is an error before any lookup), then `CHROMIUM_PATH`, then the
///    `chromium/<platform>/…` layout under `config.browser_root` or the
///    default search roots.
pub(crate) fn resolve_browser(
    config: &ConversionConfig,
    platform: &Platform,
) -> Result<PathBuf, ChromePdfError> {
    if let Some(ref path) = config.browser_path {
        return Ok(path.clone());
    }

    let root = config.browser_root.as_deref();
    let path = if *platform == Platform::current() {
        chromium_locate::locate_chromium(root)?
    } else {
        chromium_locate::locate_chromium_for(platform, root)?
    };
    debug!("Resolved Chromium for {}: {}", platform, path.display());
    Ok(path)
}

/// Atomic write: write to a uniquely named sibling temp file, then rename over `path`.
async fn write_pdf(path: &Path, pdf: &[u8]) -> Result<(), ChromePdfError> {
    let target = path.to_path_buf();
    let bytes = pdf.to_vec();
    tokio::task::spawn_blocking(move || persist_pdf(&target, &bytes))
        .await
        .map_err(|e| ChromePdfError::Internal(format!("Write task panicked: {}", e)))?
}

fn persist_pdf(path: &Path, pdf: &[u8]) -> Result<(), ChromePdfError> {
    let write_failed = |source| ChromePdfError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
            parent
        }
        None => Path::new("."),
    };

    // Removed on drop if anything below fails.
    let mut tmp = tempfile::Builder::new()
        .prefix(".chrome-pdf-")
        .suffix(".pdf.tmp")
        .tempfile_in(parent)
        .map_err(write_failed)?;
    tmp.write_all(pdf)
        .and_then(|()| tmp.flush())
        .map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn unsupported_platform_never_launches() {
        let temp = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .temp_dir(temp.path())
            .build()
            .unwrap();

        let err = convert_for_platform("<p>hi</p>", &config, &Platform::new("plan9", "mips"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform);
        assert_eq!(entries(temp.path()), 0, "no temp file may be created");
    }

    #[test]
    fn explicit_path_bypasses_platform_table() {
        let config = ConversionConfig::builder()
            .browser_path("/opt/custom/chrome")
            .build()
            .unwrap();
        let path = resolve_browser(&config, &Platform::new("plan9", "mips")).unwrap();
        assert_eq!(path, PathBuf::from("/opt/custom/chrome"));
    }

    #[test]
    fn browser_root_is_honoured() {
        let root = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .browser_root(root.path())
            .build()
            .unwrap();
        let path = resolve_browser(&config, &Platform::new("linux", "x86_64")).unwrap();
        // CHROMIUM_PATH may point elsewhere on a developer machine.
        if std::env::var_os(chromium_locate::CHROMIUM_PATH_ENV).is_none() {
            assert_eq!(path, root.path().join("chromium/linux/chrome-linux/chrome"));
        }
    }

    #[tokio::test]
    async fn missing_browser_is_process_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out.pdf");
        let config = ConversionConfig::builder()
            .browser_path(dir.path().join("no-such-chrome"))
            .temp_dir(temp.path())
            .build()
            .unwrap();

        let err = convert_to_file("<h1>x</h1>", &destination, &config)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProcessLaunch);
        assert!(!destination.exists());
        assert_eq!(entries(temp.path()), 0);
    }

    #[test]
    fn convert_sync_reports_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .browser_path(dir.path().join("no-such-chrome"))
            .build()
            .unwrap();
        let err = convert_sync("", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProcessLaunch);
    }

    #[tokio::test]
    async fn write_pdf_creates_parents_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/report.pdf");

        write_pdf(&path, b"%PDF-1.4 test").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 test");
        assert_eq!(entries(path.parent().unwrap()), 1);
    }

    #[tokio::test]
    async fn write_pdf_keeps_unrelated_tmp_files() {
        let dir = tempfile::tempdir().unwrap();
        let neighbour = dir.path().join("report.pdf.tmp");
        std::fs::write(&neighbour, b"user data").unwrap();

        write_pdf(&dir.path().join("report.pdf"), b"%PDF-new")
            .await
            .unwrap();
        write_pdf(&dir.path().join("report"), b"%PDF-other")
            .await
            .unwrap();

        assert_eq!(std::fs::read(&neighbour).unwrap(), b"user data");
        assert_eq!(std::fs::read(dir.path().join("report.pdf")).unwrap(), b"%PDF-new");
        assert_eq!(std::fs::read(dir.path().join("report")).unwrap(), b"%PDF-other");
        assert_eq!(entries(dir.path()), 3);
    }

    #[tokio::test]
    async fn concurrent_writes_use_distinct_tmp_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("report");
        let b = dir.path().join("report.pdf");

        let (ra, rb) = tokio::join!(write_pdf(&a, b"%PDF-a"), write_pdf(&b, b"%PDF-b"));
        ra.unwrap();
        rb.unwrap();

        assert_eq!(std::fs::read(&a).unwrap(), b"%PDF-a");
        assert_eq!(std::fs::read(&b).unwrap(), b"%PDF-b");
        assert_eq!(entries(dir.path()), 2);
    }

    #[tokio::test]
    async fn write_pdf_replaces_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        std::fs::write(&path, b"old").unwrap();

        write_pdf(&path, b"%PDF-fresh").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-fresh");
        assert_eq!(entries(dir.path()), 1);
    }

    #[tokio::test]
    async fn write_pdf_failure_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        // Parent is a regular file, so neither the dir nor the tmp can be made.
        let err = write_pdf(&blocker.join("out.pdf"), b"%PDF-")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(entries(dir.path()), 1);
    }
}
