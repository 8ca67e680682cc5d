//! Headless Chromium process and its automation tab.
//!
//! One [`BrowserSession`] per conversion. It owns the `headless_chrome`
//! [`Browser`] (the child process) and the single [`Tab`] used for the
//! document. Dropping the session terminates the process, so every exit path
//! releases it; [`BrowserSession::close`] additionally closes the tab first.

use crate::config::MAX_WAIT_MS;
use crate::error::ChromePdfError;
use crate::pipeline::print;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Switches passed on top of headless mode and the disabled sandbox.
pub const CHROMIUM_FLAGS: &[&str] = &["--disable-gpu", "--disable-software-rasterizer"];

/// Headroom on top of the longest readiness wait before the DevTools
/// connection is considered idle. No events arrive while the page settles.
const IDLE_HEADROOM: Duration = Duration::from_secs(30);

/// How long the DevTools connection may stay silent.
pub fn idle_timeout() -> Duration {
    Duration::from_millis(MAX_WAIT_MS) + IDLE_HEADROOM
}

/// A running browser process with one open tab.
pub struct BrowserSession {
    // Field order matters: the tab handle is released before the process.
    tab: Arc<Tab>,
    browser: Browser,
    path: PathBuf,
}

/// Launch options for a headless, unsandboxed, GPU-less Chromium at `path`.
pub fn launch_options(path: &Path) -> LaunchOptions<'static> {
    LaunchOptions {
        headless: true,
        sandbox: false,
        path: Some(path.to_path_buf()),
        args: CHROMIUM_FLAGS.iter().map(|flag| OsStr::new(*flag)).collect(),
        idle_browser_timeout: idle_timeout(),
        ..Default::default()
    }
}

/// Start Chromium and open the tab used for rendering.
pub fn launch(path: &Path) -> Result<BrowserSession, ChromePdfError> {
    if !path.exists() {
        return Err(process_launch(path, "executable not found"));
    }

    debug!("Launching {} {:?}", path.display(), CHROMIUM_FLAGS);
    let browser = Browser::new(launch_options(path)).map_err(|e| process_launch(path, e))?;
    let tab = browser
        .new_tab()
        .map_err(|e| process_launch(path, format!("could not open a tab: {e}")))?;
    info!("Chromium started: {}", path.display());

    Ok(BrowserSession {
        tab,
        browser,
        path: path.to_path_buf(),
    })
}

fn process_launch(path: &Path, reason: impl Display) -> ChromePdfError {
    ChromePdfError::ProcessLaunch {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl BrowserSession {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Issue the navigation without waiting for the page to load.
    pub fn navigate(&self, url: &Url) -> Result<(), ChromePdfError> {
        self.tab
            .navigate_to(url.as_str())
            .map_err(|e| navigation_failed(url, e))?;
        Ok(())
    }

    /// Block until the tab reports the navigation finished loading.
    pub fn wait_until_loaded(&self, url: &Url) -> Result<(), ChromePdfError> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| navigation_failed(url, e))?;
        Ok(())
    }

    /// Print the current page with the fixed Letter layout.
    pub fn print_to_pdf(&self) -> Result<Vec<u8>, ChromePdfError> {
        self.tab
            .print_to_pdf(Some(print::print_options()))
            .map_err(|e| ChromePdfError::PrintFailed {
                detail: e.to_string(),
            })
    }

    /// Close the tab, then terminate the browser process.
    pub fn close(self) {
        let BrowserSession { tab, browser, path } = self;
        if let Err(e) = tab.close(false) {
            debug!("Tab close failed (process is terminated anyway): {}", e);
        }
        drop(tab);
        drop(browser);
        debug!("Chromium stopped: {}", path.display());
    }
}

fn navigation_failed(url: &Url, e: impl Display) -> ChromePdfError {
    ChromePdfError::NavigationFailed {
        url: url.to_string(),
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_headless_without_sandbox() {
        let opts = launch_options(Path::new("/opt/chromium/chrome"));
        assert!(opts.headless);
        assert!(!opts.sandbox);
        assert_eq!(opts.path.as_deref(), Some(Path::new("/opt/chromium/chrome")));

        let args: Vec<&str> = opts.args.iter().filter_map(|a| a.to_str()).collect();
        assert!(args.contains(&"--disable-gpu"));
        assert!(args.contains(&"--disable-software-rasterizer"));
    }

    #[test]
    fn connection_outlives_longest_wait() {
        let opts = launch_options(Path::new("/opt/chromium/chrome"));
        assert!(opts.idle_browser_timeout > Duration::from_millis(MAX_WAIT_MS));
        assert_eq!(opts.idle_browser_timeout, idle_timeout());
    }

    #[test]
    fn missing_executable_fails_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("chrome");
        let err = launch(&missing).err().expect("launch must fail");
        match err {
            ChromePdfError::ProcessLaunch { path, reason } => {
                assert_eq!(path, missing);
                assert!(reason.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
