//! # chromium-locate
//!
//! Resolve the Chromium executable that ships alongside an application in a
//! `chromium/<platform>/...` directory tree, so that callers of a headless
//! browser client never have to hard-code per-OS paths.
//!
//! ## How it works
//!
//! On a call to [`locate_chromium`]:
//!
//! 1. Looks up the running OS in the static [`PLATFORMS`] table. An unknown
//!    OS fails immediately with [`LocateError::UnsupportedPlatform`].
//! 2. Uses `CHROMIUM_PATH` when it points to an existing file.
//! 3. Otherwise joins the table's relative path onto each search root (see
//!    [`search_roots`]) and returns the first one that exists.
//! 4. If nothing is installed, returns the location under the first root so
//!    the launch error can name the path that was expected.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chromium_locate::{is_chromium_installed, locate_chromium};
//!
//! let chrome = locate_chromium(None).expect("unsupported platform");
//! if !is_chromium_installed() {
//!     eprintln!("Chromium expected at {}", chrome.display());
//! }
//! ```
//!
//! ## Platform support
//!
//! | OS      | Executable                                                         |
//! |---------|--------------------------------------------------------------------|
//! | Linux   | `chromium/linux/chrome-linux/chrome`                               |
//! | macOS   | `chromium/macos/chrome-mac/Chromium.app/Contents/MacOS/Chromium`   |
//! | Windows | `chromium/windows/chrome-win/chrome.exe`                           |
//!
//! ## Environment variable overrides
//!
//! - `CHROMIUM_PATH` — path to an existing Chromium executable.
//! - `CHROMIUM_ROOT` — directory containing the `chromium/` tree.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

// ── Public constants ─────────────────────────────────────────────────────────

/// Top-level directory holding the per-platform Chromium builds.
pub const CHROMIUM_DIR: &str = "chromium";

/// Environment variable naming an explicit Chromium executable.
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// Environment variable naming the directory that contains `chromium/`.
pub const CHROMIUM_ROOT_ENV: &str = "CHROMIUM_ROOT";

/// Sub-directory of the per-user data dir searched as a last resort.
const DATA_DIR_NAME: &str = "chrome-pdf";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by chromium-locate operations.
#[derive(Error, Debug)]
pub enum LocateError {
    /// The OS has no entry in [`PLATFORMS`].
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },
}

// ── Platform table ───────────────────────────────────────────────────────────

/// An operating system / architecture pair, as reported by `std::env::consts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this process is running on.
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Where a platform's Chromium build lives below [`CHROMIUM_DIR`].
#[derive(Debug)]
pub struct PlatformInfo {
    /// `std::env::consts::OS` value this entry applies to.
    pub os: &'static str,
    /// Directory under `chromium/`, e.g. `linux`.
    pub platform_dir: &'static str,
    /// Path segments of the executable inside `platform_dir`.
    pub executable: &'static [&'static str],
}

impl PlatformInfo {
    /// `chromium/<platform_dir>/<executable…>` as a relative path.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(CHROMIUM_DIR);
        path.push(self.platform_dir);
        path.extend(self.executable);
        path
    }
}

/// Known Chromium layouts. The architecture does not change the layout.
pub static PLATFORMS: &[PlatformInfo] = &[
    PlatformInfo {
        os: "linux",
        platform_dir: "linux",
        executable: &["chrome-linux", "chrome"],
    },
    PlatformInfo {
        os: "macos",
        platform_dir: "macos",
        executable: &["chrome-mac", "Chromium.app", "Contents", "MacOS", "Chromium"],
    },
    PlatformInfo {
        os: "windows",
        platform_dir: "windows",
        executable: &["chrome-win", "chrome.exe"],
    },
];

/// Look up the table entry for `platform`.
pub fn platform_info(platform: &Platform) -> Result<&'static PlatformInfo, LocateError> {
    PLATFORMS
        .iter()
        .find(|info| info.os == platform.os)
        .ok_or_else(|| LocateError::UnsupportedPlatform {
            os: platform.os.clone(),
            arch: platform.arch.clone(),
        })
}

// ── Search roots ─────────────────────────────────────────────────────────────

/// Directories that may contain the `chromium/` tree, in priority order.
///
/// An explicit `root` wins, then `CHROMIUM_ROOT`. Without either, the list is:
/// - the current directory
/// - the directory of the running executable
/// - **Linux**: `~/.local/share/chrome-pdf/`
/// - **macOS**: `~/Library/Application Support/chrome-pdf/`
/// - **Windows**: `%LOCALAPPDATA%\chrome-pdf\`
pub fn search_roots(root: Option<&Path>) -> Vec<PathBuf> {
    roots_from(root, env_path(CHROMIUM_ROOT_ENV))
}

fn roots_from(root: Option<&Path>, env_root: Option<PathBuf>) -> Vec<PathBuf> {
    if let Some(root) = root {
        return vec![root.to_path_buf()];
    }
    if let Some(root) = env_root {
        return vec![root];
    }

    let mut roots = vec![PathBuf::from(".")];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }
    if let Some(data) = dirs::data_local_dir() {
        roots.push(data.join(DATA_DIR_NAME));
    }
    roots
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

// ── Thread-safe singleton path cache ─────────────────────────────────────────

static RESOLVED_PATH: OnceLock<PathBuf> = OnceLock::new();

// ── Public API ───────────────────────────────────────────────────────────────

/// Resolve the Chromium executable for the running platform.
///
/// With `root = None` the result is cached for the process lifetime once a
/// binary has actually been found.
pub fn locate_chromium(root: Option<&Path>) -> Result<PathBuf, LocateError> {
    if root.is_none() {
        if let Some(path) = RESOLVED_PATH.get() {
            return Ok(path.clone());
        }
    }

    let path = locate_chromium_for(&Platform::current(), root)?;

    if root.is_none() && path.is_file() {
        let _ = RESOLVED_PATH.set(path.clone());
    }
    Ok(path)
}

/// Resolve the Chromium executable for an explicit `platform`.
///
/// The platform is validated before any environment variable or file system
/// lookup, so an unsupported OS never produces a path.
pub fn locate_chromium_for(
    platform: &Platform,
    root: Option<&Path>,
) -> Result<PathBuf, LocateError> {
    let roots = roots_from(root, env_path(CHROMIUM_ROOT_ENV));
    resolve(platform, env_path(CHROMIUM_PATH_ENV), &roots)
}

/// Returns `true` if a Chromium executable exists at the resolved location.
pub fn is_chromium_installed() -> bool {
    locate_chromium(None).is_ok_and(|path| path.is_file())
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn resolve(
    platform: &Platform,
    env_override: Option<PathBuf>,
    roots: &[PathBuf],
) -> Result<PathBuf, LocateError> {
    let info = platform_info(platform)?;

    // 1. Environment variable override.
    if let Some(path) = env_override {
        if path.is_file() {
            debug!("Using {}={}", CHROMIUM_PATH_ENV, path.display());
            return Ok(path);
        }
        warn!(
            "{} '{}' not found; searching the bundled layout",
            CHROMIUM_PATH_ENV,
            path.display()
        );
    }

    // 2. First root that actually holds a binary.
    let relative = info.relative_path();
    let candidates: Vec<PathBuf> = roots.iter().map(|root| root.join(&relative)).collect();
    if let Some(found) = candidates.iter().find(|c| c.is_file()) {
        debug!("Found Chromium for {} at {}", platform, found.display());
        return Ok(found.clone());
    }

    // 3. Not installed anywhere: hand back the primary location.
    debug!(
        "No Chromium installed for {}; searched {} root(s)",
        platform,
        candidates.len()
    );
    Ok(candidates.into_iter().next().unwrap_or(relative))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
