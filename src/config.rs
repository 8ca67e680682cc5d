//! Configuration types for HTML-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Page geometry is deliberately not part
//! of it: every PDF is printed on 8.5 × 11 in paper with backgrounds on (see
//! [`crate::pipeline::print`]).

use crate::error::ChromePdfError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for any configured wait, in milliseconds.
pub const MAX_WAIT_MS: u64 = 60_000;

/// Configuration for an HTML-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use chrome_pdf::{ConversionConfig, ReadinessCondition};
///
/// let config = ConversionConfig::builder()
///     .browser_root("/opt/myapp")
///     .readiness(ReadinessCondition::Load { settle_ms: 500 })
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversionConfig {
    /// Explicit Chromium executable. Bypasses the per-platform table.
    pub browser_path: Option<PathBuf>,

    /// Directory containing the `chromium/<platform>/…` tree.
    /// If None, the default search roots of `chromium_locate` are used.
    pub browser_root: Option<PathBuf>,

    /// When to consider the page rendered. Default: load event + 2 s.
    pub readiness: ReadinessCondition,

    /// Directory for the temporary HTML document. Default: system temp dir.
    pub temp_dir: Option<PathBuf>,
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn browser_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.browser_path = Some(path.into());
        self
    }

    pub fn browser_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.browser_root = Some(root.into());
        self
    }

    pub fn readiness(mut self, readiness: ReadinessCondition) -> Self {
        self.config.readiness = readiness;
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ChromePdfError> {
        let wait = self.config.readiness.wait_ms();
        if wait > MAX_WAIT_MS {
            return Err(ChromePdfError::InvalidConfig(format!(
                "Readiness wait must be ≤ {MAX_WAIT_MS} ms, got {wait}"
            )));
        }
        if let Some(ref dir) = self.config.temp_dir {
            if dir.as_os_str().is_empty() {
                return Err(ChromePdfError::InvalidConfig(
                    "Temporary directory must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// The signal awaited between navigation and printing.
///
/// | Variant | Behaviour |
/// |---------|-----------|
/// | `Load` | wait for the navigation to finish loading, then sleep `settle_ms` (default) |
/// | `FixedDelay` | sleep `ms` without waiting for any browser event |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessCondition {
    /// Load event, then an extra settle period for scripts and web fonts.
    Load { settle_ms: u64 },
    /// Unconditional sleep after issuing the navigation.
    FixedDelay { ms: u64 },
}

impl Default for ReadinessCondition {
    fn default() -> Self {
        ReadinessCondition::Load { settle_ms: 2000 }
    }
}

impl ReadinessCondition {
    /// Milliseconds slept after navigation (settle or fixed delay).
    pub fn wait_ms(&self) -> u64 {
        match *self {
            ReadinessCondition::Load { settle_ms } => settle_ms,
            ReadinessCondition::FixedDelay { ms } => ms,
        }
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms())
    }

    /// Whether the load event is awaited before sleeping.
    pub fn awaits_load(&self) -> bool {
        matches!(self, ReadinessCondition::Load { .. })
    }
}
