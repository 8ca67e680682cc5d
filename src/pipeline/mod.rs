//! Pipeline stages for HTML-to-PDF conversion.
//!
//! Each submodule implements exactly one step, so the browser-facing parts
//! can be tested in isolation from the file-system parts.
//!
//! ## Data Flow
//!
//! ```text
//! browser ──▶ document ──▶ render ──▶ print ──▶ encode
//! (launch)    (temp .html) (load+wait) (Letter)  (base64)
//! ```
//!
//! 1. [`browser`]  — launch headless Chromium and own its tab
//! 2. [`document`] — write the HTML to a uniquely named temp file
//! 3. [`render`]   — drive one session end to end inside `spawn_blocking`
//! 4. [`print`]    — the fixed print-to-PDF options
//! 5. [`encode`]   — optional base64 text form of the PDF

pub mod browser;
pub mod document;
pub mod encode;
pub mod print;
pub mod render;
