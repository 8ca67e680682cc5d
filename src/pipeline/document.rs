//! Temporary HTML document the browser navigates to.
//!
//! Chromium loads the markup from a uniquely named `.html` file rather than a
//! `data:` URL, so relative `file://` resources and large documents behave the
//! same as when the file is opened by hand. The file lives exactly as long as
//! [`HtmlDocument`]; dropping it removes the file on every exit path.

use crate::error::ChromePdfError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use url::Url;

const PREFIX: &str = "chrome-pdf-";
const SUFFIX: &str = ".html";

/// The HTML input, materialised on disk.
#[derive(Debug)]
pub struct HtmlDocument {
    file: NamedTempFile,
}

impl HtmlDocument {
    /// Write `html` verbatim to a new temporary file in `dir` (or the
    /// system temp dir).
    pub fn create(html: &str, dir: Option<&Path>) -> Result<Self, ChromePdfError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX).suffix(SUFFIX);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|source| ChromePdfError::TempFile { source })?;

        file.write_all(html.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| ChromePdfError::TempFile { source })?;

        debug!(
            "Wrote {} bytes of HTML to {}",
            html.len(),
            file.path().display()
        );
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The `file://` URL of the document.
    pub fn url(&self) -> Result<Url, ChromePdfError> {
        // A relative temp_dir yields a relative path; file URLs need an absolute one.
        let path = std::path::absolute(self.path())
            .map_err(|source| ChromePdfError::TempFile { source })?;
        Url::from_file_path(&path).map_err(|()| {
            ChromePdfError::Internal(format!(
                "Cannot express {} as a file URL",
                path.display()
            ))
        })
    }

    /// Delete the file now, logging instead of failing if that is not possible.
    pub fn close(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn writes_html_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let html = "<h1>Héllo</h1><p>unclosed";
        let doc = HtmlDocument::create(html, Some(dir.path())).unwrap();

        assert_eq!(std::fs::read_to_string(doc.path()).unwrap(), html);
        let name = doc.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(PREFIX) && name.ends_with(SUFFIX), "got: {name}");
    }

    #[test]
    fn empty_html_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let doc = HtmlDocument::create("", Some(dir.path())).unwrap();
        assert_eq!(std::fs::metadata(doc.path()).unwrap().len(), 0);
    }

    #[test]
    fn url_is_file_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let doc = HtmlDocument::create("x", Some(dir.path())).unwrap();
        let url = doc.url().unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.to_file_path().unwrap(), doc.path());
    }

    #[test]
    fn names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = HtmlDocument::create("a", Some(dir.path())).unwrap();
        let b = HtmlDocument::create("b", Some(dir.path())).unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(entries(dir.path()), 2);
    }

    #[test]
    fn removed_on_close_and_on_drop() {
        let dir = tempfile::tempdir().unwrap();

        let doc = HtmlDocument::create("<p>closed</p>", Some(dir.path())).unwrap();
        doc.close();
        assert_eq!(entries(dir.path()), 0);

        {
            let _doc = HtmlDocument::create("<p>dropped</p>", Some(dir.path())).unwrap();
            assert_eq!(entries(dir.path()), 1);
        }
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn missing_dir_is_temp_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HtmlDocument::create("x", Some(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, ChromePdfError::TempFile { .. }));
    }
}
