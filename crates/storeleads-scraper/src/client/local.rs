//! `file://` pseudo-scheme support for offline HTML fixtures.

use crate::error::ScraperError;

pub(super) const FILE_SCHEME: &str = "file://";

/// Returns the filesystem path of a `file://` URL, or `None` for any other scheme.
pub(super) fn local_path(url: &str) -> Option<&str> {
    url.strip_prefix(FILE_SCHEME)
}

/// Reads a local fixture as text. Invalid UTF-8 is replaced rather than rejected,
/// matching how scraped pages are decoded.
pub(super) async fn read_local_file(path: &str) -> Result<String, ScraperError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ScraperError::LocalFileNotFound {
                path: path.to_owned(),
            })
        }
        Err(e) => Err(ScraperError::Io {
            path: path.to_owned(),
            source: e,
        }),
    }
}
