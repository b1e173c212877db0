//! JSON writers for finalized records.
//!
//! Both writers stage output in a temporary file beside the destination and
//! rename it into place, so readers never observe a half-written file.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ScraperError;

/// Writes `records` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the directory, temp file or rename fails,
/// or [`ScraperError::Serialize`] if a record cannot be encoded.
pub fn write_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ScraperError> {
    write_atomically(path, |out| {
        serde_json::to_writer_pretty(&mut *out, records).map_err(|source| {
            ScraperError::Serialize {
                context: path.display().to_string(),
                source,
            }
        })?;
        out.write_all(b"\n").map_err(|e| io_error(path, e))
    })
}

/// Writes `records` as JSON Lines: one compact object per line.
///
/// # Errors
///
/// Same as [`write_json_array`].
pub fn write_json_lines<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ScraperError> {
    write_atomically(path, |out| {
        for record in records {
            serde_json::to_writer(&mut *out, record).map_err(|source| {
                ScraperError::Serialize {
                    context: path.display().to_string(),
                    source,
                }
            })?;
            out.write_all(b"\n").map_err(|e| io_error(path, e))?;
        }
        Ok(())
    })
}

fn write_atomically<F>(path: &Path, write_body: F) -> Result<(), ScraperError>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<(), ScraperError>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;

    let mut staged = NamedTempFile::new_in(parent).map_err(|e| io_error(parent, e))?;
    {
        let mut out = BufWriter::new(&mut staged);
        write_body(&mut out)?;
        out.flush().map_err(|e| io_error(path, e))?;
    }
    staged.as_file().sync_all().map_err(|e| io_error(path, e))?;
    staged
        .persist(path)
        .map_err(|e| io_error(path, e.error))?;

    tracing::debug!(path = %path.display(), "wrote output file");
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> ScraperError {
    ScraperError::Io {
        path: path.display().to_string(),
        source,
    }
}
