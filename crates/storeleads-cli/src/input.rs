//! Query and cookie file loading.

use std::path::Path;

use anyhow::Context;

/// Reads one query per line, skipping blank lines and `#` comments.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub(crate) fn read_queries(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    Ok(parse_queries(&text))
}

fn parse_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Reads a raw `Cookie` header value from `path`, trimmed.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub(crate) fn load_cookies(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cookies file {}", path.display()))?;
    Ok(text.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# header\n\n  https://storeleads.app/search?q=shoes  \n\t\nacme.com\n   # indented comment\n";
        assert_eq!(
            parse_queries(text),
            vec!["https://storeleads.app/search?q=shoes", "acme.com"]
        );
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        assert_eq!(parse_queries("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn comment_only_file_yields_no_queries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing to do").unwrap();
        assert!(read_queries(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_queries(&dir.path().join("absent.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read input file"));
    }

    #[test]
    fn cookies_are_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n  session=abc; region=us \n").unwrap();
        assert_eq!(load_cookies(file.path()).unwrap(), "session=abc; region=us");
    }

    #[test]
    fn missing_cookie_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_cookies(&dir.path().join("cookies.txt")).is_err());
    }
}
