use std::io::Write;

use super::*;

fn test_client() -> HttpClient {
    HttpClient::new(5, "storeleads-test/0.1", None, RetryPolicy::default())
        .expect("failed to build test HttpClient")
}

#[test]
fn local_path_strips_file_scheme() {
    assert_eq!(
        local::local_path("file:///tmp/page.html"),
        Some("/tmp/page.html")
    );
    assert_eq!(local::local_path("https://example.com"), None);
}

#[test]
fn new_rejects_cookie_with_control_characters() {
    let result = HttpClient::new(5, "ua", Some("a=1\nb=2"), RetryPolicy::default());
    assert!(
        matches!(result, Err(ScraperError::InvalidHeader { name: "Cookie", .. })),
        "expected InvalidHeader, got an Ok or another error"
    );
}

#[test]
fn new_accepts_blank_cookie_as_absent() {
    assert!(HttpClient::new(5, "ua", Some("   "), RetryPolicy::default()).is_ok());
}

#[tokio::test]
async fn fetch_text_reads_local_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "<html><title>Fixture</title></html>").unwrap();
    let url = format!("file://{}", file.path().display());

    let body = test_client().fetch_text(&url).await.unwrap();
    assert_eq!(body, "<html><title>Fixture</title></html>");
}

#[tokio::test]
async fn fetch_text_reports_missing_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.html");
    let url = format!("file://{}", missing.display());

    let err = test_client().fetch_text(&url).await.unwrap_err();
    assert!(
        matches!(err, ScraperError::LocalFileNotFound { ref path } if path.ends_with("missing.html")),
        "expected LocalFileNotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn transport_impl_delegates_to_fetch_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "ok").unwrap();
    let url = format!("file://{}", file.path().display());

    let client = test_client();
    let body = Transport::get_text(&client, &url).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn free_text_query_is_rejected_without_retrying() {
    let err = test_client().fetch_text("running shoes").await.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { ref url, .. } if url == "running shoes"),
        "expected InvalidUrl, got: {err:?}"
    );
}
