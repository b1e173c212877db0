//! HTTP transport used to fetch search-result and review pages.

mod local;

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE};
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::retry::{retry_with_backoff, RetryPolicy};

/// Anything that can turn a URL into page text.
///
/// The pipeline and the review enricher are generic over this so tests can
/// substitute an in-memory page map for the network.
pub trait Transport {
    /// Fetches `url` and returns the decoded body.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the page cannot be retrieved.
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// `reqwest`-backed [`Transport`] with cookies, a fixed `User-Agent`, a
/// per-request timeout and capped exponential backoff.
///
/// `file://` URLs are served from the local filesystem so saved pages can be
/// replayed offline.
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Creates an `HttpClient`.
    ///
    /// `cookies` is sent verbatim as the `Cookie` header when present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidHeader`] if the cookie string is not a
    /// valid header value, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        cookies: Option<&str>,
        retry: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        if let Some(raw) = cookies.map(str::trim).filter(|c| !c.is_empty()) {
            let value =
                HeaderValue::from_str(raw).map_err(|e| ScraperError::InvalidHeader {
                    name: "Cookie",
                    reason: e.to_string(),
                })?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, retry })
    }

    /// Fetches `url` with retries on transient failures.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: HTTP status >= 400 after all attempts.
    /// - [`ScraperError::Http`]: network or TLS failure after all attempts.
    /// - [`ScraperError::InvalidUrl`]: `url` is not an absolute URL (not retried).
    /// - [`ScraperError::LocalFileNotFound`]: `file://` path does not exist (not retried).
    /// - [`ScraperError::Io`]: `file://` path exists but cannot be read (not retried).
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(&self.retry, || async move {
            if let Some(path) = local::local_path(url) {
                return local::read_local_file(path).await;
            }

            let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
            let response = self.client.get(parsed).send().await?;
            let status = response.status();
            if status.as_u16() >= 400 {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}

impl Transport for HttpClient {
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send {
        self.fetch_text(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
