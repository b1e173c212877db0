//! Retry with capped exponential backoff for transport fetches.
//!
//! Transient failures (network errors, HTTP status >= 400) are retried up to
//! the policy's attempt ceiling. Everything else is propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Attempt ceiling and delay schedule for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Ceiling applied to every computed delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(400),
            max_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep before retry number `retry` (1-based):
    /// `base_delay * 2^(retry - 1)`, capped at `max_delay`.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Returns `true` if `err` is a transport-level failure worth retrying.
///
/// Retriable:
/// - [`ScraperError::Http`]: connection reset, timeout, TLS failure, body read error.
/// - [`ScraperError::UnexpectedStatus`]: any HTTP status >= 400.
///
/// Not retriable:
/// - [`ScraperError::LocalFileNotFound`]: the fixture path will not appear on its own.
/// - [`ScraperError::Io`], [`ScraperError::InvalidUrl`], [`ScraperError::Serialize`].
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
    )
}

/// Executes `operation` until it succeeds, fails with a non-retriable error,
/// or `policy.max_attempts` attempts have been made. The last error is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_attempts {
            return Err(err);
        }

        let delay = policy.delay_for(attempt);
        tracing::warn!(
            attempt,
            max_attempts,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient fetch error; retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
