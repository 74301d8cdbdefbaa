use anyhow::Error;
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Whether a failed dataset request is worth repeating.
///
/// Replies with a status are retried only for 5xx and 429. Failures without
/// a status (connection refused, timeouts, dropped bodies) are always retried.
pub fn is_transient(err: &reqwest::Error) -> bool {
    err.status()
        .is_none_or(|status| status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS)
}

/// Runs a request, retrying transient failures with a fixed delay
///
/// The operation should turn error statuses into errors (for example with
/// `Response::error_for_status`), otherwise a 503 reply counts as success.
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// The first successful response, the first non-transient error, or the
/// error from the last attempt
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) if attempt > retries || !is_transient(&err) => return Err(err.into()),
            Err(err) => {
                debug!(attempt, retries, error = %err, "Request failed, retrying");
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
