//! Small helpers shared across the bot.

use std::time::Duration;
use teloxide::RequestError;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::warn;

/// Safely truncates a string to a maximum character length (not bytes).
///
/// # Examples
///
/// ```
/// use multitool_bot::utils::truncate_str;
/// let s = "Привет, мир!";
/// assert_eq!(truncate_str(s, 6), "Привет");
/// ```
pub fn truncate_str(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.char_indices()
        .nth(max_chars)
        .map_or_else(|| s.to_string(), |(pos, _)| s[..pos].to_string())
}

/// Whether a failed Telegram call is worth repeating.
///
/// Transport failures and flood control are transient. API rejections such
/// as a blocked bot or a malformed request fail the same way every time.
#[must_use]
pub fn is_transient(err: &RequestError) -> bool {
    matches!(
        err,
        RequestError::Network(_) | RequestError::Io(_) | RequestError::RetryAfter(_)
    )
}

/// Retry a Telegram API operation with exponential backoff and jitter.
///
/// Only [`is_transient`] errors are retried. Attempt count and delays come
/// from the constants in `config.rs`.
///
/// # Errors
///
/// Returns the first permanent error, or the last transient one once every
/// attempt has failed.
///
/// # Examples
///
/// ```no_run
/// use multitool_bot::utils::retry_telegram_operation;
///
/// # async fn example() -> Result<(), teloxide::RequestError> {
/// let value = retry_telegram_operation(|| async { Ok(42) }).await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_telegram_operation<F, Fut, T>(operation: F) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RequestError>>,
{
    use crate::config::{
        TELEGRAM_API_INITIAL_BACKOFF_MS, TELEGRAM_API_MAX_BACKOFF_MS, TELEGRAM_API_MAX_RETRIES,
    };

    let retry_strategy = ExponentialBackoff::from_millis(TELEGRAM_API_INITIAL_BACKOFF_MS)
        .max_delay(Duration::from_millis(TELEGRAM_API_MAX_BACKOFF_MS))
        .map(jitter)
        .take(TELEGRAM_API_MAX_RETRIES);

    RetryIf::spawn(retry_strategy, operation, is_transient)
        .await
        .map_err(|e| {
            warn!("Telegram API operation failed: {}", e);
            e
        })
}
