use crate::config::ApiConfig;
use crate::errors::{DataResult, LoadError};
use std::future::Future;
use std::time::Duration;

/// How many times to try a load and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.max_retries, config.retry_base_delay)
    }

    /// Wait after the failed attempt numbered `attempt` (zero-based):
    /// `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

/// Run `op` until it succeeds, the error isn't retryable, or attempts run out.
pub async fn with_retry<T, F, Fut>(what: &str, policy: &RetryPolicy, mut op: F) -> Result<T, LoadError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DataResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= policy.max_attempts || !err.is_retryable() {
                    tracing::warn!(what, attempt, error = %err, "load failed");
                    return Err(LoadError {
                        what: what.to_string(),
                        attempts: attempt,
                        source: err,
                    });
                }
                let delay = policy.delay_for(attempt - 1);
                tracing::warn!(
                    what,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "load attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
