use std::future::Future;

/// Exponential backoff settings: attempt `n` waits `delay_ms * backoff^(n-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay_ms: u32,
    pub backoff: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_ms: 1000,
            backoff: 2,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> u32 {
        let factor = self.backoff.saturating_pow(attempt.saturating_sub(1));
        self.delay_ms.saturating_mul(factor)
    }
}

/// Re-runs `request` while `should_retry` accepts the error, sleeping between
/// attempts with `gloo-timers`.
pub async fn retry_request<T, E, F, Fut>(
    policy: RetryPolicy,
    should_retry: impl Fn(&E) -> bool,
    request: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_with_sleep(policy, should_retry, request, |ms| {
        gloo_timers::future::TimeoutFuture::new(ms)
    })
    .await
}

pub(crate) async fn retry_with_sleep<T, E, F, Fut, S, SFut>(
    policy: RetryPolicy,
    should_retry: impl Fn(&E) -> bool,
    mut request: F,
    sleep: S,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    S: Fn(u32) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt = 0;
    loop {
        match request().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_retries || !should_retry(&err) {
                    return Err(err);
                }
                attempt += 1;
                let delay = policy.delay_for_attempt(attempt);
                log::warn!(
                    "Request failed ({}), retrying in {}ms (attempt {}/{})",
                    err,
                    delay,
                    attempt,
                    policy.max_retries
                );
                sleep(delay).await;
            }
        }
    }
}
