//! Bounded retry with exponential backoff for provider requests.
//!
//! Transient failures (timeouts, connection errors, 5xx, 408, 429) may
//! be retried; 4xx client errors never are. The default policy performs
//! no retries at all, keeping fetches single-shot unless configuration
//! opts in.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};

/// Retry policy for a provider request.
#[derive(Debug, Clone)]
pub struct Backoff {
    /// Extra attempts after the first; 0 disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl Backoff {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let millis = (self.initial_delay.as_millis() as u64).saturating_mul(factor);
        Duration::from_millis(millis.min(self.max_delay.as_millis() as u64))
    }
}

fn transient_status(status: StatusCode) -> bool {
    status.is_server_error()
        || matches!(
            status,
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
        )
}

fn transient_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Run `request` until it yields a non-transient outcome or the policy
/// is exhausted. The last response is returned as-is; status handling
/// stays with the caller.
pub async fn send_with_backoff<F, Fut>(policy: &Backoff, request: F) -> Result<Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match request().await {
            Ok(response) if transient_status(response.status()) && attempt < policy.max_retries => {
                tracing::warn!(
                    "provider returned {}, retrying ({}/{})",
                    response.status(),
                    attempt + 1,
                    policy.max_retries
                );
            }
            Ok(response) => {
                if attempt > 0 {
                    tracing::info!("provider request succeeded after {attempt} retries");
                }
                return Ok(response);
            }
            Err(error) if transient_error(&error) && attempt < policy.max_retries => {
                tracing::warn!(
                    "transient network failure, retrying ({}/{}): {error}",
                    attempt + 1,
                    policy.max_retries
                );
            }
            Err(error) => return Err(error),
        }

        let delay = policy.delay(attempt);
        attempt += 1;
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_and_cap() {
        let policy = Backoff::new(10, 100, 1000);
        assert_eq!(policy.delay(0), Duration::from_millis(100));
        assert_eq!(policy.delay(1), Duration::from_millis(200));
        assert_eq!(policy.delay(2), Duration::from_millis(400));
        assert_eq!(policy.delay(3), Duration::from_millis(800));
        assert_eq!(policy.delay(4), Duration::from_millis(1000));
        assert_eq!(policy.delay(20), Duration::from_millis(1000));
    }

    #[test]
    fn default_policy_does_not_retry() {
        assert_eq!(Backoff::default().max_retries, 0);
    }

    #[test]
    fn status_classification() {
        assert!(transient_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(transient_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(transient_status(StatusCode::REQUEST_TIMEOUT));
        assert!(transient_status(StatusCode::TOO_MANY_REQUESTS));

        assert!(!transient_status(StatusCode::OK));
        assert!(!transient_status(StatusCode::BAD_REQUEST));
        assert!(!transient_status(StatusCode::UNAUTHORIZED));
        assert!(!transient_status(StatusCode::FORBIDDEN));
        assert!(!transient_status(StatusCode::NOT_FOUND));
    }
}
