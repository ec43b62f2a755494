//! Retrying HTTP fetch with exponential backoff.

use crate::error::ChainError;
use std::time::Duration;
use tracing::{error, warn};

/// Retry schedule for upstream API calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts before giving up.
    pub attempts: u32,
    /// Backoff after a failed attempt is `base_delay * 2^attempt`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: Self::DEFAULT_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }
}

/// HTTP GET with bounded retries. Exhausted retries yield `None` rather
/// than an error; callers treat absence as "no new data this cycle".
#[derive(Debug, Clone)]
pub struct RetryingFetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl RetryingFetcher {
    /// Per-attempt timeout. Together with the 1s/2s/4s backoff this bounds
    /// a fully failing call to roughly 17s.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> Self {
        Self::with_policy(RetryPolicy::default())
    }

    pub fn with_policy(policy: RetryPolicy) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { client, policy }
    }

    /// Fetch a JSON document. Transient failures (timeout, connection
    /// error, non-2xx status) back off and retry; a malformed body gives up
    /// immediately since re-fetching will not fix it.
    pub async fn fetch_json(&self, url: &str) -> Option<serde_json::Value> {
        for attempt in 0..self.policy.attempts {
            match self.try_fetch(url).await {
                Ok(json) => return Some(json),
                Err(e) if e.is_transient() => {
                    warn!(
                        url = url,
                        attempt = attempt + 1,
                        attempts = self.policy.attempts,
                        error = %e,
                        "Chain API request failed"
                    );
                    tokio::time::sleep(self.policy.base_delay * 2u32.pow(attempt)).await;
                }
                Err(e) => {
                    error!(url = url, error = %e, "Chain API returned malformed data");
                    return None;
                }
            }
        }
        error!(
            url = url,
            attempts = self.policy.attempts,
            "All chain API attempts failed"
        );
        None
    }

    async fn try_fetch(&self, url: &str) -> Result<serde_json::Value, ChainError> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChainError::Status(response.status().as_u16()));
        }

        let json = response.json::<serde_json::Value>().await?;
        Ok(json)
    }
}

impl Default for RetryingFetcher {
    fn default() -> Self {
        Self::new()
    }
}
