//! Error types for chain API access.

use thiserror::Error;

/// Errors that can occur while talking to the chain API. These stay
/// internal to the fetch layer: after retries are exhausted the fetcher
/// reports absence, never an error.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChainError::Decode(err.to_string())
        } else {
            ChainError::Request(err.to_string())
        }
    }
}

impl ChainError {
    /// Returns true if this error is transient and worth retrying.
    /// Timeouts, connection failures and non-2xx statuses all qualify; a
    /// body that arrived but failed to decode will not improve on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, ChainError::Request(_) | ChainError::Status(_))
    }
}
