//! Seam to the notification transport.

use async_trait::async_trait;
use thiserror::Error;

/// Delivery attempt failed. Logged per address; never retried by the
/// engine and never rolls back dedup bookkeeping.
#[derive(Debug, Error)]
#[error("notifier error: {0}")]
pub struct NotifyError(pub String);

/// Delivers a rendered message to a destination. At-most-once per attempt;
/// the engine makes exactly one attempt per notification.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn send(&self, destination_id: &str, text: &str) -> Result<(), NotifyError>;
}
