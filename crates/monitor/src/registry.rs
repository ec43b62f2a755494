//! Seam to the external address registry.

use async_trait::async_trait;
use thiserror::Error;
use tronwatch_core::MonitoredAddress;

/// Registry lookup failed. The orchestrator treats this as a whole-cycle
/// failure and cools down before retrying.
#[derive(Debug, Error)]
#[error("address registry error: {0}")]
pub struct RegistryError(pub String);

/// Source of the monitored-address set, queried fresh every poll cycle.
/// Backed by the bot's SQLite wallet table in the shipped binary.
#[async_trait]
pub trait AddressRegistry: Send + Sync {
    async fn list_monitored_addresses(&self) -> Result<Vec<MonitoredAddress>, RegistryError>;
}
