//! Seam to the chain data API.

use async_trait::async_trait;
use tronwatch_chain::TronGridClient;
use tronwatch_core::{TransferEvent, UsdtAmount};

/// What the orchestrator needs from the chain: recent transfers and a
/// balance. Both absorb upstream failure into empty/zero so a flaky API
/// degrades a cycle to a no-op instead of an error.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Recent transfers for `address`, newest first.
    async fn recent_transfers(&self, address: &str) -> Vec<TransferEvent>;

    /// Current token balance for `address`.
    async fn balance(&self, address: &str) -> UsdtAmount;
}

#[async_trait]
impl ChainSource for TronGridClient {
    async fn recent_transfers(&self, address: &str) -> Vec<TransferEvent> {
        self.list_transfers(address).await
    }

    async fn balance(&self, address: &str) -> UsdtAmount {
        self.get_balance(address).await
    }
}
