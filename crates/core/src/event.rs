//! TRC20 transfer events.

use crate::amount::UsdtAmount;
use serde::{Deserialize, Serialize};

/// One token-transfer record from the chain API. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// On-chain transaction id, unique per transfer.
    pub event_id: String,
    /// Block timestamp, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Transfer amount in smallest units.
    pub amount: UsdtAmount,
    /// Sender address.
    pub from_address: String,
    /// Recipient address.
    pub to_address: String,
}

/// Transfer direction relative to a monitored address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl TransferEvent {
    /// Direction of this transfer as seen from `monitored`. Address
    /// comparison is case-insensitive to tolerate upstream casing drift.
    pub fn direction(&self, monitored: &str) -> Direction {
        if self.to_address.eq_ignore_ascii_case(monitored) {
            Direction::Inbound
        } else {
            Direction::Outbound
        }
    }

    /// The other party of the transfer: the sender for inbound events, the
    /// recipient for outbound ones.
    pub fn counterparty(&self, monitored: &str) -> &str {
        match self.direction(monitored) {
            Direction::Inbound => &self.from_address,
            Direction::Outbound => &self.to_address,
        }
    }
}
