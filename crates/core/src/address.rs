//! Monitored wallet registry rows.

use serde::{Deserialize, Serialize};

/// One registry entry: a wallet address some destination wants to be
/// notified about. Supplied fresh each poll cycle; the monitor never caches
/// these beyond one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredAddress {
    /// Opaque identifier of the notification target (a Telegram chat id in
    /// the shipped binary).
    pub destination_id: String,
    /// TRON base58 wallet address.
    pub address: String,
    /// Display label chosen by the registrant.
    pub remark: String,
}

impl MonitoredAddress {
    pub fn new(
        destination_id: impl Into<String>,
        address: impl Into<String>,
        remark: impl Into<String>,
    ) -> Self {
        Self {
            destination_id: destination_id.into(),
            address: address.into(),
            remark: remark.into(),
        }
    }
}

/// Truncated display form of an address: the first 6 characters.
/// Shorter inputs pass through unchanged.
pub fn short_address(address: &str) -> &str {
    address.get(..6).unwrap_or(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_address_truncates() {
        assert_eq!(short_address("TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL"), "TNPeea");
    }

    #[test]
    fn test_short_address_passes_short_input_through() {
        assert_eq!(short_address("TNP"), "TNP");
        assert_eq!(short_address(""), "");
    }
}
