//! Fixed-point USDT amounts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// TRC20 USDT amount in smallest units (6 decimal places).
/// Kept as an integer so balances survive JSON round-trips without
/// floating-point drift.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UsdtAmount(pub u64);

impl UsdtAmount {
    /// Token decimal places on the USDT TRC20 contract.
    pub const DECIMALS: u32 = 6;
    /// Scale factor: 10^6 smallest units per whole USDT.
    pub const SCALE: u64 = 1_000_000;

    pub const ZERO: UsdtAmount = UsdtAmount(0);

    /// Create from a raw smallest-unit value as returned by the chain API.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Parse a smallest-unit string (the chain API encodes values as
    /// decimal strings). Returns `None` on anything non-numeric.
    pub fn from_raw_str(raw: &str) -> Option<Self> {
        raw.parse::<u64>().ok().map(Self)
    }

    /// Create from a whole-USDT count (mostly for tests).
    pub fn from_whole(whole: u64) -> Self {
        Self(whole * Self::SCALE)
    }
}

/// Display policy shared with the notification layout: whole amounts render
/// without a decimal point, fractional amounts are truncated (not rounded)
/// to two decimal places.
impl fmt::Display for UsdtAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % Self::SCALE == 0 {
            write!(f, "{}", self.0 / Self::SCALE)
        } else {
            let hundredths = self.0 / (Self::SCALE / 100);
            write!(f, "{}.{:02}", hundredths / 100, hundredths % 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_whole_amount_has_no_decimal_point() {
        assert_eq!(UsdtAmount::from_raw(5_000_000).to_string(), "5");
    }

    #[test]
    fn test_fractional_amount_truncates_to_two_places() {
        // 12.3469 truncates to 12.34, never rounds to 12.35
        assert_eq!(UsdtAmount::from_raw(12_346_900).to_string(), "12.34");
    }

    #[test]
    fn test_single_decimal_is_zero_padded() {
        assert_eq!(UsdtAmount::from_raw(12_300_000).to_string(), "12.30");
    }

    #[test]
    fn test_zero_renders_as_zero() {
        assert_eq!(UsdtAmount::ZERO.to_string(), "0");
    }

    #[test]
    fn test_sub_cent_amount() {
        assert_eq!(UsdtAmount::from_raw(10_000).to_string(), "0.01");
        assert_eq!(UsdtAmount::from_raw(9_999).to_string(), "0.00");
    }

    #[test]
    fn test_from_raw_str() {
        assert_eq!(
            UsdtAmount::from_raw_str("12346900"),
            Some(UsdtAmount(12_346_900))
        );
        assert_eq!(UsdtAmount::from_raw_str("not-a-number"), None);
        assert_eq!(UsdtAmount::from_raw_str("-5"), None);
    }
}
