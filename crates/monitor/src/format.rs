//! Notification message layout.

use chrono::{DateTime, FixedOffset};
use tronwatch_core::{short_address, TransferEvent, UsdtAmount};

/// Display cap per message. Older new events beyond this are dropped from
/// the text; the dedup store still accounts for all of them.
pub const MAX_EVENTS_PER_MESSAGE: usize = 5;

/// Civil timezone for rendered timestamps (UTC+8, where the operators sit).
const DISPLAY_UTC_OFFSET_SECS: i32 = 8 * 3600;

fn format_timestamp(timestamp_ms: i64) -> String {
    let offset =
        FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECS).expect("UTC+8 is a valid offset");
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.with_timezone(&offset).format("%m-%d %H:%M").to_string(),
        None => "--".to_string(),
    }
}

/// Render the wallet report: remark header, balance, address, then one line
/// per event (up to the display cap) with timestamp, truncated counterparty,
/// direction and amount.
pub fn render_notification(
    remark: &str,
    address: &str,
    balance: UsdtAmount,
    events: &[TransferEvent],
) -> String {
    let mut lines = vec![
        format!("Wallet report [{remark}]"),
        String::new(),
        format!("USDT balance: {balance}"),
        String::new(),
        format!("Address: {address}"),
        String::new(),
        "USDT activity:".to_string(),
    ];

    for event in events.iter().take(MAX_EVENTS_PER_MESSAGE) {
        lines.push(format!(
            "{}    {} {}    {}",
            format_timestamp(event.timestamp_ms),
            short_address(event.counterparty(address)),
            event.direction(address).label(),
            event.amount,
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(id: &str, to: &str, raw: u64) -> TransferEvent {
        TransferEvent {
            event_id: id.to_string(),
            // 2023-11-14 22:13:20 UTC => 11-15 06:13 at UTC+8
            timestamp_ms: 1_700_000_000_000,
            amount: UsdtAmount::from_raw(raw),
            from_address: "TSenderAddress".to_string(),
            to_address: to.to_string(),
        }
    }

    #[test]
    fn test_message_layout() {
        let events = vec![event("tx1", "TWalletAddress", 12_346_900)];
        let msg = render_notification(
            "ops wallet",
            "TWalletAddress",
            UsdtAmount::from_raw(5_000_000),
            &events,
        );

        let expected = "Wallet report [ops wallet]\n\
                        \n\
                        USDT balance: 5\n\
                        \n\
                        Address: TWalletAddress\n\
                        \n\
                        USDT activity:\n\
                        11-15 06:13    TSende inbound    12.34";
        assert_eq!(msg, expected);
    }

    #[test]
    fn test_outbound_line_shows_recipient() {
        let mut ev = event("tx1", "TReceiverAddress", 1_000_000);
        ev.from_address = "TWalletAddress".to_string();
        let msg = render_notification("w", "TWalletAddress", UsdtAmount::ZERO, &[ev]);
        assert!(msg.contains("TRecei outbound    1"));
    }

    #[test]
    fn test_display_cap_drops_oldest_events() {
        let events: Vec<_> = (0..8)
            .map(|i| event(&format!("tx{i}"), "TWalletAddress", 1_000_000))
            .collect();
        let msg = render_notification("w", "TWalletAddress", UsdtAmount::ZERO, &events);
        let event_lines = msg.lines().filter(|l| l.contains("inbound")).count();
        assert_eq!(event_lines, MAX_EVENTS_PER_MESSAGE);
    }

    #[test]
    fn test_unrepresentable_timestamp_renders_placeholder() {
        assert_eq!(format_timestamp(i64::MAX), "--");
    }
}
