//! Structured event emission at the engine's defined points.
//!
//! The engine reports what happened through `EventSink` instead of bare log
//! lines, so tooling and tests can assert on emitted events rather than
//! parse log text. The default sink forwards to `tracing`.

use tracing::{error, info, warn};

/// Lifecycle events emitted by the poll orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Persisted dedup state was loaded at startup.
    StateLoaded { addresses: usize },
    /// A poll cycle began with this many registry entries.
    CycleStarted { cycle: u64, addresses: usize },
    /// A poll cycle finished; `notified` counts delivered messages.
    CycleFinished { cycle: u64, notified: usize },
    /// The whole cycle failed (registry unreachable); a cooldown follows.
    CycleFailed { cycle: u64, reason: String },
    /// A notification was handed to the notifier successfully.
    NotificationSent {
        destination_id: String,
        address: String,
        events: usize,
    },
    /// The notifier rejected a message. Dedup bookkeeping for these events
    /// is already committed and is not rolled back.
    NotificationFailed {
        destination_id: String,
        address: String,
        reason: String,
    },
    /// Dedup state was flushed to disk.
    StateFlushed { addresses: usize },
    /// A flush failed; in-memory state remains authoritative.
    StateFlushFailed { reason: String },
}

/// Receiver for engine events. Implementations must be cheap and
/// non-blocking; the orchestrator calls them inline.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: MonitorEvent);
}

/// Default sink: structured `tracing` records.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: MonitorEvent) {
        match event {
            MonitorEvent::StateLoaded { addresses } => {
                info!(addresses, "Loaded persisted dedup state");
            }
            MonitorEvent::CycleStarted { cycle, addresses } => {
                info!(cycle, addresses, "Poll cycle started");
            }
            MonitorEvent::CycleFinished { cycle, notified } => {
                info!(cycle, notified, "Poll cycle finished");
            }
            MonitorEvent::CycleFailed { cycle, reason } => {
                error!(cycle, %reason, "Poll cycle failed");
            }
            MonitorEvent::NotificationSent {
                destination_id,
                address,
                events,
            } => {
                info!(%destination_id, %address, events, "Notification sent");
            }
            MonitorEvent::NotificationFailed {
                destination_id,
                address,
                reason,
            } => {
                warn!(%destination_id, %address, %reason, "Notification failed");
            }
            MonitorEvent::StateFlushed { addresses } => {
                info!(addresses, "Dedup state flushed");
            }
            MonitorEvent::StateFlushFailed { reason } => {
                warn!(%reason, "Dedup state flush failed");
            }
        }
    }
}
