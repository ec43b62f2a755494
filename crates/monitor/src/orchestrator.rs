//! The poll orchestrator.
//!
//! One loop drives everything: load persisted state, then per cycle pull
//! the registry, fan out bounded-concurrency address checks, and
//! periodically flush dedup state. Per-address failures degrade to no-ops;
//! a whole-cycle failure (registry unreachable) triggers a longer cooldown
//! instead of terminating the loop.

use crate::dedup::DedupStore;
use crate::events::{EventSink, MonitorEvent, TracingSink};
use crate::format::render_notification;
use crate::notify::Notify;
use crate::persist::{PersistError, StateFile};
use crate::registry::{AddressRegistry, RegistryError};
use crate::source::ChainSource;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tronwatch_core::MonitoredAddress;

/// Tunables for the poll loop.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Pause between poll cycles.
    pub poll_interval: Duration,
    /// Ceiling on simultaneous in-flight address checks.
    pub concurrency: usize,
    /// Flush dedup state every this many completed cycles. Zero disables
    /// the periodic flush; the shutdown flush still runs.
    pub flush_every: u64,
    /// Pause after a failed cycle before trying again.
    pub cycle_cooldown: Duration,
}

impl MonitorConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(45);
    pub const DEFAULT_CONCURRENCY: usize = 5;
    pub const DEFAULT_FLUSH_EVERY: u64 = 10;
    pub const DEFAULT_CYCLE_COOLDOWN: Duration = Duration::from_secs(60);
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            concurrency: Self::DEFAULT_CONCURRENCY,
            flush_every: Self::DEFAULT_FLUSH_EVERY,
            cycle_cooldown: Self::DEFAULT_CYCLE_COOLDOWN,
        }
    }
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The monitoring engine. Owns the dedup store exclusively; collaborators
/// come in through the `ChainSource`, `AddressRegistry` and `Notify` seams.
pub struct WalletMonitor<C, R, N> {
    chain: C,
    registry: R,
    notifier: N,
    store: DedupStore,
    state_file: StateFile,
    config: MonitorConfig,
    sink: Arc<dyn EventSink>,
}

impl<C, R, N> WalletMonitor<C, R, N>
where
    C: ChainSource,
    R: AddressRegistry,
    N: Notify,
{
    pub fn new(chain: C, registry: R, notifier: N, state_file: StateFile) -> Self {
        Self {
            chain,
            registry,
            notifier,
            store: DedupStore::new(),
            state_file,
            config: MonitorConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn store(&self) -> &DedupStore {
        &self.store
    }

    /// Drive the poll loop until `cancel` fires. Loads persisted state
    /// first (a corrupt state file is fatal and surfaces here) and flushes
    /// once more on the way out.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), MonitorError> {
        let snapshot = self.state_file.load().await?;
        let addresses = snapshot.address_count();
        self.store = DedupStore::from_snapshot(snapshot);
        self.sink.emit(MonitorEvent::StateLoaded { addresses });

        let mut cycle: u64 = 0;
        while !cancel.is_cancelled() {
            let pause = match self.run_cycle(cycle).await {
                Ok(_) => {
                    cycle += 1;
                    if self.config.flush_every > 0 && cycle % self.config.flush_every == 0 {
                        self.flush().await;
                    }
                    self.config.poll_interval
                }
                Err(e) => {
                    self.sink.emit(MonitorEvent::CycleFailed {
                        cycle,
                        reason: e.to_string(),
                    });
                    self.config.cycle_cooldown
                }
            };

            if Self::wait_or_cancelled(pause, &cancel).await {
                break;
            }
        }

        self.flush().await;
        Ok(())
    }

    /// One pass over the registry. Returns how many notifications went out.
    /// Only a registry failure escapes; everything below an address check
    /// is absorbed inside the unit of work.
    pub async fn run_cycle(&self, cycle: u64) -> Result<usize, RegistryError> {
        let addresses = self.registry.list_monitored_addresses().await?;
        if addresses.is_empty() {
            debug!(cycle, "No monitored addresses, skipping cycle");
            return Ok(0);
        }

        self.sink.emit(MonitorEvent::CycleStarted {
            cycle,
            addresses: addresses.len(),
        });

        let gate = Arc::new(Semaphore::new(self.config.concurrency));
        let checks = addresses.into_iter().map(|entry| {
            let gate = Arc::clone(&gate);
            async move {
                let _permit = match gate.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return 0usize,
                };
                self.check_address(&entry).await
            }
        });

        let notified: usize = join_all(checks).await.into_iter().sum();
        self.sink
            .emit(MonitorEvent::CycleFinished { cycle, notified });
        Ok(notified)
    }

    /// One unit of work: fetch, classify, and notify for a single registry
    /// entry. Returns 1 if a notification was delivered. Dedup bookkeeping
    /// commits before the delivery attempt, so a notifier failure never
    /// re-queues the events.
    async fn check_address(&self, entry: &MonitoredAddress) -> usize {
        let transfers = self.chain.recent_transfers(&entry.address).await;
        if transfers.is_empty() {
            return 0;
        }

        let fresh = self.store.admit_new(&entry.address, &transfers);
        if fresh.is_empty() {
            return 0;
        }

        let balance = self.chain.balance(&entry.address).await;
        let text = render_notification(&entry.remark, &entry.address, balance, &fresh);

        match self.notifier.send(&entry.destination_id, &text).await {
            Ok(()) => {
                self.sink.emit(MonitorEvent::NotificationSent {
                    destination_id: entry.destination_id.clone(),
                    address: entry.address.clone(),
                    events: fresh.len(),
                });
                1
            }
            Err(e) => {
                self.sink.emit(MonitorEvent::NotificationFailed {
                    destination_id: entry.destination_id.clone(),
                    address: entry.address.clone(),
                    reason: e.to_string(),
                });
                0
            }
        }
    }

    /// Persist the dedup snapshot. Save failures are reported and absorbed;
    /// the in-memory store stays authoritative.
    async fn flush(&self) {
        let snapshot = self.store.snapshot();
        let addresses = snapshot.address_count();
        match self.state_file.save(&snapshot).await {
            Ok(()) => self.sink.emit(MonitorEvent::StateFlushed { addresses }),
            Err(e) => self.sink.emit(MonitorEvent::StateFlushFailed {
                reason: e.to_string(),
            }),
        }
    }

    /// Returns true if cancellation fired before the pause elapsed.
    async fn wait_or_cancelled(pause: Duration, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => true,
            _ = tokio::time::sleep(pause) => false,
        }
    }
}
