//! Per-address deduplication of transfer events.

use crate::persist::PersistedState;
use dashmap::DashMap;
use std::collections::VecDeque;
use tronwatch_core::TransferEvent;

/// Upper bound on remembered event ids per address. When an admit would
/// exceed it, the oldest ids are evicted first.
pub const PROCESSED_CACHE_CAPACITY: usize = 50;

/// Dedup bookkeeping for one address. `processed` holds event ids oldest
/// first, newest at the back.
#[derive(Debug, Clone, Default)]
struct AddressState {
    last_notified: Option<String>,
    processed: VecDeque<String>,
}

impl AddressState {
    fn contains(&self, event_id: &str) -> bool {
        self.processed.iter().any(|id| id == event_id)
    }

    fn record(&mut self, event_id: &str) {
        self.processed.push_back(event_id.to_string());
        while self.processed.len() > PROCESSED_CACHE_CAPACITY {
            self.processed.pop_front();
        }
    }
}

/// Tracks which events have already triggered a notification, keyed by
/// address. Partitioned per address: admits for distinct addresses never
/// contend, admits for the same address serialize on the entry guard so a
/// classify+record step is never interleaved.
#[derive(Debug, Default)]
pub struct DedupStore {
    states: DashMap<String, AddressState>,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `fetched` (newest first, as the chain API returns it) and
    /// record whatever is new. Scans from the newest event and stops at the
    /// first already-seen id; everything before that point is new and is
    /// returned in original order. An empty result means nothing to notify.
    ///
    /// Runs to completion under the entry guard: either the whole batch is
    /// classified and recorded, or (on an empty result) nothing changes.
    pub fn admit_new(&self, address: &str, fetched: &[TransferEvent]) -> Vec<TransferEvent> {
        if fetched.is_empty() {
            return Vec::new();
        }

        let mut state = self.states.entry(address.to_string()).or_default();

        let mut fresh = Vec::new();
        for event in fetched {
            if state.contains(&event.event_id) {
                break;
            }
            fresh.push(event.clone());
        }

        if fresh.is_empty() {
            return fresh;
        }

        // Record oldest first so capacity eviction drops genuinely old ids.
        for event in fresh.iter().rev() {
            state.record(&event.event_id);
        }
        state.last_notified = Some(fresh[0].event_id.clone());

        fresh
    }

    /// Number of addresses with dedup state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Flatten into the persistence document.
    pub fn snapshot(&self) -> PersistedState {
        let mut snapshot = PersistedState::default();
        for entry in self.states.iter() {
            if let Some(last) = &entry.last_notified {
                snapshot
                    .last_tx_map
                    .insert(entry.key().clone(), last.clone());
            }
            if !entry.processed.is_empty() {
                snapshot.processed_tx_cache.insert(
                    entry.key().clone(),
                    entry.processed.iter().cloned().collect(),
                );
            }
        }
        snapshot
    }

    /// Rebuild from a persistence document. A legacy document carrying only
    /// `last_tx_map` seeds each processed set from its lone cursor.
    pub fn from_snapshot(snapshot: PersistedState) -> Self {
        let store = Self::new();

        for (address, ids) in snapshot.processed_tx_cache {
            let mut state = AddressState::default();
            for id in ids.iter().rev().take(PROCESSED_CACHE_CAPACITY).rev() {
                state.processed.push_back(id.clone());
            }
            store.states.insert(address, state);
        }

        for (address, last) in snapshot.last_tx_map {
            let mut state = store.states.entry(address).or_default();
            if !state.contains(&last) {
                state.record(&last);
            }
            state.last_notified = Some(last);
        }

        store
    }
}
