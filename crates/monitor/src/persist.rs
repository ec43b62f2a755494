//! Durable state document for dedup bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The flat on-disk document. Both maps are keyed by wallet address.
/// `last_tx_map` alone is the legacy format of the first listener version;
/// both fields default so either generation of file loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Newest notified event id per address.
    #[serde(default)]
    pub last_tx_map: HashMap<String, String>,
    /// Recently notified event ids per address, oldest first.
    #[serde(default)]
    pub processed_tx_cache: HashMap<String, Vec<String>>,
}

impl PersistedState {
    pub fn is_empty(&self) -> bool {
        self.last_tx_map.is_empty() && self.processed_tx_cache.is_empty()
    }

    /// Number of addresses with any persisted history.
    pub fn address_count(&self) -> usize {
        let mut addresses: Vec<&String> = self.last_tx_map.keys().collect();
        addresses.extend(self.processed_tx_cache.keys());
        addresses.sort();
        addresses.dedup();
        addresses.len()
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access state file: {0}")]
    Io(#[from] std::io::Error),
    /// A file that exists but does not parse. Fatal at startup: silently
    /// starting from empty state would reintroduce duplicate notifications.
    #[error("state file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Gateway to the JSON state document on disk.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file is a fresh start, not an error;
    /// a malformed file is surfaced to the caller.
    pub async fn load(&self) -> Result<PersistedState, PersistError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PersistedState::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Serialize and overwrite the document. Callers log failures and carry
    /// on; the in-memory state stays authoritative for the running process.
    pub async fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        let bytes = serde_json::to_vec(state)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
