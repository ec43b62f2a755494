//! Transaction-monitoring engine.
//!
//! The polling scheduler, dedup state tracking, bounded-concurrency fetch
//! pipeline and durable-state persistence live here. The pieces the engine
//! does not own - where addresses come from and how notifications are
//! delivered - sit behind the `AddressRegistry` and `Notify` traits.

pub mod dedup;
pub mod events;
pub mod format;
pub mod notify;
pub mod orchestrator;
pub mod persist;
pub mod registry;
pub mod source;

pub use dedup::{DedupStore, PROCESSED_CACHE_CAPACITY};
pub use events::{EventSink, MonitorEvent, TracingSink};
pub use format::{render_notification, MAX_EVENTS_PER_MESSAGE};
pub use notify::{Notify, NotifyError};
pub use orchestrator::{MonitorConfig, MonitorError, WalletMonitor};
pub use persist::{PersistError, PersistedState, StateFile};
pub use registry::{AddressRegistry, RegistryError};
pub use source::ChainSource;
