//! Core data types for the wallet monitor.

pub mod address;
pub mod amount;
pub mod event;

pub use address::*;
pub use amount::*;
pub use event::*;
