//! TronGrid REST access for the wallet monitor.
//!
//! Two layers:
//! - `fetcher` - a retrying HTTP GET that degrades to absence instead of
//!   propagating errors
//! - `client` - the TRC20 transfer-history and balance endpoints built on it

pub mod client;
pub mod error;
pub mod fetcher;

pub use client::*;
pub use error::*;
pub use fetcher::*;
