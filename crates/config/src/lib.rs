//! Static per-network configuration.
//!
//! This crate provides:
//! - The closed set of supported networks
//! - Per-network transaction configuration (confirmations, fee overrides)

pub mod network;
pub mod transaction;

pub use network::{Network, ParseNetworkError};
pub use transaction::{TransactionConfig, TxOverrides};
