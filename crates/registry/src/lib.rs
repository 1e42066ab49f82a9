//! Per-network connection registry.
//!
//! Associates each configured [`Network`](config::Network) with a provider,
//! a signer, fee overrides and a confirmation count. Everything that talks to
//! a network is delegated to alloy; this crate only keeps the handles
//! together and wires signers to their chain's provider.

pub mod chain_map;
pub mod connection;
mod error;
pub mod registry;
pub mod settings;

pub use chain_map::ChainMap;
pub use connection::{ChainConnection, Connection, PartialConnection};
pub use error::{RegistryError, Result};
pub use registry::ConnectionRegistry;
pub use settings::{ConnectionSettings, RegistrySettings};
