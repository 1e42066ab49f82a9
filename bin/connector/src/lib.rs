pub mod config;
pub mod metrics;

use crate::{config::Config, metrics::Metrics};
use ::config::{Network, TransactionConfig, TxOverrides};
use alloy_primitives::Address;
use registry::{Connection, ConnectionRegistry, RegistryError, RegistrySettings};
use std::{fmt, time::Instant};
use tracing::{error, info};

/// Build the registry described by `config`.
///
/// When a private key is given, a wallet signer for it is registered on every
/// network.
pub fn build_registry(
    config: &Config,
    private_key: Option<&str>,
) -> eyre::Result<ConnectionRegistry> {
    let mut registry = ConnectionRegistry::from_settings(config.networks.clone())?;

    if config.network_defaults {
        apply_network_defaults(&mut registry, &config.networks)?;
    }

    if let Some(private_key) = private_key {
        for network in registry.networks() {
            registry.register_wallet_signer(network, private_key)?;
        }
    }

    Ok(registry)
}

/// Fill confirmations and overrides that `settings` leaves unset from the
/// static per-network table.
fn apply_network_defaults(
    registry: &mut ConnectionRegistry,
    settings: &RegistrySettings,
) -> eyre::Result<()> {
    for network in registry.networks() {
        let defaults = TransactionConfig::for_network(network);
        let explicit = match settings {
            RegistrySettings::Networks(_) => None,
            RegistrySettings::Connections(connections) => connections.get(network),
        };

        if explicit.and_then(|s| s.confirmations).is_none() {
            registry.register_confirmations(network, defaults.confirmations)?;
        }
        if explicit.and_then(|s| s.overrides).is_none() {
            registry.register_overrides(network, defaults.overrides)?;
        }
    }
    Ok(())
}

/// Run the registry readiness check and record the outcome.
pub async fn check_ready(
    registry: &ConnectionRegistry,
    metrics: &Metrics,
) -> eyre::Result<Vec<(Network, u64)>> {
    metrics.set_networks(registry.networks().len());
    let start = Instant::now();

    match registry.ready().await {
        Ok(ready) => {
            metrics.record_ready(start.elapsed());
            for (network, chain_id) in chain_id_mismatches(&ready) {
                error!(
                    %network,
                    expected = network.chain_id(),
                    actual = chain_id,
                    "Endpoint reports unexpected chain id"
                );
            }
            Ok(ready)
        }
        Err(e) => {
            let network = match &e {
                RegistryError::MissingProvider(network) => Some(*network),
                RegistryError::Readiness { network, .. } => Some(*network),
                _ => None,
            };
            metrics.record_ready_failure(network);
            Err(e.into())
        }
    }
}

/// Entries whose reported chain id differs from [`Network::chain_id`].
pub fn chain_id_mismatches(ready: &[(Network, u64)]) -> Vec<(Network, u64)> {
    ready
        .iter()
        .copied()
        .filter(|(network, chain_id)| *chain_id != network.chain_id())
        .collect()
}

/// Which handle a network's connection resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Unregistered,
    Provider,
    Signer,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unregistered => "unregistered",
            Self::Provider => "provider",
            Self::Signer => "signer",
        })
    }
}

/// Snapshot of one network's connection, without any network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub network: Network,
    pub confirmations: u64,
    pub overrides: TxOverrides,
    pub connection: ConnectionKind,
    pub address: Option<Address>,
}

pub fn summarize(registry: &ConnectionRegistry) -> Vec<NetworkSummary> {
    registry
        .get_chains(&registry.networks())
        .into_iter()
        .map(|(network, connection)| NetworkSummary {
            network,
            confirmations: connection.confirmations(),
            overrides: *connection.overrides(),
            connection: match connection.connection() {
                Some(Connection::Signer(_)) => ConnectionKind::Signer,
                Some(Connection::Provider(_)) => ConnectionKind::Provider,
                None => ConnectionKind::Unregistered,
            },
            address: connection.address(),
        })
        .collect()
}

/// Log a summary line per network.
pub fn log_summary(summaries: &[NetworkSummary]) {
    for summary in summaries {
        info!(
            network = %summary.network,
            confirmations = summary.confirmations,
            overrides = ?summary.overrides,
            connection = %summary.connection,
            address = ?summary.address,
            "Network"
        );
    }
}
