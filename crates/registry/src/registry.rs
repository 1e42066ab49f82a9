use crate::{
    ChainConnection, ChainMap, Connection, PartialConnection, RegistryError, RegistrySettings,
    Result,
};
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider};
use alloy_signer_local::PrivateKeySigner;
use config::{Network, TransactionConfig, TxOverrides};
use futures_util::future::try_join_all;
use tracing::{debug, info};

/// Connection state for a fixed set of networks.
///
/// The set of networks is decided at construction and never changes;
/// everything else about a connection can be re-registered in place.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: ChainMap<ChainConnection>,
}

impl ConnectionRegistry {
    /// One defaulted connection per network, in the given order.
    pub fn from_networks(networks: impl IntoIterator<Item = Network>) -> Result<Self> {
        let connections = ChainMap::try_from_entries(
            networks
                .into_iter()
                .map(|network| (network, ChainConnection::default())),
        )?;
        Ok(Self { connections })
    }

    /// One connection per entry, built from the supplied partial values.
    pub fn from_partials(
        partials: impl IntoIterator<Item = (Network, PartialConnection)>,
    ) -> Result<Self> {
        let connections = ChainMap::try_from_entries(
            partials
                .into_iter()
                .map(|(network, partial)| (network, ChainConnection::from(partial))),
        )?;
        Ok(Self { connections })
    }

    /// Build from deserialised settings.
    pub fn from_settings(settings: RegistrySettings) -> Result<Self> {
        match settings {
            RegistrySettings::Networks(networks) => Self::from_networks(networks),
            RegistrySettings::Connections(connections) => {
                let partials = connections
                    .into_iter()
                    .map(|(network, settings)| Ok((network, settings.into_partial()?)))
                    .collect::<Result<Vec<_>>>()?;
                Self::from_partials(partials)
            }
        }
    }

    /// Like [`Self::from_networks`], with confirmations and overrides taken
    /// from the static per-network table.
    pub fn with_default_config(networks: impl IntoIterator<Item = Network>) -> Result<Self> {
        let mut registry = Self::from_networks(networks)?;
        for (network, connection) in registry.connections.entries_mut() {
            connection.apply_transaction_config(TransactionConfig::for_network(network));
        }
        Ok(registry)
    }

    pub fn get(&self, network: Network) -> Result<&ChainConnection> {
        self.connections
            .get(network)
            .ok_or(RegistryError::UnknownNetwork(network))
    }

    pub fn get_mut(&mut self, network: Network) -> Result<&mut ChainConnection> {
        self.connections
            .get_mut(network)
            .ok_or(RegistryError::UnknownNetwork(network))
    }

    /// Connections for the requested networks, in registry order.
    ///
    /// Networks that are not configured are skipped rather than reported.
    pub fn get_chains(&self, networks: &[Network]) -> Vec<(Network, &ChainConnection)> {
        self.connections
            .entries()
            .filter(|(network, _)| networks.contains(network))
            .collect()
    }

    /// All connections in registry order.
    pub fn get_all(&self) -> Vec<&ChainConnection> {
        self.connections.values().collect()
    }

    pub fn networks(&self) -> Vec<Network> {
        self.connections.networks().collect()
    }

    pub fn register_provider(&mut self, network: Network, provider: DynProvider) -> Result<()> {
        self.get_mut(network)?.register_provider(provider);
        debug!(%network, "Registered provider");
        Ok(())
    }

    /// Register an HTTP provider for `rpc_url`.
    ///
    /// Only the url syntax is checked here; an unreachable endpoint fails on
    /// first use.
    pub fn register_rpc_url(&mut self, network: Network, rpc_url: &str) -> Result<()> {
        // look the network up first so an unknown network wins over a bad url
        self.get(network)?;
        let provider = client::create_provider(rpc_url)?;
        self.register_provider(network, provider)
    }

    pub fn register_signer(&mut self, network: Network, signer: PrivateKeySigner) -> Result<()> {
        let address = signer.address();
        self.get_mut(network)?.register_signer(signer);
        debug!(%network, %address, "Registered signer");
        Ok(())
    }

    /// Register a local signer from a hex private key.
    pub fn register_wallet_signer(&mut self, network: Network, private_key: &str) -> Result<()> {
        self.get(network)?;
        let signer = client::parse_private_key(private_key)?;
        self.register_signer(network, signer)
    }

    /// Replace the network's overrides wholesale.
    pub fn register_overrides(&mut self, network: Network, overrides: TxOverrides) -> Result<()> {
        self.get_mut(network)?.register_overrides(overrides);
        debug!(%network, ?overrides, "Registered overrides");
        Ok(())
    }

    pub fn register_confirmations(&mut self, network: Network, confirmations: u64) -> Result<()> {
        self.get_mut(network)?.register_confirmations(confirmations);
        debug!(%network, confirmations, "Registered confirmations");
        Ok(())
    }

    /// Signer if registered, else provider, else `None`.
    pub fn get_connection(&self, network: Network) -> Result<Option<Connection<'_>>> {
        Ok(self.get(network)?.connection())
    }

    pub fn get_address(&self, network: Network) -> Result<Address> {
        self.get(network)?
            .address()
            .ok_or(RegistryError::MissingSigner(network))
    }

    /// Wait until every network's provider answers `eth_chainId`.
    ///
    /// Every network must have a provider; that is checked before any request
    /// goes out. Checks run concurrently and the first failure is returned.
    /// Returns the chain id each endpoint reported.
    pub async fn ready(&self) -> Result<Vec<(Network, u64)>> {
        let providers = self
            .connections
            .entries()
            .map(|(network, connection)| {
                connection
                    .provider()
                    .map(|provider| (network, provider))
                    .ok_or(RegistryError::MissingProvider(network))
            })
            .collect::<Result<Vec<_>>>()?;

        let checks = providers.into_iter().map(|(network, provider)| async move {
            let chain_id = provider
                .get_chain_id()
                .await
                .map_err(|source| RegistryError::Readiness { network, source })?;
            debug!(%network, chain_id, "Provider ready");
            Ok::<_, RegistryError>((network, chain_id))
        });

        let ready = try_join_all(checks).await?;
        info!(networks = ready.len(), "All providers ready");
        Ok(ready)
    }
}
