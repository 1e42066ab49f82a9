use alloy_transport::TransportError;
use client::ClientError;
use config::Network;
use thiserror::Error;

/// Result alias for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Malformed construction input or settings file
    #[error("Invalid registry configuration: {0}")]
    Config(String),

    /// Network was not part of registry construction
    #[error("Network {0} is not configured")]
    UnknownNetwork(Network),

    /// Operation needs a provider that was never registered
    #[error("No provider registered for {0}")]
    MissingProvider(Network),

    /// Operation needs a signer that was never registered
    #[error("No signer registered for {0}")]
    MissingSigner(Network),

    /// Provider or signer could not be built
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Readiness check failed against the network endpoint
    #[error("Provider for {network} is not ready: {source}")]
    Readiness {
        network: Network,
        #[source]
        source: TransportError,
    },
}
