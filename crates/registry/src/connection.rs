//! Per-network connection state.

use alloy_primitives::Address;
use alloy_provider::DynProvider;
use alloy_signer_local::PrivateKeySigner;
use client::ChainSigner;
use config::{TransactionConfig, TxOverrides};
use std::fmt;

/// The most capable handle a connection holds.
///
/// A signer can do everything a provider can, so it wins when both exist.
#[derive(Clone, Copy)]
pub enum Connection<'a> {
    Signer(&'a ChainSigner),
    Provider(&'a DynProvider),
}

impl<'a> Connection<'a> {
    /// Provider to use for reads.
    ///
    /// `None` only for a signer that was never connected to a provider.
    pub const fn provider(&self) -> Option<&'a DynProvider> {
        match *self {
            Self::Signer(signer) => signer.provider(),
            Self::Provider(provider) => Some(provider),
        }
    }

    pub const fn signer(&self) -> Option<&'a ChainSigner> {
        match *self {
            Self::Signer(signer) => Some(signer),
            Self::Provider(_) => None,
        }
    }
}

impl fmt::Debug for Connection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signer(signer) => f.debug_tuple("Signer").field(signer).finish(),
            Self::Provider(_) => f.write_str("Provider"),
        }
    }
}

/// Partial connection settings; anything left `None` gets the default.
#[derive(Clone, Default)]
pub struct PartialConnection {
    pub provider: Option<DynProvider>,
    pub signer: Option<PrivateKeySigner>,
    pub overrides: Option<TxOverrides>,
    pub confirmations: Option<u64>,
}

impl PartialConnection {
    pub fn provider(mut self, provider: DynProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn signer(mut self, signer: PrivateKeySigner) -> Self {
        self.signer = Some(signer);
        self
    }

    pub const fn overrides(mut self, overrides: TxOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub const fn confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = Some(confirmations);
        self
    }
}

impl fmt::Debug for PartialConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialConnection")
            .field("provider", &self.provider.is_some())
            .field("signer", &self.signer.as_ref().map(|s| s.address()))
            .field("overrides", &self.overrides)
            .field("confirmations", &self.confirmations)
            .finish()
    }
}

/// Connection state for a single network.
///
/// Whenever both a provider and a signer are held, the signer is connected to
/// that provider.
#[derive(Clone, Default)]
pub struct ChainConnection {
    provider: Option<DynProvider>,
    signer: Option<ChainSigner>,
    overrides: TxOverrides,
    confirmations: u64,
}

impl ChainConnection {
    pub fn provider(&self) -> Option<&DynProvider> {
        self.provider.as_ref()
    }

    pub fn signer(&self) -> Option<&ChainSigner> {
        self.signer.as_ref()
    }

    pub const fn overrides(&self) -> &TxOverrides {
        &self.overrides
    }

    pub const fn confirmations(&self) -> u64 {
        self.confirmations
    }

    /// Set the provider, reconnecting any held signer to it.
    pub fn register_provider(&mut self, provider: DynProvider) {
        if let Some(signer) = self.signer.as_mut() {
            signer.connect(&provider);
        }
        self.provider = Some(provider);
    }

    /// Set the signer, connecting it to the held provider if there is one.
    pub fn register_signer(&mut self, signer: PrivateKeySigner) {
        let mut signer = ChainSigner::new(signer);
        if let Some(provider) = self.provider.as_ref() {
            signer.connect(provider);
        }
        self.signer = Some(signer);
    }

    /// Replace the overrides wholesale.
    pub const fn register_overrides(&mut self, overrides: TxOverrides) {
        self.overrides = overrides;
    }

    pub const fn register_confirmations(&mut self, confirmations: u64) {
        self.confirmations = confirmations;
    }

    /// Replace overrides and confirmations with a static table entry.
    pub const fn apply_transaction_config(&mut self, config: TransactionConfig) {
        self.overrides = config.overrides;
        self.confirmations = config.confirmations;
    }

    /// Signer if present, else provider, else `None`.
    pub fn connection(&self) -> Option<Connection<'_>> {
        match (&self.signer, &self.provider) {
            (Some(signer), _) => Some(Connection::Signer(signer)),
            (None, Some(provider)) => Some(Connection::Provider(provider)),
            (None, None) => None,
        }
    }

    pub fn address(&self) -> Option<Address> {
        self.signer.as_ref().map(ChainSigner::address)
    }
}

impl From<PartialConnection> for ChainConnection {
    fn from(partial: PartialConnection) -> Self {
        let mut connection = Self {
            overrides: partial.overrides.unwrap_or_default(),
            confirmations: partial.confirmations.unwrap_or_default(),
            ..Default::default()
        };
        if let Some(provider) = partial.provider {
            connection.register_provider(provider);
        }
        if let Some(signer) = partial.signer {
            connection.register_signer(signer);
        }
        connection
    }
}

impl fmt::Debug for ChainConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConnection")
            .field("provider", &self.provider.is_some())
            .field("signer", &self.signer)
            .field("overrides", &self.overrides)
            .field("confirmations", &self.confirmations)
            .finish()
    }
}
