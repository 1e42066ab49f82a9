//! Local transaction signer bound to a chain's provider.
//!
//! A bare key can sign but cannot talk to a network. Connecting it to a
//! provider layers a wallet filler over that provider so every RPC call and
//! every sent transaction from this signer routes through the same endpoint.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use std::fmt;

/// A local signer, optionally connected to a provider.
#[derive(Clone)]
pub struct ChainSigner {
    signer: PrivateKeySigner,
    provider: Option<DynProvider>,
}

impl ChainSigner {
    /// Creates an unconnected signer.
    pub const fn new(signer: PrivateKeySigner) -> Self {
        Self {
            signer,
            provider: None,
        }
    }

    /// Returns the signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Returns the underlying key signer.
    pub const fn inner(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Connect to `provider`, replacing any previous connection.
    pub fn connect(&mut self, provider: &DynProvider) {
        let wallet = EthereumWallet::from(self.signer.clone());
        let connected = ProviderBuilder::new()
            .wallet(wallet)
            .connect_provider(provider.clone());
        self.provider = Some(connected.erased());
    }

    /// Wallet-filling provider, if connected.
    pub const fn provider(&self) -> Option<&DynProvider> {
        self.provider.as_ref()
    }

    pub const fn is_connected(&self) -> bool {
        self.provider.is_some()
    }
}

impl From<PrivateKeySigner> for ChainSigner {
    fn from(signer: PrivateKeySigner) -> Self {
        Self::new(signer)
    }
}

impl fmt::Debug for ChainSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainSigner")
            .field("address", &self.address())
            .field("connected", &self.is_connected())
            .finish()
    }
}
