//! Supported networks.
//!
//! The set of networks is closed: anything not listed in [`Network`] cannot be
//! configured, so lookups against the static tables never fail at runtime.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Error type for parsing a [`Network`] from its name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNetworkError {
    /// The network name is not supported.
    #[error(
        "network name {0} is not supported. supported networks: {known}",
        known = known_networks()
    )]
    Unsupported(String),
}

fn known_networks() -> String {
    Network::ALL.map(|network| network.as_str()).join(", ")
}

/// Known test networks.
///
/// Serialised as [`Network::as_str`]; deserialised through [`FromStr`], so
/// names are accepted in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Network {
    /// Celo Alfajores testnet.
    Alfajores,
    /// Ethereum Kovan testnet.
    Kovan,
    /// Avalanche Fuji C-Chain.
    Fuji,
    /// Polygon Mumbai testnet.
    Mumbai,
    /// BNB Smart Chain testnet.
    BscTestnet,
    /// Arbitrum Rinkeby testnet.
    ArbitrumRinkeby,
    /// Optimism Kovan testnet.
    OptimismKovan,
    /// Local development network.
    Test1,
    /// Local development network.
    Test2,
    /// Local development network.
    Test3,
}

impl Network {
    /// Every known network, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Alfajores,
        Self::Kovan,
        Self::Fuji,
        Self::Mumbai,
        Self::BscTestnet,
        Self::ArbitrumRinkeby,
        Self::OptimismKovan,
        Self::Test1,
        Self::Test2,
        Self::Test3,
    ];

    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alfajores => "alfajores",
            Self::Kovan => "kovan",
            Self::Fuji => "fuji",
            Self::Mumbai => "mumbai",
            Self::BscTestnet => "bsctestnet",
            Self::ArbitrumRinkeby => "arbitrumrinkeby",
            Self::OptimismKovan => "optimismkovan",
            Self::Test1 => "test1",
            Self::Test2 => "test2",
            Self::Test3 => "test3",
        }
    }

    /// EIP-155 chain ID.
    ///
    /// The local development networks all run on the default hardhat/anvil ID.
    pub const fn chain_id(&self) -> u64 {
        match self {
            Self::Alfajores => 44787,
            Self::Kovan => 42,
            Self::Fuji => 43113,
            Self::Mumbai => 80001,
            Self::BscTestnet => 97,
            Self::ArbitrumRinkeby => 421611,
            Self::OptimismKovan => 69,
            Self::Test1 | Self::Test2 | Self::Test3 => 31337,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or(ParseNetworkError::Unsupported(s))
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NetworkVisitor;

        impl serde::de::Visitor<'_> for NetworkVisitor {
            type Value = Network;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a network name")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(NetworkVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>(), Ok(network));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Alfajores ".parse::<Network>(), Ok(Network::Alfajores));
        assert_eq!("BSCTESTNET".parse::<Network>(), Ok(Network::BscTestnet));
    }

    #[test]
    fn test_parse_unknown_network() {
        let err = "goerli".parse::<Network>().unwrap_err();
        assert_eq!(err, ParseNetworkError::Unsupported("goerli".to_string()));
        let message = err.to_string();
        for network in Network::ALL {
            assert!(message.contains(network.as_str()), "{message}");
        }
    }

    #[test]
    fn test_deserialize_is_case_insensitive() {
        let networks: Vec<Network> = serde_json::from_str(r#"["Fuji", "BscTestnet"]"#).unwrap();
        assert_eq!(networks, vec![Network::Fuji, Network::BscTestnet]);
    }

    #[test]
    fn test_deserialize_unknown_network_lists_supported() {
        let err = serde_json::from_str::<Network>(r#""goerli""#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("supported networks: alfajores, kovan"));
    }

    #[test]
    fn test_serde_name_matches_display() {
        for network in Network::ALL {
            let json = serde_json::to_string(&network).unwrap();
            assert_eq!(json, format!("\"{network}\""));
        }
    }

    #[test]
    fn test_chain_ids() {
        assert_eq!(Network::Alfajores.chain_id(), 44787);
        assert_eq!(Network::Fuji.chain_id(), 43113);
        assert_eq!(Network::Test2.chain_id(), 31337);
    }
}
