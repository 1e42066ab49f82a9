//! Serialisable registry settings.
//!
//! A settings document is either a plain list of network names:
//!
//! ```toml
//! networks = ["alfajores", "fuji"]
//! ```
//!
//! or a table per network with optional connection values:
//!
//! ```toml
//! [networks.alfajores]
//! rpc_url = "https://alfajores-forno.celo-testnet.org"
//! confirmations = 1
//!
//! [networks.fuji.overrides]
//! gasPrice = 25000000000
//! ```

use crate::{ChainMap, PartialConnection, RegistryError, Result};
use config::{Network, TxOverrides};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection values for one network. Private keys are not accepted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSettings {
    /// HTTP RPC endpoint url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// Block confirmations to await
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    /// Fee overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<TxOverrides>,
}

impl ConnectionSettings {
    /// Turn settings into a partial connection, building the provider if a
    /// url is given. No network request is made.
    pub fn into_partial(self) -> Result<PartialConnection> {
        let provider = self
            .rpc_url
            .as_deref()
            .map(client::create_provider)
            .transpose()?;

        Ok(PartialConnection {
            provider,
            signer: None,
            overrides: self.overrides,
            confirmations: self.confirmations,
        })
    }
}

/// The two accepted shapes of registry input.
///
/// A sequence deserialises as [`RegistrySettings::Networks`] and a map as
/// [`RegistrySettings::Connections`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RegistrySettings {
    /// Network names only; every field defaulted.
    Networks(Vec<Network>),
    /// Network name to partial connection values.
    Connections(ChainMap<ConnectionSettings>),
}

impl<'de> Deserialize<'de> for RegistrySettings {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{
            value::{MapAccessDeserializer, SeqAccessDeserializer},
            MapAccess, SeqAccess, Visitor,
        };
        use std::fmt;

        struct SettingsVisitor;

        impl<'de> Visitor<'de> for SettingsVisitor {
            type Value = RegistrySettings;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a list of network names or a table per network")
            }

            fn visit_seq<A>(self, seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                Vec::<Network>::deserialize(SeqAccessDeserializer::new(seq))
                    .map(RegistrySettings::Networks)
            }

            fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                ChainMap::deserialize(MapAccessDeserializer::new(map))
                    .map(RegistrySettings::Connections)
            }
        }

        deserializer.deserialize_any(SettingsVisitor)
    }
}

#[derive(Deserialize)]
struct SettingsFile {
    networks: RegistrySettings,
}

impl RegistrySettings {
    /// Parse a TOML document with a top-level `networks` key.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: SettingsFile =
            toml::from_str(contents).map_err(|e| RegistryError::Config(e.to_string()))?;
        Ok(file.networks)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Configured networks in order.
    pub fn networks(&self) -> Vec<Network> {
        match self {
            Self::Networks(networks) => networks.clone(),
            Self::Connections(connections) => connections.networks().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network_list() {
        let contents = r#"networks = ["alfajores", "fuji"]"#;
        let settings = RegistrySettings::from_toml_str(contents).unwrap();
        assert_eq!(
            settings,
            RegistrySettings::Networks(vec![Network::Alfajores, Network::Fuji])
        );
    }

    #[test]
    fn test_parse_connection_tables() {
        let settings = RegistrySettings::from_toml_str(
            r#"
            [networks.fuji]
            rpc_url = "https://api.avax-test.network/ext/bc/C/rpc"
            confirmations = 3

            [networks.alfajores]

            [networks.mumbai.overrides]
            gasPrice = 30000000000
            "#,
        )
        .unwrap();

        let RegistrySettings::Connections(connections) = settings else {
            panic!("expected connection tables");
        };
        assert_eq!(
            connections.networks().collect::<Vec<_>>(),
            vec![Network::Fuji, Network::Alfajores, Network::Mumbai]
        );
        assert_eq!(
            connections.get(Network::Fuji).unwrap().confirmations,
            Some(3)
        );
        assert_eq!(
            connections.get(Network::Alfajores),
            Some(&ConnectionSettings::default())
        );
        assert_eq!(
            connections.get(Network::Mumbai).unwrap().overrides,
            Some(TxOverrides::NONE.gas_price(30_000_000_000))
        );
    }

    #[test]
    fn test_malformed_shape_is_config_error() {
        for contents in [
            "networks = 5",
            r#"networks = ["alfajores", 3]"#,
            r#"networks = ["goerli"]"#,
            "[networks.fuji]\nprivate_key = \"0x01\"",
            "chains = []",
        ] {
            let err = RegistrySettings::from_toml_str(contents).unwrap_err();
            assert!(matches!(err, RegistryError::Config(_)), "{contents}");
        }
    }

    #[test]
    fn test_network_names_are_case_insensitive() {
        let contents = r#"
            [networks.Fuji]
            confirmations = 2

            [networks.ALFAJORES]
            "#;
        let RegistrySettings::Connections(connections) =
            RegistrySettings::from_toml_str(contents).unwrap()
        else {
            panic!("expected connection tables");
        };
        assert_eq!(
            connections.networks().collect::<Vec<_>>(),
            vec![Network::Fuji, Network::Alfajores]
        );

        let settings = RegistrySettings::from_toml_str(r#"networks = ["Mumbai"]"#).unwrap();
        assert_eq!(settings.networks(), vec![Network::Mumbai]);
    }

    #[test]
    fn test_errors_name_the_actual_problem() {
        let err = RegistrySettings::from_toml_str(r#"networks = ["goerli"]"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("network name goerli is not supported"));
        assert!(message.contains("supported networks: alfajores"));

        let err = RegistrySettings::from_toml_str("[networks.goerli]").unwrap_err();
        assert!(err.to_string().contains("goerli is not supported"));

        let contents = "[networks.fuji]\nconfirmations = -1";
        let err = RegistrySettings::from_toml_str(contents).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("-1"), "{message}");
        assert!(!message.contains("did not match any variant"), "{message}");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = RegistrySettings::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, RegistryError::Config(_)));
    }

    #[test]
    fn test_into_partial_rejects_bad_url() {
        let settings = ConnectionSettings {
            rpc_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            settings.into_partial(),
            Err(RegistryError::Client(client::ClientError::InvalidUrl(_)))
        ));
    }
}
