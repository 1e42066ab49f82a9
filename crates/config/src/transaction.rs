//! Per-network transaction parameters.
//!
//! Confirmation counts and fee overrides consumed by whatever submits
//! transactions. Nothing here talks to a network.

use crate::Network;
use alloy_rpc_types::TransactionRequest;
use serde::{Deserialize, Serialize};

const GWEI: u64 = 1_000_000_000;

/// Fee fields that bypass the client's automatic fee estimation.
///
/// An absent field means "use the client default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TxOverrides {
    /// Fixed legacy gas price in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
    /// Fixed gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    /// EIP-1559 max fee per gas in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<u64>,
    /// EIP-1559 max priority fee per gas in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<u64>,
}

impl TxOverrides {
    /// No overrides; let the network's fee market decide.
    pub const NONE: Self = Self {
        gas_price: None,
        gas_limit: None,
        max_fee_per_gas: None,
        max_priority_fee_per_gas: None,
    };

    /// Override the gas price.
    pub const fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Override the gas limit.
    pub const fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Override the EIP-1559 max fee per gas.
    pub const fn max_fee_per_gas(mut self, max_fee_per_gas: u64) -> Self {
        self.max_fee_per_gas = Some(max_fee_per_gas);
        self
    }

    /// Override the EIP-1559 max priority fee per gas.
    pub const fn max_priority_fee_per_gas(mut self, max_priority_fee_per_gas: u64) -> Self {
        self.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
        self
    }

    /// Returns true if no field is overridden.
    pub const fn is_empty(&self) -> bool {
        self.gas_price.is_none()
            && self.gas_limit.is_none()
            && self.max_fee_per_gas.is_none()
            && self.max_priority_fee_per_gas.is_none()
    }

    /// Copy overridden fields onto a transaction request.
    ///
    /// Fields already set on the request are left untouched.
    pub fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if tx.gas_price.is_none() {
            tx.gas_price = self.gas_price.map(u128::from);
        }
        if tx.gas.is_none() {
            tx.gas = self.gas_limit;
        }
        if tx.max_fee_per_gas.is_none() {
            tx.max_fee_per_gas = self.max_fee_per_gas.map(u128::from);
        }
        if tx.max_priority_fee_per_gas.is_none() {
            tx.max_priority_fee_per_gas = self.max_priority_fee_per_gas.map(u128::from);
        }
        tx
    }
}

/// Transaction parameters for a single network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionConfig {
    /// Block confirmations to await before treating a transaction as final.
    pub confirmations: u64,
    /// Fee overrides.
    #[serde(default)]
    pub overrides: TxOverrides,
}

impl TransactionConfig {
    const fn new(confirmations: u64, overrides: TxOverrides) -> Self {
        Self {
            confirmations,
            overrides,
        }
    }

    /// Static transaction configuration for a network.
    pub const fn for_network(network: Network) -> Self {
        match network {
            Network::Alfajores => Self::new(1, TxOverrides::NONE),
            Network::Kovan => Self::new(3, TxOverrides::NONE),
            Network::Fuji => Self::new(3, TxOverrides::NONE),
            // Mumbai validators reject anything under 30 gwei.
            Network::Mumbai => Self::new(3, TxOverrides::NONE.gas_price(30 * GWEI)),
            Network::BscTestnet => Self::new(1, TxOverrides::NONE.gas_price(10 * GWEI)),
            Network::ArbitrumRinkeby => Self::new(1, TxOverrides::NONE.gas_limit(10_000_000)),
            Network::OptimismKovan => Self::new(
                1,
                TxOverrides::NONE
                    .gas_price(15_000_000)
                    .gas_limit(10_000_000),
            ),
            Network::Test1 | Network::Test2 | Network::Test3 => Self::new(1, TxOverrides::NONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERRIDE_KEYS: [&str; 4] = [
        "gasPrice",
        "gasLimit",
        "maxFeePerGas",
        "maxPriorityFeePerGas",
    ];

    #[test]
    fn test_every_network_has_config() {
        for network in Network::ALL {
            let config = TransactionConfig::for_network(network);
            // only recognized fee fields survive a serde round trip
            let json = serde_json::to_value(config.overrides).unwrap();
            for key in json.as_object().unwrap().keys() {
                assert!(
                    OVERRIDE_KEYS.contains(&key.as_str()),
                    "{network}: unexpected override {key}"
                );
            }
        }
    }

    #[test]
    fn test_table_values() {
        let alfajores = TransactionConfig::for_network(Network::Alfajores);
        assert_eq!(alfajores.confirmations, 1);
        assert!(alfajores.overrides.is_empty());

        let mumbai = TransactionConfig::for_network(Network::Mumbai);
        assert_eq!(mumbai.overrides.gas_price, Some(30 * GWEI));
        assert_eq!(mumbai.overrides.gas_limit, None);

        let optimism = TransactionConfig::for_network(Network::OptimismKovan);
        assert_eq!(optimism.overrides.gas_limit, Some(10_000_000));
    }

    #[test]
    fn test_overrides_reject_unknown_fields() {
        let err = serde_json::from_str::<TxOverrides>(r#"{"gasPrice": 1, "nonce": 2}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_overrides_from_toml() {
        let overrides: TxOverrides = toml::from_str(
            r#"
            gasPrice = 5000000000
            gasLimit = 21000
            "#,
        )
        .unwrap();
        assert_eq!(
            overrides,
            TxOverrides::NONE.gas_price(5 * GWEI).gas_limit(21_000)
        );
    }

    #[test]
    fn test_apply_keeps_explicit_fields() {
        let overrides = TxOverrides::NONE.gas_price(7).gas_limit(100_000);
        let tx = TransactionRequest {
            gas: Some(21_000),
            ..Default::default()
        };

        let tx = overrides.apply(tx);
        assert_eq!(tx.gas, Some(21_000));
        assert_eq!(tx.gas_price, Some(7));
        assert_eq!(tx.max_fee_per_gas, None);
    }

    #[test]
    fn test_empty_overrides_serialize_to_empty_object() {
        assert_eq!(
            serde_json::to_string(&TxOverrides::default()).unwrap(),
            "{}"
        );
    }
}
