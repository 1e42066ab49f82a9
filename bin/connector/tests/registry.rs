//! Integration tests for building a registry from a connector config.
//!
//! None of these touch the network.

use alloy_primitives::U64;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_transport::mock::Asserter;
use config::{Network, TransactionConfig, TxOverrides};
use connector::{
    build_registry, chain_id_mismatches, check_ready, config::Config, metrics::Metrics, summarize,
    ConnectionKind,
};
use registry::{ConnectionRegistry, RegistryError};

// anvil default key[0]
const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn mocked_provider(asserter: &Asserter) -> DynProvider {
    ProviderBuilder::new()
        .connect_mocked_client(asserter.clone())
        .erased()
}

fn load_test_config() -> Config {
    Config::from_file("tests/test-config.toml").expect("Failed to load tests/test-config.toml.")
}

#[test]
fn test_load_config_file() {
    let config = load_test_config();
    assert_eq!(config.metrics_port, Some(9090));
    assert!(config.network_defaults);
    assert_eq!(
        config.networks.networks(),
        vec![Network::Alfajores, Network::Fuji, Network::Mumbai]
    );
}

#[test]
fn test_network_defaults_fill_unset_fields() {
    let registry = build_registry(&load_test_config(), None).unwrap();

    let alfajores = registry.get(Network::Alfajores).unwrap();
    assert_eq!(
        alfajores.confirmations(),
        TransactionConfig::for_network(Network::Alfajores).confirmations
    );

    // explicit values win over the table
    assert_eq!(registry.get(Network::Fuji).unwrap().confirmations(), 5);

    let mumbai = registry.get(Network::Mumbai).unwrap();
    assert_eq!(mumbai.overrides(), &TxOverrides::NONE.gas_limit(500_000));
    assert_eq!(
        mumbai.confirmations(),
        TransactionConfig::for_network(Network::Mumbai).confirmations
    );
}

#[test]
fn test_without_network_defaults() {
    let config = Config::from_toml_str(
        r#"
        network_defaults = false
        networks = ["alfajores", "fuji"]
        "#,
    )
    .unwrap();
    let registry = build_registry(&config, None).unwrap();

    for connection in registry.get_all() {
        assert_eq!(connection.confirmations(), 0);
        assert!(connection.overrides().is_empty());
    }
}

#[test]
fn test_summary_reflects_connections() {
    let registry = build_registry(&load_test_config(), Some(TEST_KEY)).unwrap();
    let summaries = summarize(&registry);

    assert_eq!(summaries.len(), 3);
    for summary in &summaries {
        assert_eq!(summary.connection, ConnectionKind::Signer);
        assert_eq!(
            summary.address,
            Some(registry.get_address(summary.network).unwrap())
        );
    }

    let unsigned = build_registry(&load_test_config(), None).unwrap();
    let kinds: Vec<_> = summarize(&unsigned)
        .into_iter()
        .map(|s| s.connection)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ConnectionKind::Provider,
            ConnectionKind::Provider,
            ConnectionKind::Unregistered,
        ]
    );
}

#[test]
fn test_bad_private_key_fails_build() {
    assert!(build_registry(&load_test_config(), Some("not a key")).is_err());
}

#[test]
fn test_malformed_config_is_rejected() {
    assert!(Config::from_toml_str("networks = 3").is_err());
    assert!(Config::from_toml_str(r#"networks = ["nowhere"]"#).is_err());
}

#[tokio::test]
async fn test_ready_requires_every_provider() {
    let registry = build_registry(&load_test_config(), None).unwrap();

    // mumbai has no rpc_url, so this fails before any request is sent
    let err = check_ready(&registry, &Metrics::new()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::MissingProvider(Network::Mumbai))
    ));
}

#[tokio::test]
async fn test_ready_flags_unexpected_chain_id() {
    let test1 = Asserter::new();
    let test2 = Asserter::new();
    let networks = [Network::Test1, Network::Test2];
    let mut registry = ConnectionRegistry::from_networks(networks).unwrap();
    registry
        .register_provider(Network::Test1, mocked_provider(&test1))
        .unwrap();
    registry
        .register_provider(Network::Test2, mocked_provider(&test2))
        .unwrap();

    test1.push_success(&U64::from(31337));
    // mainnet id where a local devnet is expected
    test2.push_success(&U64::from(1));

    // a mismatch is reported but does not fail the check
    let ready = check_ready(&registry, &Metrics::new()).await.unwrap();
    assert_eq!(ready, vec![(Network::Test1, 31337), (Network::Test2, 1)]);
    assert_eq!(chain_id_mismatches(&ready), vec![(Network::Test2, 1)]);
}
