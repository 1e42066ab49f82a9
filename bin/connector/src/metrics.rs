//! Prometheus metrics for the connector.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use config::Network;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Aggregated metrics for the connector.
///
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_gauge!("connector_networks", "Number of configured networks");
        describe_counter!(
            "connector_ready_checks_total",
            "Total number of readiness checks run"
        );
        describe_counter!(
            "connector_ready_failures_total",
            "Total failed readiness checks by network"
        );
        describe_histogram!(
            "connector_ready_duration_seconds",
            "Time until every provider answered, in seconds"
        );
    }

    /// Set the number of configured networks.
    pub fn set_networks(&self, count: usize) {
        gauge!("connector_networks").set(count as f64);
    }

    /// Record a successful readiness check.
    pub fn record_ready(&self, duration: Duration) {
        counter!("connector_ready_checks_total").increment(1);
        histogram!("connector_ready_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record a failed readiness check, labelled by the network that failed
    /// when it is known.
    pub fn record_ready_failure(&self, network: Option<Network>) {
        counter!("connector_ready_checks_total").increment(1);
        let network = network.map_or("unknown", |network| network.as_str());
        counter!("connector_ready_failures_total", "network" => network).increment(1);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
