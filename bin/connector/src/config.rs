use eyre::WrapErr;
use registry::RegistrySettings;
use serde::Deserialize;
use std::path::Path;

/// Top-level connector configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Networks to connect to, as a list of names or a table per network
    pub networks: RegistrySettings,

    /// Fill confirmations and overrides the file leaves unset from the
    /// built-in per-network table
    #[serde(default = "default_network_defaults")]
    pub network_defaults: bool,

    /// Port for the Prometheus exporter; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

const fn default_network_defaults() -> bool {
    true
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;

        Ok(config)
    }
}
