//! Operator CLI for per-network connections.
//!
//! - `show`: print each network's transaction settings and connection state
//! - `ready`: wait until every configured endpoint answers

use clap::{Parser, Subcommand};
use connector::{build_registry, check_ready, config::Config, log_summary, metrics, summarize};
use tracing::info;

#[derive(Parser)]
#[command(name = "connector")]
#[command(about = "Inspect and check per-network connections")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key to register as signer on every network (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print per-network settings without touching the network
    Show,

    /// Wait until every configured provider is reachable
    Ready,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Loading config: {}", cli.config);
    let config = Config::from_file(&cli.config)?;

    if let Some(port) = config.metrics_port {
        metrics::install_prometheus_exporter(port)?;
        info!("Prometheus exporter listening on port {}", port);
    }
    let metrics = metrics::Metrics::new();

    let registry = build_registry(&config, cli.private_key.as_deref())?;
    info!("Configured networks: {:?}", registry.networks());

    match cli.command {
        Command::Show => {
            log_summary(&summarize(&registry));
        }
        Command::Ready => {
            info!("Waiting for providers...");
            let ready = check_ready(&registry, &metrics).await?;
            for (network, chain_id) in ready {
                info!(%network, chain_id, "Ready");
            }
        }
    }

    Ok(())
}
