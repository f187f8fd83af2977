use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use secret_dex_client::config::{load_config, ConfigError, DexConfig, ObservabilityConfig};
use secret_dex_client::observability::{logging, metrics};
use secret_dex_client::session::SessionView;
use secret_dex_client::wallet::ConfiguredWallet;
use secret_dex_client::{DexSession, FeeConfig, HOLODECK_2};

#[derive(Parser)]
#[command(name = "dex-client")]
#[command(about = "Wallet bootstrap and account inspection for the Secret DEX", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chain descriptor suggested to the wallet
    Chain,
    /// Print the fee ceilings the client is built with
    Fees,
    /// Bootstrap against the configured wallet and print the account record
    Connect,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Configured log level is unknown; report with the defaults.
            let _ = logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability)?;

    tracing::info!("dex-client v0.1.0 starting");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e);
    }

    Ok(())
}

/// Configuration from `path`, or the defaults when no file is given.
fn load(path: Option<&Path>) -> Result<DexConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(DexConfig::default()),
    }
}

async fn run(command: Commands, config: &DexConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Chain => {
            println!("{}", serde_json::to_string_pretty(&HOLODECK_2)?);
        }
        Commands::Fees => {
            println!("{}", serde_json::to_string_pretty(&FeeConfig::bootstrap())?);
        }
        Commands::Connect => connect(config).await?,
    }
    Ok(())
}

async fn connect(config: &DexConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        accounts = config.wallet.accounts.len(),
        capability_timeout_secs = config.bootstrap.capability_timeout_secs,
        "Connecting watch-only wallet"
    );

    let wallet = ConfiguredWallet::from_config(&config.wallet);
    let session = DexSession::from_config(config);

    tracing::info!("Loading...");
    session.mount(&wallet).await?;

    match session.view() {
        SessionView::Ready { pairs, .. } => {
            let output = serde_json::json!({
                "contracts": session.contracts(),
                "account": pairs.client.account_data(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        SessionView::Loading => {
            tracing::warn!("Session still loading after mount");
        }
    }

    Ok(())
}
