//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wallet::AccountData;

/// Well-known AMM pair factory contract.
pub const AMM_FACTORY_ADDRESS: &str = "secret1d3de9fsj0m6jkju94sc8yzecw7f6tfklydrwvc";

/// Well-known order book factory contract.
pub const ORDERS_FACTORY_ADDRESS: &str = "secret1lrw7twt6n427hv9ke7fk245s9qmwyjstk7ene8";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DexConfig {
    /// Wallet handshake timing.
    pub bootstrap: BootstrapConfig,

    /// LCD client settings.
    pub client: ClientConfig,

    /// Contract addresses handed to the pairs and view-key views.
    pub contracts: ContractsConfig,

    /// Accounts exposed by the watch-only wallet.
    pub wallet: WalletConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet handshake timing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Interval between capability probes in milliseconds.
    pub poll_interval_ms: u64,

    /// Give up waiting for wallet capabilities after this many seconds.
    pub capability_timeout_secs: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            capability_timeout_secs: 30,
        }
    }
}

impl BootstrapConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn capability_timeout(&self) -> Duration {
        Duration::from_secs(self.capability_timeout_secs)
    }
}

/// LCD client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Point the client at another LCD (local node, test double).
    /// The descriptor suggested to the wallet is unaffected.
    pub rest_override: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            rest_override: None,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Factory contracts the exchange views operate on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub amm_factory_address: String,
    pub orders_factory_address: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            amm_factory_address: AMM_FACTORY_ADDRESS.to_string(),
            orders_factory_address: ORDERS_FACTORY_ADDRESS.to_string(),
        }
    }
}

/// Watch-only wallet contents.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    pub accounts: Vec<AccountData>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DexConfig::default();
        assert_eq!(config.bootstrap.poll_interval(), Duration::from_millis(10));
        assert_eq!(config.bootstrap.capability_timeout(), Duration::from_secs(30));
        assert_eq!(config.client.request_timeout_secs, 30);
        assert!(config.client.rest_override.is_none());
        assert_eq!(config.contracts.amm_factory_address, AMM_FACTORY_ADDRESS);
        assert!(config.wallet.accounts.is_empty());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let raw = r#"
            [bootstrap]
            capability_timeout_secs = 5

            [[wallet.accounts]]
            address = "secret1abc"
        "#;
        let config: DexConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.bootstrap.capability_timeout_secs, 5);
        assert_eq!(config.bootstrap.poll_interval_ms, 10);
        assert_eq!(config.wallet.accounts[0].address, "secret1abc");
        assert_eq!(config.wallet.accounts[0].algo, "secp256k1");
    }
}
