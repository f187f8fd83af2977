//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and timeouts > 0)
//! - Check addresses carry the chain's account prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DexConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::chain::HOLODECK_2;
use crate::config::schema::DexConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub fn validate_config(config: &DexConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.bootstrap.poll_interval_ms == 0 {
        errors.push(ValidationError::new("bootstrap.poll_interval_ms", "must be greater than 0"));
    }
    if config.bootstrap.capability_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "bootstrap.capability_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.client.request_timeout_secs == 0 {
        errors.push(ValidationError::new("client.request_timeout_secs", "must be greater than 0"));
    }

    if let Some(rest) = &config.client.rest_override {
        match Url::parse(rest) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "client.rest_override",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new("client.rest_override", e.to_string())),
        }
    }

    for (field, address) in [
        ("contracts.amm_factory_address", &config.contracts.amm_factory_address),
        ("contracts.orders_factory_address", &config.contracts.orders_factory_address),
    ] {
        if !HOLODECK_2.is_account_address(address) {
            errors.push(ValidationError::new(
                field,
                format!("'{}' is not a secret address", address),
            ));
        }
    }

    for (i, account) in config.wallet.accounts.iter().enumerate() {
        if !HOLODECK_2.is_account_address(&account.address) {
            errors.push(ValidationError::new(
                format!("wallet.accounts[{}].address", i),
                format!("'{}' is not a secret address", account.address),
            ));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::AccountData;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&DexConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = DexConfig::default();
        config.bootstrap.poll_interval_ms = 0;
        config.client.request_timeout_secs = 0;
        config.client.rest_override = Some("ftp://node".to_string());
        config.contracts.orders_factory_address = "cosmos1xyz".to_string();
        config.wallet.accounts.push(AccountData {
            address: "bogus".to_string(),
            algo: "secp256k1".to_string(),
            pubkey: String::new(),
        });

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "bootstrap.poll_interval_ms",
                "client.request_timeout_secs",
                "client.rest_override",
                "contracts.orders_factory_address",
                "wallet.accounts[0].address",
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = DexConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
