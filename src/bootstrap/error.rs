use std::time::Duration;

use thiserror::Error;

use crate::client::ClientError;
use crate::wallet::WalletError;

/// Why a wallet bootstrap did not produce a ready client.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The provider never injected all three capabilities.
    #[error("Wallet capabilities not found after {waited:?} (missing: {missing})")]
    CapabilityNotFound { waited: Duration, missing: String },

    /// The provider refused or failed to register the chain.
    #[error("Chain registration rejected: {0}")]
    ChainRegistration(#[source] WalletError),

    /// The user declined access, or the provider failed to enable the chain.
    #[error("Authorization rejected: {0}")]
    Authorization(#[source] WalletError),

    /// The offline signer failed to list its accounts.
    #[error("Account listing failed: {0}")]
    Accounts(#[source] WalletError),

    /// The offline signer manages no accounts.
    #[error("Wallet returned no accounts for chain {0}")]
    NoAccounts(String),

    #[error("Client construction failed: {0}")]
    ClientConstruction(#[source] ClientError),

    #[error("Account fetch failed: {0}")]
    AccountFetch(#[source] ClientError),
}

impl BootstrapError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CapabilityNotFound { .. } => "capability_not_found",
            Self::ChainRegistration(_) => "chain_registration",
            Self::Authorization(_) => "authorization",
            Self::Accounts(_) => "accounts",
            Self::NoAccounts(_) => "no_accounts",
            Self::ClientConstruction(_) => "client_construction",
            Self::AccountFetch(_) => "account_fetch",
        }
    }
}
