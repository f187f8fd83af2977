//! Capabilities a wallet provider exposes to the application.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::ChainDescriptor;
use crate::client::types::{SignResponse, StdSignDoc};

/// Length of the nonce that prefixes every encrypted contract message.
pub const NONCE_LEN: usize = 32;

/// Errors reported by a wallet provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The provider does not know the requested chain.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    /// The provider cannot perform this operation.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Any other provider failure.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// An account managed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub address: String,
    #[serde(default = "default_algo")]
    pub algo: String,
    /// Base64-encoded compressed public key.
    #[serde(default)]
    pub pubkey: String,
}

fn default_algo() -> String {
    "secp256k1".to_string()
}

/// Chain registration and authorization.
#[async_trait]
pub trait WalletHandle: Send + Sync {
    /// Register a chain with the provider. May prompt the user, or do nothing
    /// if the chain id is already known.
    async fn experimental_suggest_chain(&self, descriptor: &ChainDescriptor) -> WalletResult<()>;

    /// Ask the user to grant this application access to `chain_id`.
    async fn enable(&self, chain_id: &str) -> WalletResult<()>;
}

/// Signer that never exposes key material.
#[async_trait]
pub trait OfflineSigner: Send + Sync {
    async fn get_accounts(&self) -> WalletResult<Vec<AccountData>>;

    async fn sign(&self, signer_address: &str, doc: &StdSignDoc) -> WalletResult<SignResponse>;
}

/// Contract message encryption for privacy-preserving contracts.
#[async_trait]
pub trait EnigmaUtils: Send + Sync {
    /// Encrypt `msg` for the contract identified by `contract_code_hash`.
    /// The first [`NONCE_LEN`] bytes of the output are the nonce.
    async fn encrypt(
        &self,
        contract_code_hash: &str,
        msg: &serde_json::Value,
    ) -> WalletResult<Vec<u8>>;

    async fn decrypt(&self, ciphertext: &[u8], nonce: &[u8]) -> WalletResult<Vec<u8>>;
}

pub trait OfflineSignerFactory: Send + Sync {
    fn get_offline_signer(&self, chain_id: &str) -> Arc<dyn OfflineSigner>;
}

pub trait EnigmaUtilsFactory: Send + Sync {
    fn get_enigma_utils(&self, chain_id: &str) -> Arc<dyn EnigmaUtils>;
}

/// The environment a provider injects itself into.
///
/// Each probe returns `None` until the provider has made that capability
/// available. Probes must be cheap; they are polled.
pub trait WalletEnvironment: Send + Sync {
    fn wallet(&self) -> Option<Arc<dyn WalletHandle>>;

    fn offline_signer_factory(&self) -> Option<Arc<dyn OfflineSignerFactory>>;

    fn enigma_utils_factory(&self) -> Option<Arc<dyn EnigmaUtilsFactory>>;
}
