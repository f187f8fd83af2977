//! Watch-only wallet backed by configuration.
//!
//! Lists the accounts named in the config file and tracks which chains were
//! suggested and enabled. It holds no keys, so signing and message
//! encryption are refused.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::chain::ChainDescriptor;
use crate::client::types::{SignResponse, StdSignDoc};
use crate::config::schema::WalletConfig;
use crate::wallet::provider::{
    AccountData, EnigmaUtils, EnigmaUtilsFactory, OfflineSigner, OfflineSignerFactory,
    WalletEnvironment, WalletError, WalletHandle, WalletResult,
};

#[derive(Debug, Default)]
struct Registry {
    suggested: HashSet<String>,
    enabled: HashSet<String>,
}

#[derive(Debug)]
struct Inner {
    accounts: Vec<AccountData>,
    registry: Mutex<Registry>,
}

/// Watch-only wallet environment.
#[derive(Debug, Clone)]
pub struct ConfiguredWallet {
    inner: Arc<Inner>,
}

impl ConfiguredWallet {
    pub fn new(accounts: Vec<AccountData>) -> Self {
        Self {
            inner: Arc::new(Inner {
                accounts,
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    pub fn from_config(config: &WalletConfig) -> Self {
        Self::new(config.accounts.clone())
    }

    /// Whether `chain_id` has been enabled.
    pub fn is_enabled(&self, chain_id: &str) -> bool {
        self.inner
            .registry
            .lock()
            .map(|r| r.enabled.contains(chain_id))
            .unwrap_or(false)
    }
}

impl WalletEnvironment for ConfiguredWallet {
    fn wallet(&self) -> Option<Arc<dyn WalletHandle>> {
        Some(self.inner.clone())
    }

    fn offline_signer_factory(&self) -> Option<Arc<dyn OfflineSignerFactory>> {
        Some(self.inner.clone())
    }

    fn enigma_utils_factory(&self) -> Option<Arc<dyn EnigmaUtilsFactory>> {
        Some(self.inner.clone())
    }
}

#[async_trait]
impl WalletHandle for Inner {
    async fn experimental_suggest_chain(&self, descriptor: &ChainDescriptor) -> WalletResult<()> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| WalletError::Provider("registry lock poisoned".to_string()))?;
        if registry.suggested.insert(descriptor.chain_id.to_string()) {
            tracing::debug!(
                chain_id = descriptor.chain_id,
                "Chain registered with watch-only wallet"
            );
        }
        Ok(())
    }

    async fn enable(&self, chain_id: &str) -> WalletResult<()> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| WalletError::Provider("registry lock poisoned".to_string()))?;
        if !registry.suggested.contains(chain_id) {
            return Err(WalletError::UnknownChain(chain_id.to_string()));
        }
        registry.enabled.insert(chain_id.to_string());
        Ok(())
    }
}

impl OfflineSignerFactory for Inner {
    fn get_offline_signer(&self, _chain_id: &str) -> Arc<dyn OfflineSigner> {
        Arc::new(WatchOnlySigner {
            accounts: self.accounts.clone(),
        })
    }
}

impl EnigmaUtilsFactory for Inner {
    fn get_enigma_utils(&self, _chain_id: &str) -> Arc<dyn EnigmaUtils> {
        Arc::new(NoEncryption)
    }
}

struct WatchOnlySigner {
    accounts: Vec<AccountData>,
}

#[async_trait]
impl OfflineSigner for WatchOnlySigner {
    async fn get_accounts(&self) -> WalletResult<Vec<AccountData>> {
        Ok(self.accounts.clone())
    }

    async fn sign(&self, _signer_address: &str, _doc: &StdSignDoc) -> WalletResult<SignResponse> {
        Err(WalletError::Unsupported(
            "watch-only wallet cannot sign".to_string(),
        ))
    }
}

struct NoEncryption;

#[async_trait]
impl EnigmaUtils for NoEncryption {
    async fn encrypt(
        &self,
        _contract_code_hash: &str,
        _msg: &serde_json::Value,
    ) -> WalletResult<Vec<u8>> {
        Err(WalletError::Unsupported(
            "watch-only wallet cannot encrypt contract messages".to_string(),
        ))
    }

    async fn decrypt(&self, _ciphertext: &[u8], _nonce: &[u8]) -> WalletResult<Vec<u8>> {
        Err(WalletError::Unsupported(
            "watch-only wallet cannot decrypt contract messages".to_string(),
        ))
    }
}
