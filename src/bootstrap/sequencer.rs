//! The wallet handshake, from capability detection to a ready client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::bootstrap::capabilities::wait_for_capabilities;
use crate::bootstrap::error::BootstrapError;
use crate::chain::{ChainDescriptor, HOLODECK_2};
use crate::client::{FeeConfig, SigningClient};
use crate::config::schema::{BootstrapConfig, ClientConfig};
use crate::observability::metrics;
use crate::session::state::ClientState;
use crate::wallet::WalletEnvironment;

/// Inputs to a bootstrap run beyond the wallet environment.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub poll_interval: Duration,
    pub capability_timeout: Duration,
    pub request_timeout: Duration,
    /// LCD the client talks to instead of the descriptor's `rest`.
    pub rest_override: Option<String>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self::from_config(&BootstrapConfig::default(), &ClientConfig::default())
    }
}

impl BootstrapOptions {
    pub fn from_config(bootstrap: &BootstrapConfig, client: &ClientConfig) -> Self {
        Self {
            poll_interval: bootstrap.poll_interval(),
            capability_timeout: bootstrap.capability_timeout(),
            request_timeout: client.request_timeout(),
            rest_override: client.rest_override.clone(),
        }
    }

    fn rest_url<'a>(&'a self, descriptor: &'a ChainDescriptor) -> &'a str {
        self.rest_override.as_deref().unwrap_or(descriptor.rest)
    }
}

/// Run the handshake against the [`HOLODECK_2`] descriptor.
///
/// Returns a ready [`ClientState`] or the first step that failed. Nothing is
/// retried and nothing is published; the caller decides what to do with the
/// outcome.
pub async fn bootstrap(
    env: &dyn WalletEnvironment,
    options: &BootstrapOptions,
) -> Result<ClientState, BootstrapError> {
    let started = Instant::now();
    let result = run(env, &HOLODECK_2, options).await;

    match &result {
        Ok(state) => {
            metrics::record_bootstrap_outcome("ready", started.elapsed());
            tracing::info!(
                address = state.address().unwrap_or_default(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Wallet bootstrap complete"
            );
        }
        Err(e) => {
            metrics::record_bootstrap_outcome(e.kind(), started.elapsed());
            tracing::error!(error = %e, step = e.kind(), "Wallet bootstrap failed");
        }
    }

    result
}

async fn run(
    env: &dyn WalletEnvironment,
    descriptor: &ChainDescriptor,
    options: &BootstrapOptions,
) -> Result<ClientState, BootstrapError> {
    let chain_id = descriptor.chain_id;

    // 1. Wait for the provider.
    metrics::record_bootstrap_step("detect");
    let caps = wait_for_capabilities(env, options.poll_interval, options.capability_timeout).await?;
    tracing::debug!("Wallet capabilities detected");

    // 2. Register the chain.
    metrics::record_bootstrap_step("suggest_chain");
    caps.wallet
        .experimental_suggest_chain(descriptor)
        .await
        .map_err(BootstrapError::ChainRegistration)?;
    tracing::debug!(chain_id, "Chain suggested");

    // 3. Ask for access.
    metrics::record_bootstrap_step("enable");
    caps.wallet
        .enable(chain_id)
        .await
        .map_err(BootstrapError::Authorization)?;
    tracing::info!(chain_id, "Wallet access granted");

    // 4. First managed account.
    metrics::record_bootstrap_step("accounts");
    let signer = caps.signers.get_offline_signer(chain_id);
    let accounts = signer.get_accounts().await.map_err(BootstrapError::Accounts)?;
    let account = accounts
        .into_iter()
        .next()
        .ok_or_else(|| BootstrapError::NoAccounts(chain_id.to_string()))?;

    // 5. Client bound to that account.
    metrics::record_bootstrap_step("client");
    let client = SigningClient::new(
        options.rest_url(descriptor),
        account.address.clone(),
        signer,
        caps.enigma.get_enigma_utils(chain_id),
        FeeConfig::bootstrap(),
    )
    .map_err(BootstrapError::ClientConstruction)?
    .with_request_timeout(options.request_timeout);

    // 6. On-chain record.
    metrics::record_bootstrap_step("account_fetch");
    let account_data = client
        .get_account(&account.address)
        .await
        .map_err(BootstrapError::AccountFetch)?;

    // 7. Ready.
    Ok(ClientState::Ready {
        execute: Arc::new(client),
        account_data,
    })
}
