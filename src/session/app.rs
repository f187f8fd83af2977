//! Application session: runs the bootstrap once and publishes its result.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::bootstrap::{bootstrap, BootstrapError, BootstrapOptions};
use crate::config::schema::{ContractsConfig, DexConfig};
use crate::session::state::{ClientState, ViewKey, ViewKeyState};
use crate::wallet::WalletEnvironment;

/// Errors from mounting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `mount` already ran for this session.
    #[error("Session already mounted")]
    AlreadyMounted,

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

/// The two factory contracts the exchange views work against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractAddresses {
    pub amm_factory: String,
    pub orders_factory: String,
}

impl From<&ContractsConfig> for ContractAddresses {
    fn from(config: &ContractsConfig) -> Self {
        Self {
            amm_factory: config.amm_factory_address.clone(),
            orders_factory: config.orders_factory_address.clone(),
        }
    }
}

/// Inputs for the view-key control.
#[derive(Debug, Clone)]
pub struct ViewKeyInputs {
    pub orders_factory_address: String,
    pub client: ClientState,
    pub view_key: ViewKeyState,
}

/// Inputs for the trading pairs view.
#[derive(Debug, Clone)]
pub struct PairsInputs {
    pub amm_factory_address: String,
    pub orders_factory_address: String,
    pub client: ClientState,
    pub view_key: Option<ViewKey>,
}

/// What the host should render right now.
#[derive(Debug, Clone)]
pub enum SessionView {
    Loading,
    Ready {
        view_key_button: ViewKeyInputs,
        pairs: PairsInputs,
    },
}

/// One page session.
///
/// Holds the single-writer client cell. Readers subscribe and observe exactly
/// one transition from loading to ready.
pub struct DexSession {
    contracts: ContractAddresses,
    options: BootstrapOptions,
    mounted: AtomicBool,
    client: watch::Sender<ClientState>,
    view_key: watch::Sender<ViewKeyState>,
}

impl DexSession {
    pub fn new(contracts: ContractAddresses, options: BootstrapOptions) -> Self {
        let (client, _) = watch::channel(ClientState::Loading);
        let (view_key, _) = watch::channel(ViewKeyState::default());
        Self {
            contracts,
            options,
            mounted: AtomicBool::new(false),
            client,
            view_key,
        }
    }

    pub fn from_config(config: &DexConfig) -> Self {
        Self::new(
            ContractAddresses::from(&config.contracts),
            BootstrapOptions::from_config(&config.bootstrap, &config.client),
        )
    }

    /// Run the wallet bootstrap and publish a ready client.
    ///
    /// Runs at most once per session. On failure the client stays `Loading`
    /// and the error is returned.
    pub async fn mount(&self, env: &dyn WalletEnvironment) -> Result<(), SessionError> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            tracing::warn!("Ignoring repeated session mount");
            return Err(SessionError::AlreadyMounted);
        }

        let state = bootstrap(env, &self.options).await?;
        self.client.send_replace(state);
        Ok(())
    }

    pub fn contracts(&self) -> &ContractAddresses {
        &self.contracts
    }

    /// Snapshot of the client state.
    pub fn client_state(&self) -> ClientState {
        self.client.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClientState> {
        self.client.subscribe()
    }

    /// Suspend until the client is ready.
    pub async fn wait_ready(&self) -> ClientState {
        let mut rx = self.client.subscribe();
        // The sender lives as long as `self`, so the wait only ends on ready.
        let state = match rx.wait_for(ClientState::ready).await {
            Ok(state) => state.clone(),
            Err(_) => self.client_state(),
        };
        state
    }

    pub fn view_key(&self) -> ViewKeyState {
        self.view_key.borrow().clone()
    }

    pub fn set_view_key(&self, state: ViewKeyState) {
        self.view_key.send_replace(state);
    }

    pub fn subscribe_view_key(&self) -> watch::Receiver<ViewKeyState> {
        self.view_key.subscribe()
    }

    /// Current render decision.
    pub fn view(&self) -> SessionView {
        let client = self.client_state();
        if !client.ready() {
            return SessionView::Loading;
        }

        let view_key = self.view_key();
        SessionView::Ready {
            view_key_button: ViewKeyInputs {
                orders_factory_address: self.contracts.orders_factory.clone(),
                client: client.clone(),
                view_key: view_key.clone(),
            },
            pairs: PairsInputs {
                amm_factory_address: self.contracts.amm_factory.clone(),
                orders_factory_address: self.contracts.orders_factory.clone(),
                client,
                view_key: view_key.value,
            },
        }
    }
}

impl std::fmt::Debug for DexSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DexSession")
            .field("contracts", &self.contracts)
            .field("mounted", &self.mounted.load(Ordering::SeqCst))
            .field("ready", &self.client.borrow().ready())
            .finish()
    }
}
