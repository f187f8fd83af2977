//! Secret Network DEX client library.
//!
//! Connects a wallet provider, registers the holodeck-2 chain with it, and
//! builds the authenticated contract client the exchange views use.

pub mod bootstrap;
pub mod chain;
pub mod client;
pub mod config;
pub mod observability;
pub mod session;
pub mod wallet;

pub use bootstrap::{bootstrap, BootstrapError, BootstrapOptions};
pub use chain::{ChainDescriptor, HOLODECK_2};
pub use client::{FeeConfig, SigningClient};
pub use config::DexConfig;
pub use session::{ClientState, DexSession, SessionView, ViewKeyState};
pub use wallet::{WalletEnvironment, WalletError};
