//! Wallet provider subsystem.
//!
//! # Data Flow
//! ```text
//! WalletEnvironment (injected by the host)
//!     → WalletHandle        (suggest chain, enable)
//!     → OfflineSignerFactory → OfflineSigner (accounts, signing)
//!     → EnigmaUtilsFactory   → EnigmaUtils   (contract message encryption)
//! ```
//!
//! # Security Constraints
//! - Keys never leave the provider; the client only holds trait objects
//! - Account data handed out is a read-only copy
//! - Every provider call may reject; rejections are returned, never dropped

pub mod configured;
pub mod provider;

pub use configured::ConfiguredWallet;
pub use provider::{
    AccountData, EnigmaUtils, EnigmaUtilsFactory, OfflineSigner, OfflineSignerFactory,
    WalletEnvironment, WalletError, WalletHandle, WalletResult, NONCE_LEN,
};
