//! Wallet bootstrap subsystem.
//!
//! # Data Flow
//! ```text
//! WalletEnvironment
//!     → capabilities.rs (poll until wallet, signer factory, enigma factory all present)
//!     → sequencer.rs    (suggest chain → enable → accounts → client → account record)
//!     → ClientState::Ready, or BootstrapError naming the failed step
//! ```
//!
//! # Design Decisions
//! - The wait is bounded; a missing provider is a typed failure
//! - No step is retried
//! - The sequencer returns its result; publication belongs to the session

pub mod capabilities;
pub mod error;
pub mod sequencer;

pub use capabilities::{wait_for_capabilities, WalletCapabilities};
pub use error::BootstrapError;
pub use sequencer::{bootstrap, BootstrapOptions};
