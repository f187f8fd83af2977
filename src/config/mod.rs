//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DexConfig (validated, immutable)
//!     → bootstrap / session / wallet / observability
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so an empty file is valid
//! - The chain descriptor is NOT configurable; it is a compile-time constant

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BootstrapConfig, ClientConfig, ContractsConfig, DexConfig, ObservabilityConfig, WalletConfig,
};
