//! Contract-interaction client subsystem.
//!
//! # Data Flow
//! ```text
//! Wallet capabilities (offline signer, enigma utils)
//!     → signing.rs (LCD REST calls with timeouts)
//!     → fees.rs    (init / exec ceilings)
//!     → types.rs   (wire shapes, ClientError)
//! ```
//!
//! # Security Constraints
//! - The client never sees key material; it asks the signer to sign
//! - Contract messages leave the process only in encrypted form

pub mod fees;
pub mod signing;
pub mod types;

pub use fees::FeeConfig;
pub use signing::SigningClient;
pub use types::{AccountRecord, ClientError, ClientResult, Coin, StdFee};
