//! Chain identity subsystem.
//!
//! # Data Flow
//! ```text
//! descriptor.rs (HOLODECK_2 constant)
//!     → wallet provider (experimental_suggest_chain / enable)
//!     → client (REST endpoint, fee denomination)
//! ```
//!
//! # Design Decisions
//! - The descriptor is a `const` built from `&'static` data only
//! - Nothing derives, overrides, or randomizes a descriptor field
//! - Serialization matches the camelCase shape wallet extensions expect

pub mod descriptor;

pub use descriptor::{
    Bech32Config, Bip44, ChainDescriptor, Currency, GasPriceStep, HOLODECK_2, SCRT,
};
