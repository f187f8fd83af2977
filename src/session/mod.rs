//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! DexSession::mount(env)
//!     → bootstrap (once)
//!     → watch cell: ClientState::Loading → ClientState::Ready
//!     → view(): Loading | Ready { view-key inputs, pairs inputs }
//! ```
//!
//! # Design Decisions
//! - Exactly one writer (the session), any number of readers
//! - Partial client states are unrepresentable
//! - The view-key cell is written only through `set_view_key`

pub mod app;
pub mod state;

pub use app::{ContractAddresses, DexSession, PairsInputs, SessionError, SessionView, ViewKeyInputs};
pub use state::{ClientState, ViewKey, ViewKeyState};
