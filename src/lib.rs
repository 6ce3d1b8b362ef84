//! MTG Table - authoritative state engine for shared card tables
//!
//! Clients send actions; a session validates each one, expands it into
//! invertible effects, applies them and records the transaction so it can be
//! undone or replayed later.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod undo;
pub mod zones;

pub use config::SessionConfig;
pub use error::{Result, TableError};
pub use game::{Action, DispatchOutcome, Effect, GameSession, GameState};
pub use zones::Zone;
