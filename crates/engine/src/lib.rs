//! Session engine - drives one board through the turn cycle
//!
//! The core crate exposes the individual board and rules operations; this
//! crate owns exactly one board per [`GameSession`] and sequences those
//! operations (swap, crush, fall, cascade) behind a small state machine.
//! Sessions share nothing, so any number of games can run side by side.

pub mod config;
pub mod session;

pub use candy_crush_core as core;
pub use candy_crush_types as types;

pub use config::GameConfig;
pub use session::{CascadeStep, GameSession, Phase, SessionError};
