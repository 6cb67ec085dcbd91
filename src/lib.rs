//! Candy Crush (workspace facade crate).
//!
//! Re-exports the workspace crates as `candy_crush::{types, core, engine}` and
//! hosts the pieces used by the console binary: argument parsing, command
//! parsing, and the JSON-lines event log.

pub use candy_crush_core as core;
pub use candy_crush_engine as engine;
pub use candy_crush_types as types;

pub mod cli;
pub mod console;
pub mod event_log;
