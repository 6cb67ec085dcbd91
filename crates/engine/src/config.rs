//! Session configuration
//!
//! Settings come from environment variables. Anything missing or unusable
//! quietly becomes the default.
//!
//! - `CANDY_BOARD_SIZE`: grid size (default 8; values outside 3..=20 are ignored)
//! - `CANDY_SEED`: RNG seed (default 0)
//! - `CANDY_DEAL`: `random` or `no-crushes` (default `random`)
//! - `CANDY_EVENT_LOG`: path of a JSON-lines event log (default: disabled)

use crate::core::{BoardError, DealPolicy};
use crate::types::{DEFAULT_BOARD_SIZE, DEFAULT_SEED, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub seed: u32,
    pub deal_policy: DealPolicy,
    pub event_log: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            seed: DEFAULT_SEED,
            deal_policy: DealPolicy::Random,
            event_log: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create from any key/value source (the environment, or a map in tests)
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let board_size = get("CANDY_BOARD_SIZE")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(n))
            .unwrap_or(defaults.board_size);

        let seed = get("CANDY_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let deal_policy = get("CANDY_DEAL")
            .and_then(|s| DealPolicy::from_str(s.trim()))
            .unwrap_or(defaults.deal_policy);

        let event_log = get("CANDY_EVENT_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            board_size,
            seed,
            deal_policy,
            event_log,
        }
    }

    /// Reject sizes the board cannot be built with
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.board_size < MIN_BOARD_SIZE || self.board_size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(self.board_size));
        }
        Ok(())
    }
}
