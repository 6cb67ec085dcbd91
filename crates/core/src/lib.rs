//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the match-3 board and rules. It has **no dependencies**
//! on rendering, input, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical deals and refills
//! - **Testable**: Every rule is a synchronous call with a settled result
//! - **Portable**: Any view layer can observe it through [`BoardEvent`]s
//!
//! # Module Structure
//!
//! - [`board`]: `N x N` candy grid, placement/removal, and the event queue
//! - [`rules`]: move legality, crush detection, removal, gravity, and dealing
//! - [`rng`]: seedable LCG used for candy colors and random hints
//! - [`scoring`]: one point per crushed candy, per crush
//! - [`snapshot`]: plain color grid with a stable hash
//! - [`error`]: [`BoardError`] taxonomy
//!
//! # Example
//!
//! ```
//! use candy_crush_core::{Board, Rules, SimpleRng};
//!
//! let mut board = Board::with_rng(8, SimpleRng::new(12345)).unwrap();
//! let mut rules = Rules::new(&mut board);
//! rules.prepare_new_game().unwrap();
//!
//! // Cascade until the board is stable.
//! loop {
//!     let crushes = rules.get_candy_crushes();
//!     if crushes.is_empty() {
//!         break;
//!     }
//!     rules.remove_crushes(&crushes).unwrap();
//!     rules.move_candies_down().unwrap();
//! }
//!
//! assert!(rules.get_candy_crushes().is_empty());
//! assert!(board.is_full());
//! ```

pub mod board;
pub mod error;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod snapshot;

pub use candy_crush_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::BoardError;
pub use rng::SimpleRng;
pub use rules::{Crush, DealPolicy, Move, Rules};
pub use scoring::{crush_score, total_score};
pub use snapshot::BoardSnapshot;
pub use types::BoardEvent;
