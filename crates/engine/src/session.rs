//! Game session - one board, its rules, and the turn state machine
//!
//! ```text
//! Empty --new_game--> Idle --try_swap--> CrushPending --crush_once--> CrushPending (cascade)
//!                       ^                                     |
//!                       +-------------------------------------+--> GameOver (no valid move)
//! ```
//!
//! Only `Idle` accepts a player swap. `crush_once` performs one remove + fall
//! cycle so a view can animate each step; `settle` runs the cascade to the end.

use crate::config::GameConfig;
use crate::core::{Board, BoardError, BoardEvent, Crush, Move, Rules, SimpleRng};
use crate::types::Direction;

/// Where a session is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game dealt yet
    Empty,
    /// Waiting for a player swap
    Idle,
    /// Crushes exist on the board and must be cleared before the next swap
    CrushPending,
    /// Stable board with no valid move left
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::Idle => "idle",
            Phase::CrushPending => "crushPending",
            Phase::GameOver => "gameOver",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("swap not accepted while the session is {}", .0.as_str())]
    NotIdle(Phase),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Result of one remove + fall cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    pub crushes: Vec<Crush>,
    pub points: u32,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    config: GameConfig,
    phase: Phase,
    games_started: u32,
    moves_played: u32,
    cascade_steps: u32,
}

impl GameSession {
    /// Create a session with an empty board; call [`GameSession::new_game`] to deal
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let board = Board::with_rng(config.board_size, SimpleRng::new(config.seed))?;
        Ok(Self {
            board,
            config,
            phase: Phase::Empty,
            games_started: 0,
            moves_played: 0,
            cascade_steps: 0,
        })
    }

    /// Create a session around an existing board (positions set up by hand)
    pub fn from_board(board: Board) -> Self {
        let config = GameConfig {
            board_size: board.size(),
            ..GameConfig::default()
        };
        let mut session = Self {
            board,
            config,
            phase: Phase::Empty,
            games_started: 0,
            moves_played: 0,
            cascade_steps: 0,
        };
        session.phase = session.phase_after_settle_check();
        session
    }

    fn rules(&mut self) -> Rules<'_> {
        Rules::new(&mut self.board)
    }

    /// Clear the board, reset the score, and deal a new board.
    ///
    /// Allowed from any phase; there is no in-flight work to cancel.
    pub fn new_game(&mut self) -> Result<(), SessionError> {
        let policy = self.config.deal_policy;
        self.rules().prepare_new_game_with(policy)?;
        self.games_started += 1;
        self.moves_played = 0;
        self.cascade_steps = 0;
        self.phase = self.phase_after_settle_check();
        Ok(())
    }

    fn phase_after_settle_check(&mut self) -> Phase {
        let rules = self.rules();
        if !rules.get_candy_crushes().is_empty() {
            Phase::CrushPending
        } else if rules.has_valid_move() {
            Phase::Idle
        } else {
            Phase::GameOver
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn cascade_steps(&self) -> u32 {
        self.cascade_steps
    }

    /// Check a move against the rules without applying it
    pub fn is_move_valid(&mut self, mv: &Move) -> bool {
        self.rules().is_move_type_valid(&mv.candy, mv.direction)
    }

    /// Build the move for the candy at `cell_id`.
    ///
    /// Fails on malformed or off-board ids; an empty slot yields `Ok(None)`.
    pub fn move_at_cell(
        &self,
        cell_id: &str,
        direction: Direction,
    ) -> Result<Option<Move>, SessionError> {
        let candy = self.board.candy_at_cell_id(cell_id)?;
        Ok(candy.map(|candy| Move::new(candy, direction)))
    }

    /// Swap the move's candy with its neighbor if the rules allow it.
    ///
    /// Returns `Ok(false)` and leaves the board untouched for an invalid move
    /// (including a stale candy no longer at its recorded slot).
    pub fn try_swap(&mut self, mv: Move) -> Result<bool, SessionError> {
        if self.phase != Phase::Idle {
            return Err(SessionError::NotIdle(self.phase));
        }

        let current = self.board.candy_at(mv.candy.row, mv.candy.col)?;
        let Some(candy) = current.filter(|c| c.id == mv.candy.id) else {
            return Ok(false);
        };
        if !self.rules().is_move_type_valid(&candy, mv.direction) {
            return Ok(false);
        }
        let Some(neighbor) = self.board.candy_in_direction(&candy, mv.direction)? else {
            return Ok(false);
        };

        self.board.flip_candies(&candy, &neighbor)?;
        self.moves_played += 1;
        self.phase = Phase::CrushPending;
        Ok(true)
    }

    /// Remove the current crushes and apply one round of gravity.
    ///
    /// Returns `None` when the board has nothing to crush. Afterwards the
    /// session is `CrushPending` if the fall created new runs, otherwise
    /// `Idle` or `GameOver`.
    pub fn crush_once(&mut self) -> Result<Option<CascadeStep>, SessionError> {
        if self.phase == Phase::Empty {
            return Ok(None);
        }

        let mut rules = self.rules();
        let crushes = rules.get_candy_crushes();
        if crushes.is_empty() {
            self.phase = self.phase_after_settle_check();
            return Ok(None);
        }
        let points = rules.remove_crushes(&crushes)?;
        rules.move_candies_down()?;

        self.cascade_steps += 1;
        self.phase = self.phase_after_settle_check();
        Ok(Some(CascadeStep { crushes, points }))
    }

    /// Run crush/fall cycles until the board is stable
    pub fn settle(&mut self) -> Result<Vec<CascadeStep>, SessionError> {
        let mut steps = Vec::new();
        while let Some(step) = self.crush_once()? {
            steps.push(step);
        }
        Ok(steps)
    }

    /// Swap and settle in one call; `Ok(None)` when the move is rejected
    pub fn play(&mut self, mv: Move) -> Result<Option<Vec<CascadeStep>>, SessionError> {
        if !self.try_swap(mv)? {
            return Ok(None);
        }
        self.settle().map(Some)
    }

    /// A random valid move, or `None` when the player is stuck
    pub fn hint(&mut self) -> Option<Move> {
        self.rules().get_random_valid_move()
    }

    /// Take all queued board events, oldest first
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.board.drain_events()
    }
}
