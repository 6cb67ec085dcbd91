//! Rules module - move legality, crush detection, removal, and gravity
//!
//! [`Rules`] borrows exactly one [`Board`] and holds no state of its own, so
//! every call reads and mutates the board it was built on.
//!
//! A turn looks like:
//!
//! 1. [`Rules::is_move_type_valid`] accepts or rejects a swap
//! 2. [`Board::flip_candies`] performs it
//! 3. [`Rules::get_candy_crushes`] + [`Rules::remove_crushes`] clear the runs
//! 4. [`Rules::move_candies_down`] applies gravity and refills
//! 5. repeat 3-4 until no crushes remain (cascade)

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::BoardError;
use crate::scoring::crush_score;
use crate::types::{Axis, Candy, Color, Direction, Position, MAX_BOARD_SIZE, MIN_CRUSH_LEN};

/// A proposed swap of `candy` with its neighbor in `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub candy: Candy,
    pub direction: Direction,
}

impl Move {
    pub fn new(candy: Candy, direction: Direction) -> Self {
        Self { candy, direction }
    }

    /// Slot the candy would move into on a `size x size` board
    pub fn target(&self, size: usize) -> Option<Position> {
        self.candy.position().step(self.direction, size)
    }
}

/// A maximal run of at least three same-colored candies in one row or column
///
/// Cells are listed left-to-right (horizontal) or top-to-bottom (vertical).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crush {
    pub axis: Axis,
    pub color: Color,
    pub cells: ArrayVec<Position, MAX_BOARD_SIZE>,
}

impl Crush {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// How [`Rules::prepare_new_game_with`] deals the opening board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DealPolicy {
    /// Every slot gets an independent random color; runs may exist at deal time
    #[default]
    Random,
    /// Colors that would complete a run are redrawn
    NoInitialCrushes,
}

impl DealPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" => Some(DealPolicy::Random),
            "no-crushes" | "no_crushes" | "nocrushes" => Some(DealPolicy::NoInitialCrushes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DealPolicy::Random => "random",
            DealPolicy::NoInitialCrushes => "no-crushes",
        }
    }
}

/// Policy layer bound to one board
#[derive(Debug)]
pub struct Rules<'a> {
    board: &'a mut Board,
}

impl<'a> Rules<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    /// Check if swapping `candy` with its neighbor in `direction` would put
    /// either swapped cell inside a run of three or more.
    ///
    /// Never mutates the board: the swap is evaluated on colors only.
    /// Off-grid or empty neighbors make the move invalid.
    pub fn is_move_type_valid(&self, candy: &Candy, direction: Direction) -> bool {
        let size = self.board.size();
        let from = candy.position();
        let Some(to) = from.step(direction, size) else {
            return false;
        };
        let (Some(from_color), Some(to_color)) = (self.board.color_at(from), self.board.color_at(to))
        else {
            return false;
        };

        let swapped = |pos: Position| -> Option<Color> {
            if pos == from {
                Some(to_color)
            } else if pos == to {
                Some(from_color)
            } else {
                self.board.color_at(pos)
            }
        };

        run_through(to, from_color, size, &swapped) || run_through(from, to_color, size, &swapped)
    }

    /// Every maximal run of length >= 3, all rows first (top to bottom, each
    /// left to right), then all columns (left to right, each top to bottom).
    ///
    /// A cell in both a horizontal and a vertical run appears in both crushes.
    pub fn get_candy_crushes(&self) -> Vec<Crush> {
        let size = self.board.size();
        let mut crushes = Vec::new();
        for row in 0..size {
            scan_line(self.board, Axis::Horizontal, row, &mut crushes);
        }
        for col in 0..size {
            scan_line(self.board, Axis::Vertical, col, &mut crushes);
        }
        crushes
    }

    /// Remove every candy covered by `crushes` and score each crush separately.
    ///
    /// Each crush scores its own length, so a cell shared by two crushes counts
    /// twice. The candy reported with each score update is the candy that
    /// occupied the crush's first cell before any removal. Returns the points
    /// awarded.
    pub fn remove_crushes(&mut self, crushes: &[Crush]) -> Result<u32, BoardError> {
        let mut representatives = Vec::with_capacity(crushes.len());
        for crush in crushes {
            let first = match crush.cells.first() {
                Some(pos) => self.board.candy_at(pos.row, pos.col)?,
                None => None,
            };
            representatives.push(first);
        }

        let mut awarded = 0u32;
        for (crush, representative) in crushes.iter().zip(representatives) {
            if crush.is_empty() {
                continue;
            }
            for pos in &crush.cells {
                self.board.remove_candy_at(pos.row, pos.col)?;
            }
            let points = crush_score(crush.len());
            self.board.add_score(points, representative);
            awarded = awarded.saturating_add(points);
        }
        Ok(awarded)
    }

    /// Apply gravity column by column, then refill the gaps at the top.
    ///
    /// Candies keep their relative order; each relocated candy gets exactly one
    /// `Move` event no matter how far it falls. New candies are added top-down,
    /// column by column, drawing colors from the board's RNG.
    pub fn move_candies_down(&mut self) -> Result<(), BoardError> {
        let size = self.board.size();
        for col in 0..size {
            let mut write = size;
            for row in (0..size).rev() {
                if self.board.candy_at(row, col)?.is_none() {
                    continue;
                }
                write -= 1;
                if write != row {
                    self.board
                        .relocate_candy(Position::new(row, col), Position::new(write, col))?;
                }
            }
            for row in 0..write {
                self.board.add_random_candy_at(row, col)?;
            }
        }
        Ok(())
    }

    /// Clear the board, reset the score, and deal a full random board
    pub fn prepare_new_game(&mut self) -> Result<(), BoardError> {
        self.prepare_new_game_with(DealPolicy::Random)
    }

    pub fn prepare_new_game_with(&mut self, policy: DealPolicy) -> Result<(), BoardError> {
        self.board.clear();
        self.board.reset_score();
        match policy {
            DealPolicy::Random => self.move_candies_down(),
            DealPolicy::NoInitialCrushes => {
                let size = self.board.size();
                for col in 0..size {
                    for row in 0..size {
                        let color = loop {
                            let color = self.board.rng_mut().next_color();
                            if !self.completes_run(row, col, color) {
                                break color;
                            }
                        };
                        self.board.add_candy_at(row, col, color)?;
                    }
                }
                Ok(())
            }
        }
    }

    // Column-major dealing fills the two cells above and the two to the left first.
    fn completes_run(&self, row: usize, col: usize, color: Color) -> bool {
        let same = |r: usize, c: usize| self.board.color_at(Position::new(r, c)) == Some(color);
        (row >= 2 && same(row - 1, col) && same(row - 2, col))
            || (col >= 2 && same(row, col - 1) && same(row, col - 2))
    }

    /// All legal moves, candies in row-major order, directions in
    /// [`Direction::ALL`] order
    pub fn valid_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for candy in self.board.candies() {
            for direction in Direction::ALL {
                if self.is_move_type_valid(&candy, direction) {
                    moves.push(Move::new(candy, direction));
                }
            }
        }
        moves
    }

    pub fn has_valid_move(&self) -> bool {
        self.board
            .candies()
            .any(|candy| Direction::ALL.iter().any(|d| self.is_move_type_valid(&candy, *d)))
    }

    /// A legal move chosen uniformly with the board's RNG, or None when stuck
    pub fn get_random_valid_move(&mut self) -> Option<Move> {
        let moves = self.valid_moves();
        let idx = self.board.rng_mut().choose_index(moves.len())?;
        moves.get(idx).copied()
    }
}

/// Check if `pos` (holding `color` under `color_of`) sits in a horizontal or
/// vertical run of at least [`MIN_CRUSH_LEN`].
fn run_through<F>(pos: Position, color: Color, size: usize, color_of: &F) -> bool
where
    F: Fn(Position) -> Option<Color>,
{
    let count = |direction: Direction| {
        let mut n = 0;
        let mut cur = pos;
        while let Some(next) = cur.step(direction, size) {
            if color_of(next) != Some(color) {
                break;
            }
            n += 1;
            cur = next;
        }
        n
    };

    1 + count(Direction::Left) + count(Direction::Right) >= MIN_CRUSH_LEN
        || 1 + count(Direction::Up) + count(Direction::Down) >= MIN_CRUSH_LEN
}

fn scan_line(board: &Board, axis: Axis, line: usize, out: &mut Vec<Crush>) {
    let size = board.size();
    let at = |i: usize| match axis {
        Axis::Horizontal => Position::new(line, i),
        Axis::Vertical => Position::new(i, line),
    };

    let mut start = 0;
    while start < size {
        let Some(color) = board.color_at(at(start)) else {
            start += 1;
            continue;
        };
        let mut end = start + 1;
        while end < size && board.color_at(at(end)) == Some(color) {
            end += 1;
        }
        if end - start >= MIN_CRUSH_LEN {
            out.push(Crush {
                axis,
                color,
                cells: (start..end).map(&at).collect(),
            });
        }
        start = end;
    }
}
