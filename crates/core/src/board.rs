//! Board module - owns the candy grid
//!
//! The board is an `N x N` grid where each slot is empty or holds one [`Candy`].
//! Uses a flat vector in row-major order (`row * size + col`).
//! Coordinates: `(row, col)` with row 0 at the top; gravity pulls toward the last row.
//!
//! Every mutation (add, move, remove, score change) queues a [`BoardEvent`]
//! synchronously, in order. A view layer drains the queue with
//! [`Board::drain_events`] and never needs to inspect the board directly.
//! Bulk resets ([`Board::clear`], [`Board::reset_score`]) are silent.

use crate::error::BoardError;
use crate::rng::SimpleRng;
use crate::types::{
    parse_cell_id, BoardEvent, Candy, Color, Direction, Position, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};

/// The game board - `size x size` slots using flat vector storage
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    /// Flat vector of slots, row-major order (row * size + col)
    cells: Vec<Option<Candy>>,
    score: u32,
    /// Identity handed to the next created candy
    next_id: u32,
    rng: SimpleRng,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Create an empty board using the default seed
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::with_rng(size, SimpleRng::default())
    }

    /// Create an empty board that draws candy colors from `rng`
    pub fn with_rng(size: usize, rng: SimpleRng) -> Result<Self, BoardError> {
        if size < MIN_BOARD_SIZE || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
            score: 0,
            next_id: 1,
            rng,
            events: Vec::new(),
        })
    }

    /// Build a board from explicit rows of colors (`None` = empty slot).
    ///
    /// No events are queued. Fails with `InvalidSize` unless the grid is square
    /// and within the supported size range.
    pub fn from_rows<R: AsRef<[Option<Color>]>>(
        rows: &[R],
        rng: SimpleRng,
    ) -> Result<Self, BoardError> {
        let mut board = Self::with_rng(rows.len(), rng)?;
        for (row, colors) in rows.iter().enumerate() {
            let colors = colors.as_ref();
            if colors.len() != board.size {
                return Err(BoardError::InvalidSize(colors.len()));
            }
            for (col, color) in colors.iter().enumerate() {
                if let Some(color) = color {
                    board.place(row, col, *color);
                }
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (row, col), or None if off the board
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        self.index(row, col).ok_or(BoardError::OutOfBounds {
            row: row as isize,
            col: col as isize,
            size: self.size,
        })
    }

    /// Grid dimension `N`
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if position is outside the grid
    pub fn is_out_of_bounds(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_none()
    }

    /// Candy at (row, col), or None if the slot is empty
    pub fn candy_at(&self, row: usize, col: usize) -> Result<Option<Candy>, BoardError> {
        let idx = self.checked_index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Candy addressed by a cell id such as `"c4"`
    pub fn candy_at_cell_id(&self, cell_id: &str) -> Result<Option<Candy>, BoardError> {
        let pos =
            parse_cell_id(cell_id).ok_or_else(|| BoardError::InvalidCellId(cell_id.to_string()))?;
        self.candy_at(pos.row, pos.col)
    }

    /// Color at `pos`, or None when the slot is empty or off the board
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.index(pos.row, pos.col)
            .and_then(|idx| self.cells[idx])
            .map(|candy| candy.color)
    }

    /// Neighbor one step from `candy` in `direction`
    ///
    /// Fails with `OutOfBounds` when the step leaves the grid.
    pub fn candy_in_direction(
        &self,
        candy: &Candy,
        direction: Direction,
    ) -> Result<Option<Candy>, BoardError> {
        self.checked_index(candy.row, candy.col)?;
        match candy.position().step(direction, self.size) {
            Some(to) => self.candy_at(to.row, to.col),
            None => {
                let (dr, dc) = direction.offset();
                Err(BoardError::OutOfBounds {
                    row: candy.row as isize + dr,
                    col: candy.col as isize + dc,
                    size: self.size,
                })
            }
        }
    }

    /// Exchange the slots of two candies and queue one `Move` event per candy.
    ///
    /// Adjacency is the caller's responsibility (checked by the rules layer).
    pub fn flip_candies(&mut self, a: &Candy, b: &Candy) -> Result<(), BoardError> {
        let ia = self.checked_index(a.row, a.col)?;
        let ib = self.checked_index(b.row, b.col)?;
        let mut first = self.cells[ia].ok_or(BoardError::EmptySlot {
            row: a.row,
            col: a.col,
        })?;
        let mut second = self.cells[ib].ok_or(BoardError::EmptySlot {
            row: b.row,
            col: b.col,
        })?;

        let (from_a, from_b) = (first.position(), second.position());
        first.row = from_b.row;
        first.col = from_b.col;
        second.row = from_a.row;
        second.col = from_a.col;
        self.cells[ib] = Some(first);
        self.cells[ia] = Some(second);

        self.events.push(BoardEvent::Move {
            from_row: from_a.row,
            from_col: from_a.col,
            to_row: first.row,
            to_col: first.col,
            candy: first,
        });
        self.events.push(BoardEvent::Move {
            from_row: from_b.row,
            from_col: from_b.col,
            to_row: second.row,
            to_col: second.col,
            candy: second,
        });
        Ok(())
    }

    /// Move the candy at `from` into the empty slot `to`, queueing one `Move` event
    pub fn relocate_candy(&mut self, from: Position, to: Position) -> Result<Candy, BoardError> {
        let src = self.checked_index(from.row, from.col)?;
        let dst = self.checked_index(to.row, to.col)?;
        if self.cells[dst].is_some() {
            return Err(BoardError::SlotOccupied {
                row: to.row,
                col: to.col,
            });
        }
        let mut candy = self.cells[src].take().ok_or(BoardError::EmptySlot {
            row: from.row,
            col: from.col,
        })?;
        candy.row = to.row;
        candy.col = to.col;
        self.cells[dst] = Some(candy);
        self.events.push(BoardEvent::Move {
            from_row: from.row,
            from_col: from.col,
            to_row: to.row,
            to_col: to.col,
            candy,
        });
        Ok(candy)
    }

    /// Empty the slot and queue a `Remove` event.
    ///
    /// Removing from an empty slot is a no-op and returns `Ok(None)`.
    pub fn remove_candy_at(&mut self, row: usize, col: usize) -> Result<Option<Candy>, BoardError> {
        let idx = self.checked_index(row, col)?;
        let removed = self.cells[idx].take();
        if let Some(candy) = removed {
            self.events.push(BoardEvent::Remove {
                from_row: row,
                from_col: col,
                candy,
            });
        }
        Ok(removed)
    }

    /// Create a candy of `color` in an empty slot and queue an `Add` event
    pub fn add_candy_at(&mut self, row: usize, col: usize, color: Color) -> Result<Candy, BoardError> {
        let idx = self.checked_index(row, col)?;
        if self.cells[idx].is_some() {
            return Err(BoardError::SlotOccupied { row, col });
        }
        let candy = self.place(row, col, color);
        self.events.push(BoardEvent::Add {
            to_row: row,
            to_col: col,
            candy,
        });
        Ok(candy)
    }

    /// Create a candy with a color drawn from the board's RNG
    pub fn add_random_candy_at(&mut self, row: usize, col: usize) -> Result<Candy, BoardError> {
        self.checked_index(row, col)?;
        let color = self.rng.next_color();
        self.add_candy_at(row, col, color)
    }

    fn place(&mut self, row: usize, col: usize, color: Color) -> Candy {
        let candy = Candy {
            id: self.next_id,
            color,
            row,
            col,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.cells[row * self.size + col] = Some(candy);
        candy
    }

    /// Empty every slot without queueing events
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Reset the score to zero (silent)
    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// Add `delta` points and queue a `ScoreUpdate` event
    pub fn add_score(&mut self, delta: u32, last_candy: Option<Candy>) {
        self.score = self.score.saturating_add(delta);
        self.events.push(BoardEvent::ScoreUpdate {
            score: self.score,
            candy: last_candy,
        });
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// The board's random source
    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }

    /// All candies in row-major order
    pub fn candies(&self) -> impl Iterator<Item = Candy> + '_ {
        self.cells.iter().filter_map(|cell| *cell)
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Check if every slot holds a candy
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        Board::from_rows(
            &[
                [Some(Color::Red), Some(Color::Red), Some(Color::Blue)],
                [Some(Color::Green), None, Some(Color::Yellow)],
                [Some(Color::Blue), Some(Color::Purple), Some(Color::Orange)],
            ],
            SimpleRng::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(8).unwrap();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 7), Some(7));
        assert_eq!(board.index(1, 0), Some(8));
        assert_eq!(board.index(7, 7), Some(63));
        assert_eq!(board.index(8, 0), None);
        assert_eq!(board.index(0, 8), None);
    }

    #[test]
    fn test_size_limits() {
        assert_eq!(Board::new(2).unwrap_err(), BoardError::InvalidSize(2));
        assert_eq!(Board::new(21).unwrap_err(), BoardError::InvalidSize(21));
        assert_eq!(Board::new(3).unwrap().size(), 3);
        assert_eq!(Board::new(20).unwrap().size(), 20);
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        let rows: Vec<Vec<Option<Color>>> = vec![vec![None; 3], vec![None; 2], vec![None; 3]];
        assert!(Board::from_rows(&rows, SimpleRng::new(1)).is_err());
    }

    #[test]
    fn test_from_rows_positions_match_slots() {
        let board = small_board();
        for candy in board.candies() {
            assert_eq!(board.candy_at(candy.row, candy.col).unwrap(), Some(candy));
        }
        assert_eq!(board.occupied_count(), 8);
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let board = small_board();
        let mut ids: Vec<u32> = board.candies().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_flip_keeps_identity() {
        let mut board = small_board();
        let a = board.candy_at(0, 1).unwrap().unwrap();
        let b = board.candy_at(0, 2).unwrap().unwrap();
        board.flip_candies(&a, &b).unwrap();

        let moved_a = board.candy_at(0, 2).unwrap().unwrap();
        let moved_b = board.candy_at(0, 1).unwrap().unwrap();
        assert_eq!(moved_a.id, a.id);
        assert_eq!(moved_a.color, Color::Red);
        assert_eq!(moved_b.id, b.id);
        assert_eq!(moved_b.color, Color::Blue);
    }

    #[test]
    fn test_flip_with_empty_slot_fails() {
        let mut board = small_board();
        let a = board.candy_at(0, 1).unwrap().unwrap();
        let ghost = Candy {
            id: 999,
            color: Color::Red,
            row: 1,
            col: 1,
        };
        assert_eq!(
            board.flip_candies(&a, &ghost),
            Err(BoardError::EmptySlot { row: 1, col: 1 })
        );
    }

    #[test]
    fn test_relocate_into_occupied_slot_fails() {
        let mut board = small_board();
        let err = board
            .relocate_candy(Position::new(0, 0), Position::new(0, 1))
            .unwrap_err();
        assert_eq!(err, BoardError::SlotOccupied { row: 0, col: 1 });
    }

    #[test]
    fn test_relocate_emits_single_move() {
        let mut board = small_board();
        let candy = board
            .relocate_candy(Position::new(0, 1), Position::new(1, 1))
            .unwrap();
        assert_eq!(candy.position(), Position::new(1, 1));
        assert_eq!(board.candy_at(0, 1).unwrap(), None);
        assert_eq!(
            board.drain_events(),
            vec![BoardEvent::Move {
                from_row: 0,
                from_col: 1,
                to_row: 1,
                to_col: 1,
                candy
            }]
        );
    }

    #[test]
    fn test_neighbor_off_grid_is_out_of_bounds() {
        let board = small_board();
        let corner = board.candy_at(0, 0).unwrap().unwrap();
        assert_eq!(
            board.candy_in_direction(&corner, Direction::Up),
            Err(BoardError::OutOfBounds {
                row: -1,
                col: 0,
                size: 3
            })
        );
        assert_eq!(
            board.candy_in_direction(&corner, Direction::Down).unwrap(),
            board.candy_at(1, 0).unwrap()
        );
        // Empty neighbor is not an error.
        let top = board.candy_at(0, 1).unwrap().unwrap();
        assert_eq!(board.candy_in_direction(&top, Direction::Down), Ok(None));
    }

    #[test]
    fn test_clear_is_silent() {
        let mut board = small_board();
        board.add_candy_at(1, 1, Color::Red).unwrap();
        board.drain_events();
        board.clear();
        assert_eq!(board.occupied_count(), 0);
        assert!(board.events().is_empty());
    }
}
