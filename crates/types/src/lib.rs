//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the board/rules engine, the session controller, and any view layer that
//! observes board events.
//!
//! # Board Dimensions
//!
//! The board is a square `N x N` grid:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_BOARD_SIZE` | 3 | Smallest grid that can hold a run |
//! | `MAX_BOARD_SIZE` | 20 | Largest supported grid |
//! | `DEFAULT_BOARD_SIZE` | 8 | Grid used when no size is configured |
//!
//! Coordinates are `(row, col)` with row 0 at the top and col 0 at the left.
//! Gravity pulls candies toward higher row indices.
//!
//! # Cell Ids
//!
//! Rows map to letters and columns to 1-based numbers:
//!
//! ```
//! use candy_crush_types::{cell_id, parse_cell_id, Position};
//!
//! assert_eq!(cell_id(0, 0), "a1");
//! assert_eq!(cell_id(3, 4), "d5");
//! assert_eq!(parse_cell_id(" D5 "), Some(Position::new(3, 4)));
//! ```

/// Smallest supported board size
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board size
pub const MAX_BOARD_SIZE: usize = 20;

/// Board size used when none is configured
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Seed used when none is configured (the first deal is the same on every run)
pub const DEFAULT_SEED: u32 = 0;

/// Minimum run length that counts as a crush
pub const MIN_CRUSH_LEN: usize = 3;

/// Candy colors
///
/// The palette is fixed; random generation draws uniformly from [`Color::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Orange,
    Blue,
    Purple,
}

impl Color {
    /// Every color, in generation order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Orange,
        Color::Blue,
        Color::Purple,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use candy_crush_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("PURPLE"), Some(Color::Purple));
    /// assert_eq!(Color::from_str("pink"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "yellow" => Some(Color::Yellow),
            "green" => Some(Color::Green),
            "orange" => Some(Color::Orange),
            "blue" => Some(Color::Blue),
            "purple" => Some(Color::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }

    /// Index into [`Color::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Yellow => 1,
            Color::Green => 2,
            Color::Orange => 3,
            Color::Blue => 4,
            Color::Purple => 5,
        }
    }

    /// Upper-case initial used by text grids
    ///
    /// # Examples
    ///
    /// ```
    /// use candy_crush_types::Color;
    ///
    /// assert_eq!(Color::Orange.initial(), 'O');
    /// assert_eq!(Color::from_initial('o'), Some(Color::Orange));
    /// ```
    pub fn initial(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Purple => 'P',
        }
    }

    /// Parse an initial as produced by [`Color::initial`] (case-insensitive)
    pub fn from_initial(c: char) -> Option<Self> {
        Color::ALL
            .into_iter()
            .find(|color| color.initial() == c.to_ascii_uppercase())
    }

    /// Color at `index` in [`Color::ALL`], wrapping around the palette
    pub fn from_index(index: usize) -> Self {
        Color::ALL[index % Color::ALL.len()]
    }
}

/// Swap directions
///
/// `Up` points toward row 0, `Left` toward col 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in move-search order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "down" | "d", "left" | "l", "right" | "r"
    ///
    /// # Examples
    ///
    /// ```
    /// use candy_crush_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("L"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Row/column delta of one step in this direction
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The direction pointing back
    ///
    /// # Examples
    ///
    /// ```
    /// use candy_crush_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Run orientation of a crush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor one step in `direction`, or `None` if it falls outside a
    /// `size x size` grid.
    ///
    /// Both bounds are checked explicitly on each axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use candy_crush_types::{Direction, Position};
    ///
    /// let p = Position::new(0, 2);
    /// assert_eq!(p.step(Direction::Down, 3), Some(Position::new(1, 2)));
    /// assert_eq!(p.step(Direction::Up, 3), None);
    /// assert_eq!(p.step(Direction::Right, 3), None);
    /// ```
    pub fn step(&self, direction: Direction, size: usize) -> Option<Position> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row < size && col < size {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Cell id of this position (`"a1"` for the top-left cell)
    pub fn cell_id(&self) -> String {
        cell_id(self.row, self.col)
    }
}

/// A candy on the board
///
/// `id` is assigned when the candy is created and stays the same while the
/// candy is swapped or falls. `row`/`col` always match the slot holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candy {
    pub id: u32,
    pub color: Color,
    pub row: usize,
    pub col: usize,
}

impl Candy {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Notification emitted by the board for every state change
///
/// Events are queued synchronously, in the order the mutations happen.
/// The candy carried by each event reflects its state right after the change
/// (for `Remove`, right before it left the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new candy was created at `(to_row, to_col)`
    Add {
        to_row: usize,
        to_col: usize,
        candy: Candy,
    },
    /// A candy moved (swap or fall); one event per relocation
    Move {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        candy: Candy,
    },
    /// A candy was crushed
    Remove {
        from_row: usize,
        from_col: usize,
        candy: Candy,
    },
    /// Score changed; `candy` is the representative candy of the crush, if any
    ScoreUpdate { score: u32, candy: Option<Candy> },
}

impl BoardEvent {
    /// Event kind name as used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            BoardEvent::Add { .. } => "add",
            BoardEvent::Move { .. } => "move",
            BoardEvent::Remove { .. } => "remove",
            BoardEvent::ScoreUpdate { .. } => "scoreUpdate",
        }
    }

    /// The candy the event is about
    pub fn candy(&self) -> Option<Candy> {
        match self {
            BoardEvent::Add { candy, .. }
            | BoardEvent::Move { candy, .. }
            | BoardEvent::Remove { candy, .. } => Some(*candy),
            BoardEvent::ScoreUpdate { candy, .. } => *candy,
        }
    }
}

/// Cell id for `(row, col)`: row letter followed by 1-based column number
pub fn cell_id(row: usize, col: usize) -> String {
    let letter = (b'a' + (row % 26) as u8) as char;
    format!("{}{}", letter, col + 1)
}

/// Parse a cell id such as `"a1"` or `"t20"` into a position
///
/// Surrounding whitespace and case are ignored. The result is not checked
/// against any board size; boards do that with [`Position::step`]-style
/// explicit comparisons.
///
/// # Examples
///
/// ```
/// use candy_crush_types::{parse_cell_id, Position};
///
/// assert_eq!(parse_cell_id("a1"), Some(Position::new(0, 0)));
/// assert_eq!(parse_cell_id("c12"), Some(Position::new(2, 11)));
/// assert_eq!(parse_cell_id("a0"), None);
/// assert_eq!(parse_cell_id("11"), None);
/// ```
pub fn parse_cell_id(s: &str) -> Option<Position> {
    let clean = s.trim().to_lowercase();
    let mut chars = clean.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_lowercase() {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let col: usize = digits.parse().ok()?;
    if col == 0 {
        return None;
    }
    Some(Position::new((letter as u8 - b'a') as usize, col - 1))
}
