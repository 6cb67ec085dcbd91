use crate::board::Board;
use crate::types::{Color, Position};

/// Plain copy of the board's colors and score
///
/// Candy identities are dropped, so two boards dealt from the same seed
/// compare equal even though their ids may differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    pub size: usize,
    /// Row-major colors, `None` = empty slot
    pub cells: Vec<Option<Color>>,
    pub score: u32,
}

impl BoardSnapshot {
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        self.cells[pos.row * self.size + pos.col]
    }

    /// Rows of colors, top to bottom
    pub fn rows(&self) -> Vec<Vec<Option<Color>>> {
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }

    /// Stable 64-bit FNV-1a hash of the grid (0 = empty, 1..=6 = color)
    ///
    /// Unlike `DefaultHasher`, the value does not change across Rust versions,
    /// so it can be pinned in characterization tests.
    pub fn board_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for cell in &self.cells {
            let b = cell.map(|c| c.index() as u8 + 1).unwrap_or(0);
            h ^= b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
        h
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        let size = self.size();
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(self.color_at(Position::new(row, col)));
            }
        }
        BoardSnapshot {
            size,
            cells,
            score: self.score(),
        }
    }
}
