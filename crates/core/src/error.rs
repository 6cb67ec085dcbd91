/// Errors raised by board queries and mutations.
///
/// These signal contract violations by the caller. Rejected moves are not
/// errors; rules report them as `false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: isize, col: isize, size: usize },

    #[error("board size {0} is outside 3..=20")]
    InvalidSize(usize),

    #[error("slot ({row}, {col}) is already occupied")]
    SlotOccupied { row: usize, col: usize },

    #[error("slot ({row}, {col}) is empty")]
    EmptySlot { row: usize, col: usize },

    #[error("invalid cell id: {0:?}")]
    InvalidCellId(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

    #[test]
    fn test_out_of_bounds_display() {
        let err = BoardError::OutOfBounds {
            row: 8,
            col: 0,
            size: 8,
        };
        assert_eq!(err.to_string(), "position (8, 0) is outside the 8x8 board");
    }

    #[test]
    fn test_invalid_size_display() {
        assert_eq!(
            BoardError::InvalidSize(2).to_string(),
            "board size 2 is outside 3..=20"
        );
    }

    #[test]
    fn test_invalid_size_message_tracks_limits() {
        let msg = BoardError::InvalidSize(0).to_string();
        assert!(msg.ends_with(&format!("{}..={}", MIN_BOARD_SIZE, MAX_BOARD_SIZE)));
    }

    #[test]
    fn test_invalid_cell_id_display() {
        assert_eq!(
            BoardError::InvalidCellId("zz".to_string()).to_string(),
            "invalid cell id: \"zz\""
        );
    }
}
