//! Error types for board operations.

use std::fmt;

use super::Square;

/// A move that cannot be played in the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// Target cell already holds a disc
    Occupied { square: Square },
    /// Placement would not flank any opposing disc
    NoFlips { square: Square },
    /// A pass was requested while the side to move still has moves
    PassWithLegalMoves { legal_moves: usize },
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::Occupied { square } => {
                write!(f, "Illegal move {square}: cell is occupied")
            }
            IllegalMoveError::NoFlips { square } => {
                write!(f, "Illegal move {square}: no discs would be flipped")
            }
            IllegalMoveError::PassWithLegalMoves { legal_moves } => {
                write!(f, "Cannot pass with {legal_moves} legal moves available")
            }
        }
    }
}

impl std::error::Error for IllegalMoveError {}

/// `undo` was called with nothing left to undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoUnderflowError;

impl fmt::Display for UndoUnderflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Undo called with an empty undo stack")
    }
}

impl std::error::Error for UndoUnderflowError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Bit index outside 0-63
    IndexOutOfRange { index: usize },
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::IndexOutOfRange { index } => {
                write!(f, "Square index {index} out of range (must be 0-63)")
            }
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for board diagram parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Wrong number of cells before the side-to-move marker
    WrongCellCount { found: usize },
    /// Character that is neither a disc nor an empty cell
    InvalidCell { char: char },
    /// Missing or unrecognised side-to-move marker
    InvalidSideToMove { found: String },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::WrongCellCount { found } => {
                write!(f, "Board diagram must have 64 cells, found {found}")
            }
            PositionError::InvalidCell { char } => {
                write!(f, "Invalid cell character '{char}' in board diagram")
            }
            PositionError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'X' or 'O'")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for replaying a move-history string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// History length is not a whole number of two-character tokens
    OddLength { len: usize },
    /// A token is not a file letter followed by a rank digit
    InvalidToken { ply: usize, token: String },
    /// A token names a move that is illegal at that point of the game
    IllegalMove { ply: usize, source: IllegalMoveError },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::OddLength { len } => {
                write!(f, "History length {len} is not a multiple of 2")
            }
            HistoryError::InvalidToken { ply, token } => {
                write!(f, "Invalid history token '{token}' at ply {ply}")
            }
            HistoryError::IllegalMove { ply, source } => {
                write!(f, "History ply {ply}: {source}")
            }
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::IllegalMove { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure of a search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A move produced by the generator was rejected by `apply`
    IllegalMove(IllegalMoveError),
    /// The search unwound more moves than it applied
    UndoUnderflow(UndoUnderflowError),
    /// The caller raised the stop flag
    Aborted,
    /// A per-worker deadline expired
    DeadlineExceeded,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::IllegalMove(e) => write!(f, "Search applied an illegal move: {e}"),
            SearchError::UndoUnderflow(e) => write!(f, "Search corrupted the undo stack: {e}"),
            SearchError::Aborted => write!(f, "Search aborted"),
            SearchError::DeadlineExceeded => write!(f, "Search deadline exceeded"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::IllegalMove(e) => Some(e),
            SearchError::UndoUnderflow(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IllegalMoveError> for SearchError {
    fn from(e: IllegalMoveError) -> Self {
        SearchError::IllegalMove(e)
    }
}

impl From<UndoUnderflowError> for SearchError {
    fn from(e: UndoUnderflowError) -> Self {
        SearchError::UndoUnderflow(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_mentions_square() {
        let sq = Square::new(4, 5).unwrap();
        let err = IllegalMoveError::NoFlips { square: sq };
        assert!(err.to_string().contains("f5"));
        let err = IllegalMoveError::Occupied { square: sq };
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_pass_error_mentions_count() {
        let err = IllegalMoveError::PassWithLegalMoves { legal_moves: 4 };
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_position_error_cell_count() {
        let err = PositionError::WrongCellCount { found: 63 };
        assert!(err.to_string().contains("63"));
    }

    #[test]
    fn test_history_error_exposes_source() {
        use std::error::Error;
        let err = HistoryError::IllegalMove {
            ply: 2,
            source: IllegalMoveError::NoFlips {
                square: Square::new(0, 0).unwrap(),
            },
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("a1"));
    }

    #[test]
    fn test_error_clone() {
        let err = PositionError::InvalidCell { char: 'q' };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }

    #[test]
    fn test_search_error_wraps_board_errors() {
        use std::error::Error;
        let err: SearchError = UndoUnderflowError.into();
        assert_eq!(err, SearchError::UndoUnderflow(UndoUnderflowError));
        assert!(err.source().is_some());
        assert!(SearchError::Aborted.source().is_none());
    }
}
