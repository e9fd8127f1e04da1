//! Othello board representation, evaluation and search.
//!
//! Uses bitboards for move generation: one 64-bit mask per side, with
//! `a1` as bit 0 and `h8` as bit 63.
//!
//! # Example
//! ```
//! use othello_engine::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves();
//! assert_eq!(moves.len(), 4);
//! board.apply(moves.as_slice()[0]).unwrap();
//! board.undo().unwrap();
//! assert_eq!(board, Board::new());
//! ```

mod error;
mod eval;
mod make_unmake;
mod movegen;
mod position;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{
    HistoryError, IllegalMoveError, PositionError, SearchError, SquareError, UndoUnderflowError,
};
pub use state::{Board, Outcome, UndoRecord};
pub use types::{Bitboard, BitboardIter, Color, Direction, Move, MoveList, Square};

// Evaluation
pub use eval::{
    Composite, Evaluator, EvaluatorKind, Phase, PieceCount, WeightedSquares, EVAL_LIMIT,
};

// Search functions and configuration
pub use search::parallel::search_parallel;
pub use search::{
    find_best_move, score_position, search_sequential, KillerTable, SearchParams, SearchResult,
    SearchState, SearchStats, SearchTables, DEFAULT_TT_MB, INFINITY, MAX_KILLER_SLOTS, WIN_SCORE,
};

pub(crate) use types::{ScoredMoveList, MAX_PLY};
