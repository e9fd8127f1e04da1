pub mod board;
pub mod book;
pub mod engine;
pub mod sync;
pub mod tt;
mod zobrist;

pub use board::{Board, Color, Evaluator, EvaluatorKind, Move, Square};
pub use book::{BookPolicy, OpeningBook};
pub use engine::{is_legal_move, Engine, EngineConfig, SearchReport, SearchSource};
pub use tt::TranspositionTable;
