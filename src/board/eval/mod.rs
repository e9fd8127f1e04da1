//! Position evaluation.
//!
//! Every evaluator scores a board from the side to move's point of view
//! (higher is better for the mover) and never mutates it. Three strategies
//! are provided, selected through [`EvaluatorKind`]:
//! - `PieceCount` - disc differential, exact at game end
//! - `WeightedSquares` - static per-cell weights
//! - `Composite` - phase-weighted blend of mobility, corners, X-squares,
//!   edges, frontier and parity

mod composite;
pub mod tables;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Bitboard, Board};

pub use composite::{Composite, Phase};

/// Largest magnitude any evaluator result is allowed to reach in search.
/// Terminal scores sit strictly above it.
pub const EVAL_LIMIT: i32 = 50_000;

/// Scores a position for the side to move.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board) -> i32;

    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Disc differential.
#[derive(Clone, Copy, Debug, Default)]
pub struct PieceCount;

impl Evaluator for PieceCount {
    fn evaluate(&self, board: &Board) -> i32 {
        let (own, opp) = board.own_and_opponent();
        own.popcount() as i32 - opp.popcount() as i32
    }

    fn name(&self) -> &'static str {
        "piece-count"
    }
}

/// Sum of [`tables::SQUARE_WEIGHTS`] over owned cells minus the opponent's.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedSquares;

pub(crate) fn weight_sum(discs: Bitboard) -> i32 {
    discs
        .iter()
        .map(|sq| tables::SQUARE_WEIGHTS[sq.as_index()])
        .sum()
}

impl Evaluator for WeightedSquares {
    fn evaluate(&self, board: &Board) -> i32 {
        let (own, opp) = board.own_and_opponent();
        weight_sum(own) - weight_sum(opp)
    }

    fn name(&self) -> &'static str {
        "weighted-squares"
    }
}

/// Closed set of built-in evaluators, chosen by configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvaluatorKind {
    PieceCount,
    WeightedSquares,
    #[default]
    Composite,
}

impl Evaluator for EvaluatorKind {
    fn evaluate(&self, board: &Board) -> i32 {
        match self {
            EvaluatorKind::PieceCount => PieceCount.evaluate(board),
            EvaluatorKind::WeightedSquares => WeightedSquares.evaluate(board),
            EvaluatorKind::Composite => Composite.evaluate(board),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            EvaluatorKind::PieceCount => PieceCount.name(),
            EvaluatorKind::WeightedSquares => WeightedSquares.name(),
            EvaluatorKind::Composite => Composite.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Square};

    fn board(diagram: &str) -> Board {
        diagram.parse().expect("valid diagram")
    }

    #[test]
    fn test_start_position_is_balanced() {
        let b = Board::new();
        for kind in [
            EvaluatorKind::PieceCount,
            EvaluatorKind::WeightedSquares,
            EvaluatorKind::Composite,
        ] {
            assert_eq!(kind.evaluate(&b), 0, "{}", kind.name());
        }
    }

    #[test]
    fn test_piece_count_is_mover_relative() {
        let mut b = Board::new();
        b.apply("f5".parse().unwrap()).unwrap();
        // Black now has 4 discs, white 1, white to move.
        assert_eq!(b.side_to_move(), Color::White);
        assert_eq!(PieceCount.evaluate(&b), -3);
    }

    #[test]
    fn test_square_weights_symmetric() {
        for idx in 0..64 {
            let sq = Square::from_index(idx).unwrap();
            let w = tables::SQUARE_WEIGHTS[idx];
            assert_eq!(w, tables::SQUARE_WEIGHTS[sq.flip_vertical().as_index()]);
            assert_eq!(w, tables::SQUARE_WEIGHTS[sq.flip_horizontal().as_index()]);
            let transposed = Square::new(sq.file(), sq.rank()).unwrap();
            assert_eq!(w, tables::SQUARE_WEIGHTS[transposed.as_index()]);
        }
    }

    #[test]
    fn test_weighted_prefers_corner() {
        let corner = board(
            "X------- -------- -------- ---OX--- ---XO--- -------- -------- -------- X",
        );
        let x_square = board(
            "-------- -X------ -------- ---OX--- ---XO--- -------- -------- -------- X",
        );
        assert!(WeightedSquares.evaluate(&corner) > WeightedSquares.evaluate(&x_square));
    }

    #[test]
    fn test_evaluators_do_not_mutate() {
        let mut b = Board::new();
        b.apply("d3".parse().unwrap()).unwrap();
        let before = b.clone();
        for kind in [
            EvaluatorKind::PieceCount,
            EvaluatorKind::WeightedSquares,
            EvaluatorKind::Composite,
        ] {
            let _ = kind.evaluate(&b);
            assert_eq!(b, before);
        }
    }
}
