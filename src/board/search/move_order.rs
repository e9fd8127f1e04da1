//! Move ordering utilities for search.

use super::constants::{
    CENTER_SCORE, CORNER_SCORE, HASH_MOVE_SCORE, KILLER_SCORE, MOBILITY_BASE, STABLE_EDGE_SCORE,
};
use crate::board::movegen::{flip_mask, legal_mask};
use crate::board::{Bitboard, Board, Move, MoveList, ScoredMoveList, Square};

/// True when `sq` is an edge cell connected to a corner by an unbroken run
/// of `own` discs along that edge.
fn is_stable_edge(sq: Square, own: Bitboard) -> bool {
    let directions: &[(isize, isize)] = match (sq.rank(), sq.file()) {
        (0 | 7, 0 | 7) => return false,
        (0 | 7, _) => &[(0, -1), (0, 1)],
        (_, 0 | 7) => &[(-1, 0), (1, 0)],
        _ => return false,
    };

    directions.iter().any(|&(dr, df)| {
        let mut cursor = sq.offset(dr, df);
        let mut last = None;
        while let Some(cell) = cursor {
            if !own.contains(cell) {
                return false;
            }
            last = Some(cell);
            cursor = cell.offset(dr, df);
        }
        last.is_some_and(|cell| Bitboard::CORNERS.contains(cell))
    })
}

/// Static priority of a placement: corner > stable edge > center, plus a
/// smaller bonus for leaving the opponent fewer replies.
pub(crate) fn static_score(board: &Board, mv: Move) -> i32 {
    let (own, opp) = board.own_and_opponent();
    let sq = mv.square();

    let class = if Bitboard::CORNERS.contains(sq) {
        CORNER_SCORE
    } else if is_stable_edge(sq, own) {
        STABLE_EDGE_SCORE
    } else if Bitboard::CENTER.contains(sq) {
        CENTER_SCORE
    } else {
        0
    };

    let placed = Bitboard::from_square(sq);
    let flips = flip_mask(own, opp, placed);
    let replies = legal_mask(opp ^ flips, own | placed | flips).popcount() as i32;

    class + MOBILITY_BASE - replies
}

/// Order `moves` for search: `hash_move` first, then `killers` that are
/// still legal (most recent first), then by [`static_score`]. Ties keep
/// the generator's order.
pub(crate) fn order_moves(
    board: &Board,
    moves: &MoveList,
    hash_move: Option<Move>,
    killers: &[Move],
) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let score = if Some(mv) == hash_move {
            HASH_MOVE_SCORE
        } else if let Some(slot) = killers.iter().position(|&k| k == mv) {
            KILLER_SCORE - slot as i32
        } else {
            static_score(board, mv)
        };
        scored.push(mv, score);
    }
    scored.sort_by_score_desc();
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn test_corner_outranks_everything_static() {
        // Black to move can take a1 (via b2) or play elsewhere.
        let board: Board = "-------- -O------ --X----- ---XO--- ---OX--- -------- -------- -------- X"
            .parse()
            .unwrap();
        let moves = board.legal_moves();
        assert!(moves.contains(mv("a1")));
        let ordered = order_moves(&board, &moves, None, &[]);
        assert_eq!(ordered.as_slice()[0].mv, mv("a1"));
    }

    #[test]
    fn test_stable_edge_detection() {
        let board: Board = "XXX----- -------- -------- -------- -------- -------- -------- -------- X"
            .parse()
            .unwrap();
        let own = board.discs(crate::board::Color::Black);
        assert!(is_stable_edge(mv("d1").square(), own));
        assert!(!is_stable_edge(mv("e1").square(), own));
        assert!(!is_stable_edge(mv("a1").square(), own));
        assert!(!is_stable_edge(mv("d4").square(), own));
    }

    #[test]
    fn test_killers_and_hash_move_come_first() {
        let board = Board::new();
        let moves = board.legal_moves();
        let ordered = order_moves(&board, &moves, Some(mv("e6")), &[mv("c4"), mv("f5")]);
        let order: Vec<Move> = ordered.iter().map(|s| s.mv).collect();
        assert_eq!(order[..3], [mv("e6"), mv("c4"), mv("f5")]);
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_illegal_killer_is_ignored() {
        let board = Board::new();
        let moves = board.legal_moves();
        let ordered = order_moves(&board, &moves, None, &[mv("a1")]);
        assert_eq!(ordered.len(), 4);
        assert!(ordered.iter().all(|s| s.score < KILLER_SCORE - 2));
    }

    #[test]
    fn test_symmetric_opening_moves_keep_natural_order() {
        let board = Board::new();
        let moves = board.legal_moves();
        let ordered = order_moves(&board, &moves, None, &[]);
        let order: Vec<Move> = ordered.iter().map(|s| s.mv).collect();
        assert_eq!(order, moves.as_slice());
    }
}
