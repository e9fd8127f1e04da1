//! Perft (performance test) for move generation correctness.

use crate::board::Board;
use std::time::Instant;

struct TestPosition {
    name: &'static str,
    history: &'static str,
    depths: &'static [(u32, u64)],
}

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        history: "",
        depths: &[(1, 4), (2, 12), (3, 56), (4, 244), (5, 1396), (6, 8200)],
    },
    TestPosition {
        name: "After F5",
        history: "F5",
        depths: &[(1, 3), (2, 14), (3, 61), (4, 349), (5, 2050)],
    },
];

#[test]
fn test_perft_positions() {
    for pos in TEST_POSITIONS {
        let mut board = Board::from_history(pos.history).unwrap();
        for &(depth, expected) in pos.depths {
            let start = Instant::now();
            let nodes = board.perft(depth).unwrap();
            let elapsed = start.elapsed();
            assert_eq!(
                nodes, expected,
                "{} depth {}: expected {}, got {} ({:?})",
                pos.name, depth, expected, nodes, elapsed
            );
        }
    }
}

#[test]
fn test_perft_leaves_board_unchanged() {
    let mut board = Board::new();
    let before = board.clone();
    assert_eq!(board.perft(4), Ok(244));
    assert_eq!(board, before);
    assert_eq!(board.undo_depth(), 0);
}

#[test]
fn test_perft_scan_generator_agrees() {
    fn perft_scan(board: &mut Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = board.legal_moves_scan();
        if moves.is_empty() {
            if board.is_terminal() {
                return 1;
            }
            board.pass().unwrap();
            let nodes = perft_scan(board, depth - 1);
            board.undo().unwrap();
            return nodes;
        }
        let mut nodes = 0;
        for &mv in moves.iter() {
            board.apply(mv).unwrap();
            nodes += perft_scan(board, depth - 1);
            board.undo().unwrap();
        }
        nodes
    }

    let mut board = Board::new();
    for depth in 1..=5 {
        assert_eq!(perft_scan(&mut board, depth), board.clone().perft(depth).unwrap());
    }
}

#[test]
fn test_perft_through_forced_passes() {
    // Black has no placement here and White has eleven.
    let mut board = Board::from_history("D3c3B3b2B1a1C4c1C2d2D1e1A2a3F5e2F1g1").unwrap();
    assert!(!board.has_legal_move());
    assert_eq!(board.perft(1), Ok(1));
    assert_eq!(board.perft(2), Ok(11));
}

#[test]
fn test_perft_terminal_is_single_leaf() {
    let mut board: Board = "OX------ -------- -------- -------- -------- -------- -------- -------- O"
        .parse()
        .unwrap();
    // White captures b1 and Black has no discs left.
    board.apply("c1".parse().unwrap()).unwrap();
    assert!(board.is_terminal());
    assert_eq!(board.perft(3), Ok(1));
}
