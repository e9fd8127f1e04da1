//! Edge case tests for passes, finished games and position text.

use crate::board::{Board, Color, HistoryError, IllegalMoveError, Move, Outcome, PositionError};

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

#[test]
fn test_initial_position() {
    let board = Board::new();
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.disc_count(Color::Black), 2);
    assert_eq!(board.disc_count(Color::White), 2);
    assert_eq!(board.color_on("d4".parse().unwrap()), Some(Color::White));
    assert_eq!(board.color_on("e5".parse().unwrap()), Some(Color::White));
    assert_eq!(board.color_on("d5".parse().unwrap()), Some(Color::Black));
    assert_eq!(board.color_on("e4".parse().unwrap()), Some(Color::Black));

    let moves: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
    assert_eq!(moves, vec!["d3", "c4", "f5", "e6"]);
    assert_eq!(board.mobility(Color::White), 4);
}

#[test]
fn test_white_replies_to_f5() {
    let mut board = Board::new();
    board.apply(mv("f5")).unwrap();
    let moves: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
    assert_eq!(moves, vec!["f4", "d6", "f6"]);
}

#[test]
fn test_flips_for_does_not_mutate() {
    let board = Board::from_history("F5d6").unwrap();
    let before = board.clone();
    let flips = board.flips_for(mv("c3"));
    assert_eq!(flips.popcount(), 1);
    assert!(flips.contains("d4".parse().unwrap()));
    assert!(board.flips_for(mv("a1")).is_empty());
    assert!(board.flips_for(mv("d4")).is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_side_without_moves_must_pass() {
    let mut board: Board = "XO------ -------- -------- -------- -------- -------- -------- -------- O"
        .parse()
        .unwrap();
    assert!(!board.has_legal_move());
    assert!(!board.is_terminal());
    assert_eq!(board.mobility(Color::Black), 1);

    board.pass().unwrap();
    let moves = board.legal_moves();
    assert_eq!(moves.as_slice(), &[mv("c1")]);

    board.apply(mv("c1")).unwrap();
    assert!(board.is_terminal());
    assert_eq!(board.disc_count(Color::White), 0);
    assert_eq!(board.outcome(), Outcome::Loss);
}

#[test]
fn test_full_board_is_terminal() {
    let cells = format!("{}{}", "X".repeat(33), "O".repeat(31));
    let board: Board = format!("{cells} O").parse().unwrap();
    assert!(board.is_terminal());
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.outcome(), Outcome::Loss);

    let drawn: Board = format!("{}{} X", "X".repeat(32), "O".repeat(32))
        .parse()
        .unwrap();
    assert_eq!(drawn.outcome(), Outcome::Draw);
}

#[test]
fn test_apply_on_full_board_is_occupied() {
    let mut board: Board = format!("{} X", "O".repeat(64)).parse().unwrap();
    assert!(matches!(
        board.apply(mv("h8")),
        Err(IllegalMoveError::Occupied { .. })
    ));
}

#[test]
fn test_from_history_inserts_passes() {
    // Black runs out of placements after the 18th move and again after
    // the 19th, so White plays three in a row.
    let board = Board::from_history("D3c3B3b2B1a1C4c1C2d2D1e1A2a3F5e2F1g1f2e3").unwrap();
    assert_eq!(board.move_count(), 20);
    assert_eq!(board.undo_depth(), 22);
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.disc_count(Color::Black), 6);
    assert_eq!(board.disc_count(Color::White), 18);
    assert_eq!(
        board.to_position_string(),
        "OOOOOOO-OOOOOO--OOOOO-----XXX------XXX-------------------------- X"
    );
    assert_eq!(board.history(), "D3c3B3b2B1a1C4c1C2d2D1e1A2a3F5e2F1g1f2e3");
}

#[test]
fn test_from_history_errors() {
    assert_eq!(
        Board::from_history("F5d"),
        Err(HistoryError::OddLength { len: 3 })
    );
    assert!(matches!(
        Board::from_history("F5z9"),
        Err(HistoryError::InvalidToken { ply: 1, .. })
    ));
    assert!(matches!(
        Board::from_history("F5F5"),
        Err(HistoryError::IllegalMove {
            ply: 1,
            source: IllegalMoveError::Occupied { .. }
        })
    ));
    assert!(matches!(
        Board::from_history("A1"),
        Err(HistoryError::IllegalMove {
            ply: 0,
            source: IllegalMoveError::NoFlips { .. }
        })
    ));
}

#[test]
fn test_position_string_round_trip() {
    let board = Board::from_history("F5d6C3d3C4").unwrap();
    let text = board.to_position_string();
    let parsed: Board = text.parse().unwrap();
    assert_eq!(parsed.to_position_string(), text);
    assert_eq!(parsed.hash(), board.hash());
    assert_eq!(parsed.side_to_move(), board.side_to_move());
    assert_eq!(parsed.legal_moves(), board.legal_moves());
    assert_eq!(parsed.undo_depth(), 0);
    assert_eq!(parsed.history(), "");
}

#[test]
fn test_position_string_initial() {
    assert_eq!(
        Board::new().to_position_string(),
        "---------------------------OX------XO--------------------------- X"
    );
}

#[test]
fn test_position_parse_errors() {
    assert!(matches!(
        "XO X".parse::<Board>(),
        Err(PositionError::WrongCellCount { .. })
    ));
    let bad_cell = format!("{}Z X", "-".repeat(63));
    assert_eq!(
        bad_cell.parse::<Board>(),
        Err(PositionError::InvalidCell { char: 'Z' })
    );
    let bad_side = format!("{} Q", "-".repeat(64));
    assert!(matches!(
        bad_side.parse::<Board>(),
        Err(PositionError::InvalidSideToMove { .. })
    ));
}

#[test]
fn test_display_shows_grid_and_counts() {
    let text = Board::new().to_string();
    assert!(text.starts_with("  a b c d e f g h"));
    assert!(text.contains("X=2 O=2"));
}

#[test]
fn test_history_matches_position() {
    assert!(Board::new().history_matches_position());

    let mut played = Board::new();
    played.apply(mv("d3")).unwrap();
    played.apply(mv("c3")).unwrap();
    assert!(played.history_matches_position());

    let start: Board = Board::new().to_position_string().parse().unwrap();
    assert!(start.history_matches_position());

    let diagram: Board = played.to_position_string().parse().unwrap();
    assert!(!diagram.history_matches_position());
}
