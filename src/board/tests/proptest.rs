//! Property-based tests using proptest.

use crate::board::{Board, Color, Move, Square};
use proptest::prelude::*;

/// Strategy to generate a random playout length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=60usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `plies` random plies, passing when forced. Returns the
/// number of plies actually played.
fn random_playout(board: &mut Board, seed: u64, plies: usize) -> usize {
    use rand::prelude::*;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = 0;
    for _ in 0..plies {
        if board.is_terminal() {
            break;
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            board.pass().unwrap();
        } else {
            let idx = rng.gen_range(0..moves.len());
            board.apply(moves[idx]).unwrap();
        }
        played += 1;
    }
    played
}

proptest! {
    /// Property: undoing every ply restores the start position exactly
    #[test]
    fn prop_apply_undo_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let played = random_playout(&mut board, seed, num_moves);
        prop_assert_eq!(board.undo_depth(), played);

        for _ in 0..played {
            board.undo().unwrap();
        }
        prop_assert_eq!(board, Board::new());
    }

    /// Property: incremental hash always equals the recomputed hash
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);
        prop_assert_eq!(board.hash(), board.calculate_hash());
    }

    /// Property: the bitboard generator and the cell scan agree
    #[test]
    fn prop_generators_agree(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);
        prop_assert_eq!(board.legal_moves(), board.legal_moves_scan());
    }

    /// Property: a placement adds one disc for the mover, moves every flip
    /// across, and never touches the empty cells it did not fill
    #[test]
    fn prop_disc_conservation(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);

        let me = board.side_to_move();
        let them = me.opponent();
        for &mv in board.legal_moves().iter() {
            let own_before = board.disc_count(me);
            let opp_before = board.disc_count(them);
            let empty_before = board.empty_cells();
            let expected = board.flips_for(mv);

            let flips = board.apply(mv).unwrap();
            prop_assert_eq!(flips, expected);
            prop_assert!(!flips.is_empty());
            prop_assert_eq!(board.disc_count(me), own_before + 1 + flips.popcount());
            prop_assert_eq!(board.disc_count(them), opp_before - flips.popcount());
            prop_assert!((board.discs(me) & board.discs(them)).is_empty());
            prop_assert_eq!(board.empty_cells().popcount() + 1, empty_before.popcount());
            board.undo().unwrap();
        }
    }

    /// Property: apply accepts exactly the cells the generator lists
    #[test]
    fn prop_apply_accepts_only_legal_cells(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);
        let legal = board.legal_moves();

        for idx in 0..64 {
            let mv = Move::new(Square::from_index(idx).unwrap());
            let before = board.clone();
            match board.apply(mv) {
                Ok(_) => {
                    prop_assert!(legal.contains(mv));
                    prop_assert!(before.is_legal_move(mv));
                    board.undo().unwrap();
                }
                Err(_) => {
                    prop_assert!(!legal.contains(mv));
                    prop_assert!(before.flips_for(mv).is_empty());
                }
            }
            prop_assert_eq!(&board, &before);
        }
    }

    /// Property: the position string parses back to the same cells
    #[test]
    fn prop_position_string_round_trip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);
        let text = board.to_position_string();
        let parsed: Board = text.parse().unwrap();
        prop_assert_eq!(parsed.to_position_string(), text);
        prop_assert_eq!(parsed.hash(), board.hash());
    }

    /// Property: replaying the recorded history reproduces the board
    #[test]
    fn prop_history_replay(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);
        let replayed = Board::from_history(board.history()).unwrap();
        // A trailing pass is not part of the history.
        prop_assert_eq!(replayed.discs(Color::Black), board.discs(Color::Black));
        prop_assert_eq!(replayed.discs(Color::White), board.discs(Color::White));
        prop_assert_eq!(replayed.move_count(), board.move_count());
    }
}
