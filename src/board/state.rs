use crate::zobrist::ZOBRIST;

use super::{Bitboard, Color, Move, Square};

/// Everything needed to restore the board after an `apply` or `pass`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoRecord {
    pub(crate) previous_discs: [Bitboard; 2],
    pub(crate) previous_side: Color,
    pub(crate) previous_move_count: u32,
    pub(crate) previous_hash: u64,
    pub(crate) previous_history_len: usize,
    /// `None` when the record was pushed by a pass
    pub(crate) played: Option<Move>,
}

impl UndoRecord {
    /// The placed move, or `None` for a pass.
    #[must_use]
    pub fn played(&self) -> Option<Move> {
        self.played
    }
}

/// Game result from the side to move's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// Bitboard Othello position with an O(1) undo stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) discs: [Bitboard; 2], // indexed by Color::index()
    pub(crate) side_to_move: Color,
    pub(crate) move_count: u32,
    pub(crate) hash: u64, // Zobrist hash
    pub(crate) history: String,
    pub(crate) undo_stack: Vec<UndoRecord>,
}

impl Board {
    /// Standard start: white on d4/e5, black on d5/e4, black to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let d4 = Square::new_const(3, 3);
        let e4 = Square::new_const(3, 4);
        let d5 = Square::new_const(4, 3);
        let e5 = Square::new_const(4, 4);
        board.discs[Color::White.index()] = Bitboard::from_square(d4) | Bitboard::from_square(e5);
        board.discs[Color::Black.index()] = Bitboard::from_square(d5) | Bitboard::from_square(e4);
        board.hash = board.calculate_hash();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            discs: [Bitboard::EMPTY; 2],
            side_to_move: Color::Black,
            move_count: 0,
            hash: 0,
            history: String::new(),
            undo_stack: Vec::new(),
        }
    }

    /// Recompute the Zobrist hash from scratch.
    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash = 0;
        for color in Color::BOTH {
            hash ^= ZOBRIST.discs(color, self.discs[color.index()]);
        }
        hash ^ ZOBRIST.side(self.side_to_move)
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Number of placed moves (passes excluded).
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Case-encoded move history, e.g. `"F5d6C3"`.
    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    /// Applied-but-not-undone moves and passes.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn last_record(&self) -> Option<&UndoRecord> {
        self.undo_stack.last()
    }

    #[inline]
    #[must_use]
    pub fn discs(&self, color: Color) -> Bitboard {
        self.discs[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn disc_count(&self, color: Color) -> u32 {
        self.discs[color.index()].popcount()
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.discs[0] | self.discs[1]
    }

    #[inline]
    #[must_use]
    pub fn empty_cells(&self) -> Bitboard {
        !self.occupied()
    }

    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        Color::BOTH
            .into_iter()
            .find(|color| self.discs[color.index()].contains(sq))
    }

    /// Discs of the side to move and of its opponent.
    #[inline]
    pub(crate) fn own_and_opponent(&self) -> (Bitboard, Bitboard) {
        let own = self.discs[self.side_to_move.index()];
        let opp = self.discs[self.side_to_move.opponent().index()];
        (own, opp)
    }

    /// True when the board is full or neither side can move.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        if self.empty_cells().is_empty() {
            return true;
        }
        let (own, opp) = self.own_and_opponent();
        super::movegen::legal_mask(own, opp).is_empty()
            && super::movegen::legal_mask(opp, own).is_empty()
    }

    /// Disc-count comparison for the side to move. Only meaningful once
    /// `is_terminal()` holds.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let own = self.disc_count(self.side_to_move);
        let opp = self.disc_count(self.side_to_move.opponent());
        match own.cmp(&opp) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
