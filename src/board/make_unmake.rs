use crate::zobrist::ZOBRIST;

use super::movegen::flip_mask;
use super::{Bitboard, Board, IllegalMoveError, Move, UndoRecord, UndoUnderflowError};

impl Board {
    fn push_undo(&mut self, played: Option<Move>) {
        self.undo_stack.push(UndoRecord {
            previous_discs: self.discs,
            previous_side: self.side_to_move,
            previous_move_count: self.move_count,
            previous_hash: self.hash,
            previous_history_len: self.history.len(),
            played,
        });
    }

    /// Place a disc for the side to move and flip every flanked run.
    ///
    /// Returns the flipped discs. The board is left untouched on error.
    pub fn apply(&mut self, mv: Move) -> Result<Bitboard, IllegalMoveError> {
        let square = mv.square();
        let placed = Bitboard::from_square(square);
        if !(placed & self.occupied()).is_empty() {
            return Err(IllegalMoveError::Occupied { square });
        }

        let (own, opp) = self.own_and_opponent();
        let flips = flip_mask(own, opp, placed);
        if flips.is_empty() {
            return Err(IllegalMoveError::NoFlips { square });
        }

        self.push_undo(Some(mv));

        let me = self.side_to_move;
        let them = me.opponent();
        self.discs[me.index()] = own | placed | flips;
        self.discs[them.index()] = opp ^ flips;

        self.hash ^= ZOBRIST.disc(me, square)
            ^ ZOBRIST.discs(me, flips)
            ^ ZOBRIST.discs(them, flips)
            ^ ZOBRIST.white_to_move_key;

        self.history.push_str(&mv.token(me));
        self.move_count += 1;
        self.side_to_move = them;

        Ok(flips)
    }

    /// Hand the move to the opponent. Only allowed without legal moves.
    pub fn pass(&mut self) -> Result<(), IllegalMoveError> {
        let legal_moves = self.legal_moves_mask().popcount() as usize;
        if legal_moves > 0 {
            return Err(IllegalMoveError::PassWithLegalMoves { legal_moves });
        }
        self.push_undo(None);
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= ZOBRIST.white_to_move_key;
        Ok(())
    }

    /// Revert the last `apply` or `pass` exactly.
    pub fn undo(&mut self) -> Result<(), UndoUnderflowError> {
        let record = self.undo_stack.pop().ok_or(UndoUnderflowError)?;
        self.discs = record.previous_discs;
        self.side_to_move = record.previous_side;
        self.move_count = record.previous_move_count;
        self.hash = record.previous_hash;
        self.history.truncate(record.previous_history_len);
        Ok(())
    }
}
