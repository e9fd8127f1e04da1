//! Legal move generation by directional bit shifts.

use super::{Bitboard, Board, Color, Direction, Move, MoveList, SearchError};

/// Cells where `own` may legally place a disc against `opp`.
///
/// For each direction the run of opponent discs adjacent to `own` is grown
/// one step at a time; an empty cell just beyond a non-empty run is legal.
#[inline]
pub(crate) fn legal_mask(own: Bitboard, opp: Bitboard) -> Bitboard {
    let empty = !(own | opp);
    let mut moves = Bitboard::EMPTY;
    for dir in Direction::ALL {
        let mut run = own.shift(dir) & opp;
        while !run.is_empty() {
            let next = run.shift(dir);
            moves |= next & empty;
            run = next & opp;
        }
    }
    moves
}

/// Opponent discs flipped when `own` places on `placed`.
#[inline]
pub(crate) fn flip_mask(own: Bitboard, opp: Bitboard, placed: Bitboard) -> Bitboard {
    let mut flips = Bitboard::EMPTY;
    for dir in Direction::ALL {
        let mut line = Bitboard::EMPTY;
        let mut cursor = placed.shift(dir);
        while !(cursor & opp).is_empty() {
            line |= cursor;
            cursor = cursor.shift(dir);
        }
        if !(cursor & own).is_empty() {
            flips |= line;
        }
    }
    flips
}

impl Board {
    #[inline]
    #[must_use]
    pub fn legal_moves_mask(&self) -> Bitboard {
        let (own, opp) = self.own_and_opponent();
        legal_mask(own, opp)
    }

    /// Legal placements for the side to move, in ascending cell order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for sq in self.legal_moves_mask().iter() {
            moves.push(Move::new(sq));
        }
        moves
    }

    /// Reference generator walking every empty cell in every direction.
    /// Must agree with [`Board::legal_moves`].
    #[must_use]
    pub fn legal_moves_scan(&self) -> MoveList {
        let mut moves = MoveList::new();
        let me = self.side_to_move;
        let them = me.opponent();
        for sq in self.empty_cells().iter() {
            let flanks = Direction::ALL.iter().any(|&dir| {
                let (dr, df) = dir.delta();
                let mut crossed = 0;
                let mut cursor = sq.offset(dr, df);
                while let Some(cell) = cursor {
                    match self.color_on(cell) {
                        Some(c) if c == them => crossed += 1,
                        Some(_) => return crossed > 0,
                        None => return false,
                    }
                    cursor = cell.offset(dr, df);
                }
                false
            });
            if flanks {
                moves.push(Move::new(sq));
            }
        }
        moves
    }

    #[inline]
    #[must_use]
    pub fn has_legal_move(&self) -> bool {
        !self.legal_moves_mask().is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.legal_moves_mask().contains(mv.square())
    }

    /// Number of legal placements `color` would have if it were on move.
    #[must_use]
    pub fn mobility(&self, color: Color) -> u32 {
        legal_mask(self.discs(color), self.discs(color.opponent())).popcount()
    }

    /// Discs the side to move would flip by playing `mv`, without mutating.
    /// Empty for occupied cells and illegal placements.
    #[must_use]
    pub fn flips_for(&self, mv: Move) -> Bitboard {
        let placed = Bitboard::from_square(mv.square());
        if !(placed & self.occupied()).is_empty() {
            return Bitboard::EMPTY;
        }
        let (own, opp) = self.own_and_opponent();
        flip_mask(own, opp, placed)
    }
}

impl Board {
    /// Count leaf positions `depth` plies ahead. A forced pass uses up a
    /// ply and a finished game counts as a single leaf.
    pub fn perft(&mut self, depth: u32) -> Result<u64, SearchError> {
        if depth == 0 {
            return Ok(1);
        }

        let moves = self.legal_moves();
        if moves.is_empty() {
            if self.is_terminal() {
                return Ok(1);
            }
            self.pass()?;
            let nodes = self.perft(depth - 1);
            self.undo()?;
            return nodes;
        }
        if depth == 1 {
            return Ok(moves.len() as u64);
        }

        let mut nodes = 0;
        for &mv in moves.iter() {
            self.apply(mv)?;
            let child = self.perft(depth - 1);
            self.undo()?;
            nodes += child?;
        }
        Ok(nodes)
    }
}
