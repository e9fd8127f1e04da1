use super::tables::{
    CORNER_WEIGHT, CORNER_X_SQUARES, DISC_WEIGHT, EDGE_WEIGHT, ENDGAME_START_PCT, FRONTIER_WEIGHT,
    MOBILITY_SCALE, MOBILITY_WEIGHT, OPENING_END_PCT, PARITY_WEIGHT, X_SQUARE_WEIGHT,
};
use super::Evaluator;
use crate::board::movegen::legal_mask;
use crate::board::{Bitboard, Board};

/// Game phase derived from the share of occupied cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Midgame,
    Endgame,
}

impl Phase {
    #[must_use]
    pub fn of(board: &Board) -> Phase {
        let pct = board.occupied().popcount() * 100 / 64;
        if pct < OPENING_END_PCT {
            Phase::Opening
        } else if pct < ENDGAME_START_PCT {
            Phase::Midgame
        } else {
            Phase::Endgame
        }
    }

    const fn index(self) -> usize {
        match self {
            Phase::Opening => 0,
            Phase::Midgame => 1,
            Phase::Endgame => 2,
        }
    }
}

/// Phase-weighted blend of positional features.
#[derive(Clone, Copy, Debug, Default)]
pub struct Composite;

impl Composite {
    fn mobility(own: Bitboard, opp: Bitboard) -> i32 {
        let mine = legal_mask(own, opp).popcount() as i32;
        let theirs = legal_mask(opp, own).popcount() as i32;
        MOBILITY_SCALE * (mine - theirs) / (mine + theirs + 2)
    }

    fn corners(own: Bitboard, opp: Bitboard) -> i32 {
        (own & Bitboard::CORNERS).popcount() as i32 - (opp & Bitboard::CORNERS).popcount() as i32
    }

    /// Positive when the opponent sits next to an empty corner.
    fn x_squares(own: Bitboard, opp: Bitboard) -> i32 {
        let occupied = own | opp;
        let mut score = 0;
        for &(corner, x) in &CORNER_X_SQUARES {
            if occupied.0 & (1 << corner) != 0 {
                continue;
            }
            if own.0 & (1 << x) != 0 {
                score -= 1;
            } else if opp.0 & (1 << x) != 0 {
                score += 1;
            }
        }
        score
    }

    fn edges(own: Bitboard, opp: Bitboard) -> i32 {
        let sides = Bitboard(Bitboard::EDGES.0 & !Bitboard::CORNERS.0);
        (own & sides).popcount() as i32 - (opp & sides).popcount() as i32
    }

    /// Positive when the opponent has more discs bordering empty cells.
    fn frontier(own: Bitboard, opp: Bitboard) -> i32 {
        let empty_neighbours = (!(own | opp)).neighbours();
        (opp & empty_neighbours).popcount() as i32 - (own & empty_neighbours).popcount() as i32
    }

    /// +1 when an odd number of empties gives the mover the last move.
    fn parity(own: Bitboard, opp: Bitboard) -> i32 {
        if (!(own | opp)).popcount() % 2 == 1 {
            1
        } else {
            -1
        }
    }
}

impl Evaluator for Composite {
    fn evaluate(&self, board: &Board) -> i32 {
        let (own, opp) = board.own_and_opponent();
        let p = Phase::of(board).index();

        MOBILITY_WEIGHT[p] * Self::mobility(own, opp)
            + CORNER_WEIGHT[p] * Self::corners(own, opp)
            + X_SQUARE_WEIGHT[p] * Self::x_squares(own, opp)
            + EDGE_WEIGHT[p] * Self::edges(own, opp)
            + FRONTIER_WEIGHT[p] * Self::frontier(own, opp)
            + PARITY_WEIGHT[p] * Self::parity(own, opp)
            + DISC_WEIGHT[p] * (own.popcount() as i32 - opp.popcount() as i32)
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}
