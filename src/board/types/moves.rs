//! Move types and move list.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::square::Square;
use crate::board::error::SquareError;

/// A disc placement. Equality and hashing follow the cell only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(Square);

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(square: Square) -> Self {
        Move(square)
    }

    /// Create from a bit index (0-63)
    pub fn from_index(idx: usize) -> Result<Self, SquareError> {
        Square::from_index(idx).map(Move)
    }

    #[inline]
    #[must_use]
    pub const fn square(self) -> Square {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0.as_index()
    }

    /// History token: uppercase when black played it, lowercase for white.
    #[must_use]
    pub fn token(self, color: Color) -> String {
        let s = self.0.to_string();
        match color {
            Color::Black => s.to_ascii_uppercase(),
            Color::White => s,
        }
    }
}

impl From<Square> for Move {
    fn from(square: Square) -> Self {
        Move(square)
    }
}

impl FromStr for Move {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Square>().map(Move)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.0)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) const MAX_MOVES: usize = 64;
pub(crate) const MAX_PLY: usize = 64;
pub(crate) const EMPTY_MOVE: Move = Move(Square::from_index_const(0));

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.get(0)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves to avoid heap allocation.
#[derive(Clone, Debug)]
pub struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    #[must_use]
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: EMPTY_MOVE,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    /// Sort moves by score in descending order. Equal scores keep their
    /// insertion order.
    pub fn sort_by_score_desc(&mut self) {
        self.moves[..self.len].sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.as_slice().iter()
    }
}

impl Default for ScoredMoveList {
    fn default() -> Self {
        ScoredMoveList::new()
    }
}
