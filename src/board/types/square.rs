//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A cell on the 8x8 board, stored as its index (`a1` = 0, `h8` = 63).
///
/// Files are lettered `a`..`h` left to right and ranks numbered `1`..`8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a new square with bounds checking
    #[must_use]
    pub fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Const constructor; callers guarantee `rank < 8 && file < 8`.
    #[inline]
    #[must_use]
    pub(crate) const fn new_const(rank: u8, file: u8) -> Self {
        Square(rank * 8 + file)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn from_index_const(idx: u8) -> Self {
        Square(idx)
    }

    /// Create a square from an index (0-63)
    pub fn from_index(idx: usize) -> Result<Self, SquareError> {
        if idx < 64 {
            Ok(Square(idx as u8))
        } else {
            Err(SquareError::IndexOutOfRange { index: idx })
        }
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Mirror across the horizontal axis (a1 <-> a8)
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// Mirror across the vertical axis (a1 <-> h1)
    #[inline]
    #[must_use]
    pub const fn flip_horizontal(self) -> Self {
        Square(self.0 ^ 7)
    }

    /// The square one step away in the given rank/file delta, if on the board.
    #[must_use]
    pub fn offset(self, dr: isize, df: isize) -> Option<Self> {
        let rank = self.rank() as isize + dr;
        let file = self.file() as isize + df;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Square::new(rank as usize, file as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square((rank * 8 + file) as u8))
    }
}

/// Parses `"f5"` or `"F5"`.
impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }

        let file = match bytes[0].to_ascii_lowercase() {
            c @ b'a'..=b'h' => (c - b'a') as usize,
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            c @ b'1'..=b'8' => (c - b'1') as usize,
            _ => return Err(invalid()),
        };

        Square::try_from((rank, file))
    }
}
