//! Disc colors.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side owning a disc. Black moves first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Both colors in index order (Black=0, White=1)
    pub const BOTH: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Diagram character (`X` for black, `O` for white)
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'X' | 'B' | '*' => Some(Color::Black),
            'O' | 'W' => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}
