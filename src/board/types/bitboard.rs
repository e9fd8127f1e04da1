//! Bitboard type and operations.

use std::fmt;

use super::square::Square;

/// A 64-bit bitboard, one bit per cell (`a1` = bit 0, `h8` = bit 63).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

// File masks (columns)
impl Bitboard {
    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);
    pub const FILE_H: Bitboard = Bitboard(0x8080808080808080);

    pub const RANK_1: Bitboard = Bitboard(0x00000000000000FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00000000000000);

    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    /// The four corner cells.
    pub const CORNERS: Bitboard = Bitboard(0x8100000000000081);
    /// Outer ring of the board, corners included.
    pub const EDGES: Bitboard = Bitboard(0xFF818181818181FF);
    /// Central 4x4 block (c3..f6).
    pub const CENTER: Bitboard = Bitboard(0x00003C3C3C3C0000);
}

/// The eight ray directions used for flanking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Rank and file deltas of one step in this direction.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (1, -1),
            Direction::SouthEast => (-1, 1),
            Direction::SouthWest => (-1, -1),
        }
    }
}

impl Bitboard {
    /// Create a bitboard with a single square set
    #[inline]
    #[must_use]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1 << sq.as_index())
    }

    /// Returns an iterator over the squares set in this bitboard
    #[inline]
    #[must_use]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count)
    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1 << sq.as_index())) != 0
    }

    /// Shift every bit one step in `dir`, dropping bits that would wrap
    /// around a board edge.
    #[inline]
    #[must_use]
    pub const fn shift(self, dir: Direction) -> Self {
        let not_a = !Self::FILE_A.0;
        let not_h = !Self::FILE_H.0;
        Bitboard(match dir {
            Direction::North => self.0 << 8,
            Direction::South => self.0 >> 8,
            Direction::East => (self.0 << 1) & not_a,
            Direction::West => (self.0 >> 1) & not_h,
            Direction::NorthEast => (self.0 << 9) & not_a,
            Direction::NorthWest => (self.0 << 7) & not_h,
            Direction::SouthEast => (self.0 >> 7) & not_a,
            Direction::SouthWest => (self.0 >> 9) & not_h,
        })
    }

    /// Cells orthogonally or diagonally adjacent to any set bit.
    #[inline]
    #[must_use]
    pub fn neighbours(self) -> Self {
        Direction::ALL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | self.shift(dir))
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}

pub(crate) fn pop_lsb(bb: &mut Bitboard) -> Square {
    let idx = bb.0.trailing_zeros() as u8;
    bb.0 &= bb.0 - 1;
    Square::from_index_const(idx)
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(pop_lsb(&mut self.0))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.popcount() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_drops_wraparound() {
        let h1 = Bitboard::from_square(Square::new_const(0, 7));
        assert!(h1.shift(Direction::East).is_empty());
        assert!(h1.shift(Direction::NorthEast).is_empty());
        assert!(h1.shift(Direction::SouthEast).is_empty());

        let a8 = Bitboard::from_square(Square::new_const(7, 0));
        assert!(a8.shift(Direction::West).is_empty());
        assert!(a8.shift(Direction::North).is_empty());
        assert!(a8.shift(Direction::SouthWest).is_empty());
    }

    #[test]
    fn test_shift_matches_delta() {
        let d4 = Square::new_const(3, 3);
        let bb = Bitboard::from_square(d4);
        for dir in Direction::ALL {
            let (dr, df) = dir.delta();
            let expected = Square::new_const((3 + dr) as u8, (3 + df) as u8);
            assert_eq!(bb.shift(dir), Bitboard::from_square(expected), "{dir:?}");
        }
    }

    #[test]
    fn test_corner_and_edge_masks() {
        assert_eq!(Bitboard::CORNERS.popcount(), 4);
        assert_eq!(Bitboard::EDGES.popcount(), 28);
        assert_eq!(Bitboard::CENTER.popcount(), 16);
        assert_eq!(Bitboard::CORNERS & Bitboard::EDGES, Bitboard::CORNERS);
    }

    #[test]
    fn test_iter_yields_ascending_squares() {
        let bb = Bitboard(0b1010_0001);
        let squares: Vec<u8> = bb.iter().map(|sq| sq.index()).collect();
        assert_eq!(squares, vec![0, 5, 7]);
    }
}
