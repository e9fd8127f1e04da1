//! Zobrist hashing for board positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for transposition tables.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Square};

pub(crate) struct ZobristKeys {
    // disc_keys[color][square_index]
    pub(crate) disc_keys: [[u64; 64]; 2],
    pub(crate) white_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // Use a fixed seed for reproducibility
        let mut disc_keys = [[0; 64]; 2];

        for color in &mut disc_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        let white_to_move_key = rng.gen();

        ZobristKeys {
            disc_keys,
            white_to_move_key,
        }
    }

    #[inline]
    pub(crate) fn disc(&self, color: Color, sq: Square) -> u64 {
        self.disc_keys[color.index()][sq.as_index()]
    }

    /// XOR of the keys for every cell in `mask` owned by `color`.
    #[inline]
    pub(crate) fn discs(&self, color: Color, mask: crate::board::Bitboard) -> u64 {
        mask.iter().fold(0, |acc, sq| acc ^ self.disc(color, sq))
    }

    #[inline]
    pub(crate) fn side(&self, color: Color) -> u64 {
        match color {
            Color::Black => 0,
            Color::White => self.white_to_move_key,
        }
    }
}

// Initialize Zobrist keys lazily and globally
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = HashSet::new();
        for color in Color::BOTH {
            for idx in 0..64 {
                let sq = Square::from_index(idx).unwrap();
                assert!(seen.insert(ZOBRIST.disc(color, sq)));
            }
        }
        assert!(seen.insert(ZOBRIST.white_to_move_key));
    }

    #[test]
    fn test_black_to_move_contributes_nothing() {
        assert_eq!(ZOBRIST.side(Color::Black), 0);
        assert_ne!(ZOBRIST.side(Color::White), 0);
    }
}
