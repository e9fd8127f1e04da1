//! Core board types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Color` - disc owner
//! - `Square` - compact cell representation (u8 index)
//! - `Bitboard` and `Direction` - 64-bit occupancy sets and ray shifts
//! - `Move` and `MoveList` - move representation

mod bitboard;
mod color;
mod moves;
mod square;

pub use bitboard::{Bitboard, BitboardIter, Direction};
pub use color::Color;
pub use moves::{Move, MoveList};
pub use square::Square;

pub(crate) use moves::{ScoredMoveList, MAX_PLY};
