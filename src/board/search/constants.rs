//! Search constants.
//!
//! Score bands, from the inside out: evaluator output is clamped to
//! `EVAL_LIMIT`, decided games score `WIN_SCORE`, and the search window
//! opens at `INFINITY`.

use crate::board::eval::EVAL_LIMIT;

// ============================================================================
// SCORES
// ============================================================================

/// Score of a finished game won by the side to move.
pub const WIN_SCORE: i32 = 100_000;

/// Outer bound of the full search window.
pub const INFINITY: i32 = 1_000_000;

const _: () = assert!(EVAL_LIMIT < WIN_SCORE && WIN_SCORE < INFINITY);

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: hash move > killers > corner >
// stable edge > center > mobility reduction

/// Best move stored by the previous iteration or the table
pub const HASH_MOVE_SCORE: i32 = 1 << 20;

/// Most recent killer; older killers score one less per slot
pub const KILLER_SCORE: i32 = 100_000;

pub const CORNER_SCORE: i32 = 10_000;

/// Edge cell joined to a corner the mover owns by an unbroken own run
pub const STABLE_EDGE_SCORE: i32 = 5_000;

pub const CENTER_SCORE: i32 = 1_000;

/// Upper bound of the mobility-reduction term (64 minus opponent replies).
pub const MOBILITY_BASE: i32 = 64;

// ============================================================================
// LIMITS
// ============================================================================

/// Node interval between stop-flag and deadline checks
pub const STOP_CHECK_INTERVAL: u64 = 1024;

/// Search thread stack size
pub const SEARCH_STACK_SIZE: usize = 8 * 1024 * 1024;
