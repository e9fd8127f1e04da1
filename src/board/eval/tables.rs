//! Evaluation constants and tables.
//!
//! Contains all tuned evaluation parameters used by the evaluation functions.

// ============================================================================
// SQUARE WEIGHTS
// ============================================================================

/// Static cell weights indexed `a1..h8`, symmetric across all four corners.
#[rustfmt::skip]
pub const SQUARE_WEIGHTS: [i32; 64] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

// ============================================================================
// CORNER GEOMETRY
// ============================================================================

/// (corner, X-square) pairs as cell indices: a1/b2, h1/g2, a8/b7, h8/g7.
pub const CORNER_X_SQUARES: [(u8, u8); 4] = [(0, 9), (7, 14), (56, 49), (63, 54)];

// ============================================================================
// GAME PHASE
// ============================================================================

/// Below this share of occupied cells (percent) the game is in its opening.
pub const OPENING_END_PCT: u32 = 30;

/// At or above this share of occupied cells (percent) the game is in its endgame.
pub const ENDGAME_START_PCT: u32 = 80;

// ============================================================================
// COMPOSITE WEIGHTS [opening, midgame, endgame]
// ============================================================================

pub const MOBILITY_WEIGHT: [i32; 3] = [5, 4, 2];
pub const CORNER_WEIGHT: [i32; 3] = [300, 250, 150];
pub const X_SQUARE_WEIGHT: [i32; 3] = [150, 120, 40];
pub const EDGE_WEIGHT: [i32; 3] = [5, 10, 15];
pub const FRONTIER_WEIGHT: [i32; 3] = [10, 8, 2];
pub const PARITY_WEIGHT: [i32; 3] = [0, 20, 60];
pub const DISC_WEIGHT: [i32; 3] = [-1, 0, 10];

/// Mobility is scaled as `MOBILITY_SCALE * (me - them) / (me + them + 2)`.
pub const MOBILITY_SCALE: i32 = 100;
