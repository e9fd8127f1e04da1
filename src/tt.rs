//! Transposition table for caching search results.
//!
//! Uses Zobrist hashes to store and retrieve position evaluations,
//! enabling significant search tree pruning.
//!
//! A table is owned by exactly one search context and is never shared
//! between threads; parallel root workers each build their own.

use std::mem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Move, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    fn to_u8(self) -> u8 {
        match self {
            BoundType::Exact => 0,
            BoundType::LowerBound => 1,
            BoundType::UpperBound => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v & 0x3 {
            0 => BoundType::Exact,
            1 => BoundType::LowerBound,
            _ => BoundType::UpperBound,
        }
    }
}

/// Unpacked TT entry for reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i32,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        u32::from(self.depth)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// Score this entry allows the caller to return directly for a node
    /// searched to `depth` with window `(alpha, beta)`, if any.
    #[must_use]
    pub fn cutoff_score(&self, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth() < depth {
            return None;
        }
        match self.bound_type {
            BoundType::Exact => Some(self.score),
            BoundType::LowerBound if self.score >= beta => Some(self.score),
            BoundType::UpperBound if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

/// Marks a slot as occupied so an all-zero entry is never mistaken for data.
const VALID_BIT: u64 = 1 << 49;

/// Packed entry format (fits in 64 bits):
/// - bits 0-31:  score (i32 as u32)
/// - bits 32-39: depth (u8)
/// - bits 40-41: bound
/// - bits 42-48: best move cell + 1 (0 = no move)
/// - bit 49:     valid flag
fn pack_entry(depth: u8, score: i32, bound_type: BoundType, best_move: Option<Move>) -> u64 {
    let mv: u64 = best_move.map_or(0, |m| m.index() as u64 + 1);
    u64::from(score as u32)
        | (u64::from(depth) << 32)
        | (u64::from(bound_type.to_u8()) << 40)
        | (mv << 42)
        | VALID_BIT
}

fn unpack_entry(data: u64) -> TTEntry {
    let score = (data & 0xFFFF_FFFF) as u32 as i32;
    let depth = ((data >> 32) & 0xFF) as u8;
    let bound_type = BoundType::from_u8(((data >> 40) & 0x3) as u8);
    let mv_bits = ((data >> 42) & 0x7F) as u8;

    let best_move = if mv_bits == 0 {
        None
    } else {
        Some(Move::new(Square::from_index_const(mv_bits - 1)))
    };

    TTEntry {
        depth,
        score,
        bound_type,
        best_move,
    }
}

#[derive(Clone, Copy, Default)]
#[repr(C)]
struct TTSlot {
    key: u64,
    data: u64,
}

impl TTSlot {
    fn is_empty(&self) -> bool {
        self.data == 0
    }

    fn matches(&self, hash: u64) -> bool {
        !self.is_empty() && self.key == hash
    }

    fn depth(&self) -> u8 {
        ((self.data >> 32) & 0xFF) as u8
    }
}

/// Number of slots per bucket for collision resolution
const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy, Default)]
#[repr(C)]
struct TTBucket {
    slots: [TTSlot; BUCKET_SIZE],
}

/// Bucketed transposition table with depth-preferred replacement.
pub struct TranspositionTable {
    buckets: Vec<TTBucket>,
    mask: usize,
    stored: usize,
}

impl TranspositionTable {
    /// Create a table of at most `size_mb` megabytes, rounded down to a
    /// power-of-two bucket count. Sizes below one bucket get 1024 buckets.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let bucket_size = mem::size_of::<TTBucket>();
        let requested = size_mb.saturating_mul(1024 * 1024) / bucket_size;
        let num_buckets = match requested {
            0 => 1024,
            n => 1 << (usize::BITS - 1 - n.leading_zeros()),
        };

        TranspositionTable {
            buckets: vec![TTBucket::default(); num_buckets],
            mask: num_buckets - 1,
            stored: 0,
        }
    }

    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Probe the table for an entry matching the given hash.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.buckets[self.index(hash)]
            .slots
            .iter()
            .find(|slot| slot.matches(hash))
            .map(|slot| unpack_entry(slot.data))
    }

    /// Store an entry, preferring (in order) a slot with the same hash, an
    /// empty slot, then the shallowest entry in the bucket.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        let depth_u8 = depth.min(255) as u8;
        let packed = pack_entry(depth_u8, score, bound_type, best_move);
        let idx = self.index(hash);
        let bucket = &mut self.buckets[idx];

        let target = bucket
            .slots
            .iter()
            .position(|slot| slot.matches(hash))
            .or_else(|| bucket.slots.iter().position(TTSlot::is_empty));

        let slot_idx = match target {
            Some(i) => i,
            None => bucket
                .slots
                .iter()
                .enumerate()
                .min_by_key(|(_, slot)| slot.depth())
                .map_or(0, |(i, _)| i),
        };

        if bucket.slots[slot_idx].is_empty() {
            self.stored += 1;
        }
        bucket.slots[slot_idx] = TTSlot { key: hash, data: packed };
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stored
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stored == 0
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let total_slots = self.buckets.len() * BUCKET_SIZE;
        ((self.stored as u64 * 1000) / total_slots as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        if self.stored == 0 {
            return;
        }
        self.buckets.fill(TTBucket::default());
        self.stored = 0;
    }
}
