use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Most killer moves remembered per depth.
pub const MAX_KILLER_SLOTS: usize = 2;

/// Default transposition table size in MB
pub const DEFAULT_TT_MB: usize = 16;

/// Tunable search behaviour.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchParams {
    pub use_transposition_table: bool,
    pub tt_size_mb: usize,
    /// Clamped to `MAX_KILLER_SLOTS`; zero disables killers.
    pub killer_move_slots: usize,
    pub iterative_deepening: bool,
    /// Smallest depth searched with root parallelism
    pub parallel_min_depth: u32,
    /// Smallest root move count searched with root parallelism
    pub parallel_min_moves: usize,
    /// Wall-clock limit for one root worker task; its move is skipped on expiry.
    pub worker_deadline: Option<Duration>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            use_transposition_table: true,
            tt_size_mb: DEFAULT_TT_MB,
            killer_move_slots: MAX_KILLER_SLOTS,
            iterative_deepening: true,
            parallel_min_depth: 4,
            parallel_min_moves: 4,
            worker_deadline: None,
        }
    }
}

impl SearchParams {
    #[must_use]
    pub fn with_transposition_table(mut self, enabled: bool) -> Self {
        self.use_transposition_table = enabled;
        self
    }

    #[must_use]
    pub fn with_tt_size_mb(mut self, size_mb: usize) -> Self {
        self.tt_size_mb = size_mb;
        self
    }

    #[must_use]
    pub fn with_killer_move_slots(mut self, slots: usize) -> Self {
        self.killer_move_slots = slots.min(MAX_KILLER_SLOTS);
        self
    }

    #[must_use]
    pub fn with_iterative_deepening(mut self, enabled: bool) -> Self {
        self.iterative_deepening = enabled;
        self
    }

    #[must_use]
    pub fn with_parallel_thresholds(mut self, min_depth: u32, min_moves: usize) -> Self {
        self.parallel_min_depth = min_depth;
        self.parallel_min_moves = min_moves;
        self
    }

    #[must_use]
    pub fn with_worker_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.worker_deadline = deadline;
        self
    }

    /// Killer slots actually used.
    #[must_use]
    pub fn killer_slots(&self) -> usize {
        self.killer_move_slots.min(MAX_KILLER_SLOTS)
    }

    /// Whether the root of a `depth` search over `root_moves` moves should
    /// be split across `workers` threads.
    #[must_use]
    pub fn should_parallelize(&self, depth: u32, root_moves: usize, workers: usize) -> bool {
        depth >= self.parallel_min_depth && root_moves >= self.parallel_min_moves && workers >= 2
    }
}
