//! Engine configuration.

use std::thread;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{EvaluatorKind, SearchParams};
use crate::book::BookPolicy;

/// Threads available to root workers, at least 1.
fn default_worker_count() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

/// Everything that distinguishes one engine from another.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub evaluator: EvaluatorKind,
    pub use_opening_book: bool,
    pub book_policy: BookPolicy,
    /// Root worker threads; 1 keeps every search sequential
    pub worker_count: usize,
    /// Seed for book move selection; `None` seeds from the OS
    pub rng_seed: Option<u64>,
    pub search: SearchParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            evaluator: EvaluatorKind::default(),
            use_opening_book: true,
            book_policy: BookPolicy::default(),
            worker_count: default_worker_count(),
            rng_seed: None,
            search: SearchParams::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: EvaluatorKind) -> Self {
        self.evaluator = evaluator;
        self
    }

    #[must_use]
    pub fn with_opening_book(mut self, enabled: bool) -> Self {
        self.use_opening_book = enabled;
        self
    }

    #[must_use]
    pub fn with_book_policy(mut self, policy: BookPolicy) -> Self {
        self.book_policy = policy;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.worker_count = workers.max(1);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: SearchParams) -> Self {
        self.search = search;
        self
    }
}
