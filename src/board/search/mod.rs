//! Search module implementing negamax alpha-beta with iterative deepening.
//!
//! Features:
//! - Fail-hard alpha-beta over negamax scores
//! - Transposition table for cutoffs and move ordering
//! - Killer moves per remaining depth
//! - Static ordering: corner > stable edge > center > mobility reduction
//! - Root-split parallel search (see [`parallel`])
//!
//! A pass does not consume depth, so the remaining depth at any node is a
//! function of the root depth and the disc count alone.

mod constants;
mod move_order;
mod negamax;
pub mod parallel;
mod params;

use std::sync::Arc;

use crate::sync::{Deadline, StopCondition, StopFlag, StopReason};
use crate::tt::TranspositionTable;

use super::eval::Evaluator;
use super::{Board, Move, SearchError, MAX_PLY};

pub use constants::{INFINITY, WIN_SCORE};
pub use params::{SearchParams, DEFAULT_TT_MB, MAX_KILLER_SLOTS};

/// Counters gathered while searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    /// Beta cutoffs
    pub prunes: u64,
    pub tt_hits: u64,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.prunes += other.prunes;
        self.tt_hits += other.tt_hits;
    }

    pub fn reset(&mut self) {
        *self = SearchStats::default();
    }
}

/// Moves that caused a beta cutoff, indexed by remaining depth. Most recent
/// first; a new killer pushes out the oldest once the slots are full.
pub struct KillerTable {
    slots: [[Option<Move>; MAX_KILLER_SLOTS]; MAX_PLY + 1],
    capacity: usize,
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new(MAX_KILLER_SLOTS)
    }
}

impl KillerTable {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        KillerTable {
            slots: [[None; MAX_KILLER_SLOTS]; MAX_PLY + 1],
            capacity: capacity.min(MAX_KILLER_SLOTS),
        }
    }

    /// Killers recorded for `depth`, most recent first.
    #[must_use]
    pub fn get(&self, depth: u32) -> Vec<Move> {
        self.slots
            .get(depth as usize)
            .map(|row| row.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn update(&mut self, depth: u32, mv: Move) {
        if self.capacity == 0 {
            return;
        }
        let Some(row) = self.slots.get_mut(depth as usize) else {
            return;
        };
        if row[0] == Some(mv) {
            return;
        }
        let row = &mut row[..self.capacity];
        // Drop an older copy of the same move so it is not stored twice.
        let end = row
            .iter()
            .position(|&k| k == Some(mv))
            .unwrap_or(row.len() - 1);
        row[..=end].rotate_right(1);
        row[0] = Some(mv);
    }

    pub fn reset(&mut self) {
        for row in &mut self.slots {
            *row = [None; MAX_KILLER_SLOTS];
        }
    }
}

/// Tables owned by one search context.
pub struct SearchTables {
    /// `None` when the table is disabled
    pub tt: Option<TranspositionTable>,
    pub killer_moves: KillerTable,
}

/// Per-context search state: tables, counters and stop conditions.
pub struct SearchState {
    pub stats: SearchStats,
    pub tables: SearchTables,
    pub params: SearchParams,
    stop: StopCondition,
}

impl SearchState {
    #[must_use]
    pub fn new(params: SearchParams) -> Self {
        let tt = params
            .use_transposition_table
            .then(|| TranspositionTable::new(params.tt_size_mb));
        SearchState {
            stats: SearchStats::default(),
            tables: SearchTables {
                tt,
                killer_moves: KillerTable::new(params.killer_slots()),
            },
            params,
            stop: StopCondition::default(),
        }
    }

    /// Share an external stop flag; raising it aborts the search.
    #[must_use]
    pub fn with_stop_flag(mut self, stop: StopFlag) -> Self {
        self.stop = StopCondition::new(stop).with_deadline(self.stop.deadline());
        self
    }

    /// Abort with `DeadlineExceeded` once `deadline` passes.
    pub fn set_deadline(&mut self, deadline: Deadline) {
        self.stop.set_deadline(deadline);
    }

    #[must_use]
    pub fn stop_flag(&self) -> &StopFlag {
        self.stop.flag()
    }

    /// Clear per-search tables and counters.
    pub fn new_search(&mut self) {
        self.stats.reset();
        self.tables.killer_moves.reset();
        if let Some(tt) = self.tables.tt.as_mut() {
            tt.clear();
        }
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tables.tt.as_ref().map_or(0, TranspositionTable::hashfull_per_mille)
    }

    fn check_stop(&self) -> Result<(), SearchError> {
        match self.stop.poll() {
            Some(StopReason::Requested) => Err(SearchError::Aborted),
            Some(StopReason::DeadlineExceeded) => Err(SearchError::DeadlineExceeded),
            None => Ok(()),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(SearchParams::default())
    }
}

/// Outcome of a top-level search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal placement
    pub best_move: Option<Move>,
    /// Negamax score of `best_move` for the side to move
    pub score: i32,
    pub depth: u32,
    pub stats: SearchStats,
    /// Threads that evaluated root moves; 1 for sequential search
    pub workers: usize,
}

impl SearchResult {
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.workers > 1
    }
}

/// Pop everything a failed search left applied on top of `base`.
fn unwind_to<T>(
    board: &mut Board,
    base: usize,
    result: Result<T, SearchError>,
) -> Result<T, SearchError> {
    if result.is_err() {
        while board.undo_depth() > base {
            board.undo()?;
        }
    }
    result
}

/// Score `board` to `depth` with a full window, keeping whatever the
/// tables already hold. The board is unchanged afterwards.
pub fn score_position(
    board: &mut Board,
    state: &mut SearchState,
    evaluator: &dyn Evaluator,
    depth: u32,
) -> Result<i32, SearchError> {
    let base = board.undo_depth();
    let result = state.negamax(board, evaluator, depth, -INFINITY, INFINITY);
    unwind_to(board, base, result)
}

/// Single-threaded search. Depth 0 is searched as depth 1.
///
/// The tables are cleared once, then reused across the iterative
/// deepening iterations; each iteration tries the previous best move first.
/// The board is unchanged afterwards, also on error.
pub fn search_sequential(
    board: &mut Board,
    state: &mut SearchState,
    evaluator: &dyn Evaluator,
    depth: u32,
) -> Result<SearchResult, SearchError> {
    let base = board.undo_depth();
    let result = iterative_deepening(board, state, evaluator, depth);
    unwind_to(board, base, result)
}

fn iterative_deepening(
    board: &mut Board,
    state: &mut SearchState,
    evaluator: &dyn Evaluator,
    depth: u32,
) -> Result<SearchResult, SearchError> {
    state.new_search();
    let depth = depth.max(1);
    let first = if state.params.iterative_deepening { 1 } else { depth };

    let mut best: Option<(Move, i32)> = None;
    for iteration in first..=depth {
        let hint = best.map(|(mv, _)| mv);
        match state.search_root(board, evaluator, iteration, hint)? {
            Some(found) => best = Some(found),
            None => break,
        }
        log::trace!(
            "depth {} best {:?} nodes {} prunes {}",
            iteration,
            best.map(|(mv, _)| mv),
            state.stats.nodes,
            state.stats.prunes
        );
    }

    Ok(SearchResult {
        best_move: best.map(|(mv, _)| mv),
        score: best.map_or(0, |(_, score)| score),
        depth,
        stats: state.stats,
        workers: 1,
    })
}

/// Pick the best move for the side to move, splitting the root across
/// `workers` threads when the parameters allow it.
pub fn find_best_move(
    board: &Board,
    evaluator: Arc<dyn Evaluator>,
    params: &SearchParams,
    depth: u32,
    workers: usize,
    stop: &StopFlag,
) -> Result<SearchResult, SearchError> {
    let depth = depth.max(1);
    let root_moves = board.legal_moves().len();
    if params.should_parallelize(depth, root_moves, workers) {
        return parallel::search_parallel(board, evaluator, params, depth, workers, stop);
    }

    let mut board = board.clone();
    let mut state = SearchState::new(params.clone()).with_stop_flag(stop.clone());
    search_sequential(&mut board, &mut state, evaluator.as_ref(), depth)
}
