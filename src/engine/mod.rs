//! Engine facade: opening book first, then search.
//!
//! This is the surface collaborators use. It answers two questions,
//! "best move for this board at this depth" and "is this move legal here",
//! and keeps a report of how the last answer was produced.

mod config;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{find_best_move, Board, Evaluator, Move, SearchError, SearchStats};
use crate::book::OpeningBook;
use crate::sync::StopFlag;

pub use config::EngineConfig;

/// Where the last move came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchSource {
    Book,
    Sequential,
    Parallel,
}

/// Summary of the last `get_best_move` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub source: SearchSource,
    pub best_move: Option<Move>,
    /// Search score for the side to move; `None` for book moves
    pub score: Option<i32>,
    pub depth: u32,
    pub stats: SearchStats,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Whether `mv` may be played on `board`.
#[must_use]
pub fn is_legal_move(board: &Board, mv: Move) -> bool {
    board.is_legal_move(mv)
}

/// Configured engine. Owns its book handle, evaluator and RNG; every
/// search builds fresh tables.
pub struct Engine {
    config: EngineConfig,
    evaluator: Arc<dyn Evaluator>,
    book: Option<Arc<OpeningBook>>,
    rng: StdRng,
    stop: StopFlag,
    last_report: Option<SearchReport>,
}

impl Engine {
    /// Build an engine from `config`, loading the built-in book when the
    /// book is enabled.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let book = config
            .use_opening_book
            .then(|| Arc::new(OpeningBook::builtin()));
        Engine {
            evaluator: Arc::new(config.evaluator),
            config,
            book,
            rng,
            stop: StopFlag::new(),
            last_report: None,
        }
    }

    /// Replace the configured evaluator with a custom one.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Replace the built-in book. Ignored while the book is disabled.
    #[must_use]
    pub fn with_book(mut self, book: Arc<OpeningBook>) -> Self {
        if self.config.use_opening_book {
            self.book = Some(book);
        }
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn evaluator_name(&self) -> &'static str {
        self.evaluator.name()
    }

    /// Handle that aborts the running search when raised from another
    /// thread. Cleared at the start of every search.
    #[must_use]
    pub fn stop_handle(&self) -> StopFlag {
        self.stop.clone()
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    #[must_use]
    pub fn is_legal_move(&self, board: &Board, mv: Move) -> bool {
        is_legal_move(board, mv)
    }

    /// Names of book openings consistent with the board's history.
    #[must_use]
    pub fn opening_names(&self, board: &Board) -> Vec<String> {
        self.book
            .as_ref()
            .filter(|_| board.history_matches_position())
            .map(|book| {
                book.opening_names_matching(board.history())
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Best move for the side to move, searching `depth` plies when the
    /// book has nothing. `Ok(None)` means the side to move must pass.
    pub fn get_best_move(&mut self, board: &Board, depth: u32) -> Result<Option<Move>, SearchError> {
        let start = Instant::now();
        self.stop.reset();
        self.last_report = None;

        if !board.has_legal_move() {
            return Ok(None);
        }

        // A parsed diagram has no history to look up.
        if let Some(book) = self.book.as_ref().filter(|_| board.history_matches_position()) {
            if let Some(mv) = book.choose_move(board, self.config.book_policy, &mut self.rng) {
                self.finish(SearchReport {
                    source: SearchSource::Book,
                    best_move: Some(mv),
                    score: None,
                    depth: 0,
                    stats: SearchStats::default(),
                    workers: 1,
                    elapsed: start.elapsed(),
                });
                return Ok(Some(mv));
            }
        }

        let result = find_best_move(
            board,
            Arc::clone(&self.evaluator),
            &self.config.search,
            depth,
            self.config.worker_count,
            &self.stop,
        )?;

        self.finish(SearchReport {
            source: if result.parallel() {
                SearchSource::Parallel
            } else {
                SearchSource::Sequential
            },
            best_move: result.best_move,
            score: Some(result.score),
            depth: result.depth,
            stats: result.stats,
            workers: result.workers,
            elapsed: start.elapsed(),
        });
        Ok(result.best_move)
    }

    fn finish(&mut self, report: SearchReport) {
        log::debug!(
            "{:?} move {:?} score {:?} depth {} nodes {} prunes {} tt_hits {} workers {} in {:?}",
            report.source,
            report.best_move,
            report.score,
            report.depth,
            report.stats.nodes,
            report.stats.prunes,
            report.stats.tt_hits,
            report.workers,
            report.elapsed
        );
        self.last_report = Some(report);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineConfig::default())
    }
}
