//! Root-split parallel search.
//!
//! Every root move becomes one task on a shared queue. Workers pop tasks,
//! search the child position on their own board clone with a fresh
//! transposition table and a full window, and send the score back over a
//! channel. Nothing mutable is shared between workers besides the queue.
//!
//! Aggregation is order-independent: scores are slotted by root move
//! order and the first strictly best move in that order wins.
//!
//! Recovery:
//! - a task whose deadline expires is skipped
//! - a task that fails or panics is re-searched on the calling thread
//! - when no task produced a score the whole ply is searched sequentially

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use super::constants::SEARCH_STACK_SIZE;
use super::move_order::order_moves;
use super::{score_position, search_sequential, SearchParams, SearchResult, SearchState, SearchStats};
use crate::board::eval::Evaluator;
use crate::board::{Board, Move, SearchError};
use crate::sync::{Deadline, StopFlag};

/// One root move to evaluate.
#[derive(Clone, Copy, Debug)]
struct RootTask {
    order: usize,
    mv: Move,
}

#[derive(Debug)]
enum TaskOutcome {
    Scored { score: i32, stats: SearchStats },
    TimedOut,
    Aborted,
    Failed(String),
}

/// Result sent back by a worker for one task
#[derive(Debug)]
struct TaskReport {
    order: usize,
    worker_id: usize,
    outcome: TaskOutcome,
}

/// Score of `mv` for the side to move on `board`, searched to `depth - 1`
/// below the move on a private clone and table.
fn search_root_move(
    board: &Board,
    mv: Move,
    evaluator: &dyn Evaluator,
    params: &SearchParams,
    depth: u32,
    stop: &StopFlag,
) -> Result<(i32, SearchStats), SearchError> {
    let mut child = board.clone();
    child.apply(mv)?;
    let mut state = SearchState::new(params.clone()).with_stop_flag(stop.clone());
    state.set_deadline(Deadline::from_limit(params.worker_deadline));
    let score = -score_position(&mut child, &mut state, evaluator, depth - 1)?;
    Ok((score, state.stats))
}

/// Worker loop: pop tasks until the queue is empty or the coordinator
/// stops listening.
#[allow(clippy::too_many_arguments, clippy::needless_pass_by_value)]
fn run_worker(
    worker_id: usize,
    board: Board,
    queue: Arc<Mutex<VecDeque<RootTask>>>,
    results: Sender<TaskReport>,
    evaluator: Arc<dyn Evaluator>,
    params: SearchParams,
    depth: u32,
    stop: StopFlag,
) {
    loop {
        let Some(task) = queue.lock().pop_front() else {
            break;
        };

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            search_root_move(&board, task.mv, evaluator.as_ref(), &params, depth, &stop)
        }));
        let outcome = match attempt {
            Ok(Ok((score, stats))) => TaskOutcome::Scored { score, stats },
            Ok(Err(SearchError::DeadlineExceeded)) => TaskOutcome::TimedOut,
            Ok(Err(SearchError::Aborted)) => TaskOutcome::Aborted,
            Ok(Err(e)) => TaskOutcome::Failed(e.to_string()),
            Err(_) => TaskOutcome::Failed("worker panicked".to_string()),
        };

        let report = TaskReport {
            order: task.order,
            worker_id,
            outcome,
        };
        if results.send(report).is_err() {
            break;
        }
    }
}

/// Evaluate every root move of `board` on up to `workers` threads and pick
/// the best. Scores equal a sequential search of the same depth.
pub fn search_parallel(
    board: &Board,
    evaluator: Arc<dyn Evaluator>,
    params: &SearchParams,
    depth: u32,
    workers: usize,
    stop: &StopFlag,
) -> Result<SearchResult, SearchError> {
    let depth = depth.max(1);
    let moves = board.legal_moves();
    if moves.is_empty() {
        return sequential_fallback(board, evaluator.as_ref(), params, depth, stop);
    }

    let tasks: Vec<RootTask> = order_moves(board, &moves, None, &[])
        .iter()
        .enumerate()
        .map(|(order, scored)| RootTask {
            order,
            mv: scored.mv,
        })
        .collect();
    let queue = Arc::new(Mutex::new(tasks.iter().copied().collect::<VecDeque<_>>()));
    let (tx, rx) = mpsc::channel();

    let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(workers);
    for worker_id in 0..workers.min(tasks.len()) {
        let board_clone = board.clone();
        let queue_clone = Arc::clone(&queue);
        let tx_clone = tx.clone();
        let evaluator_clone = Arc::clone(&evaluator);
        let params_clone = params.clone();
        let stop_clone = stop.clone();

        let spawned = thread::Builder::new()
            .name(format!("root-{worker_id}"))
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                run_worker(
                    worker_id,
                    board_clone,
                    queue_clone,
                    tx_clone,
                    evaluator_clone,
                    params_clone,
                    depth,
                    stop_clone,
                );
            });
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => log::warn!("failed to spawn root worker {worker_id}: {e}"),
        }
    }
    drop(tx);

    // Blocks until every worker has exited and dropped its sender.
    let mut outcomes: Vec<Option<TaskOutcome>> = tasks.iter().map(|_| None).collect();
    for report in rx {
        log::trace!("root-{} finished task {}", report.worker_id, report.order);
        outcomes[report.order] = Some(report.outcome);
    }
    let spawned = handles.len();
    for handle in handles {
        if handle.join().is_err() {
            log::warn!("root worker exited abnormally");
        }
    }

    if stop.is_stopped() {
        return Err(SearchError::Aborted);
    }

    let mut stats = SearchStats::default();
    let mut scores: Vec<Option<i32>> = vec![None; tasks.len()];
    for (task, outcome) in tasks.iter().zip(outcomes) {
        let reason = match outcome {
            Some(TaskOutcome::Scored { score, stats: task_stats }) => {
                scores[task.order] = Some(score);
                stats.merge(&task_stats);
                continue;
            }
            Some(TaskOutcome::TimedOut) => {
                log::warn!("root move {} exceeded the worker deadline; skipped", task.mv);
                continue;
            }
            Some(TaskOutcome::Aborted) => return Err(SearchError::Aborted),
            Some(TaskOutcome::Failed(reason)) => reason,
            None => "never searched".to_string(),
        };
        log::warn!("root move {} failed ({reason}); retrying sequentially", task.mv);
        let (score, task_stats) = retry(board, task.mv, evaluator.as_ref(), params, depth, stop)?;
        scores[task.order] = Some(score);
        stats.merge(&task_stats);
    }

    let Some((order, score)) = select_best(&scores) else {
        log::warn!("no root move produced a score; searching the whole ply sequentially");
        return sequential_fallback(board, evaluator.as_ref(), params, depth, stop);
    };

    Ok(SearchResult {
        best_move: Some(tasks[order].mv),
        score,
        depth,
        stats,
        workers: spawned.max(1),
    })
}

/// First strictly maximal score in root order.
fn select_best(scores: &[Option<i32>]) -> Option<(usize, i32)> {
    let mut best: Option<(usize, i32)> = None;
    for (order, score) in scores.iter().enumerate() {
        let Some(score) = *score else {
            continue;
        };
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((order, score));
        }
    }
    best
}

fn retry(
    board: &Board,
    mv: Move,
    evaluator: &dyn Evaluator,
    params: &SearchParams,
    depth: u32,
    stop: &StopFlag,
) -> Result<(i32, SearchStats), SearchError> {
    let unbounded = params.clone().with_worker_deadline(None);
    search_root_move(board, mv, evaluator, &unbounded, depth, stop)
}

fn sequential_fallback(
    board: &Board,
    evaluator: &dyn Evaluator,
    params: &SearchParams,
    depth: u32,
    stop: &StopFlag,
) -> Result<SearchResult, SearchError> {
    let mut board = board.clone();
    let unbounded = params.clone().with_worker_deadline(None);
    let mut state = SearchState::new(unbounded).with_stop_flag(stop.clone());
    search_sequential(&mut board, &mut state, evaluator, depth)
}
