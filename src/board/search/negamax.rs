//! Node expansion: fail-hard negamax alpha-beta.

use super::constants::{STOP_CHECK_INTERVAL, WIN_SCORE};
use super::move_order::order_moves;
use super::{SearchState, INFINITY};
use crate::board::eval::{Evaluator, EVAL_LIMIT};
use crate::board::{Board, Move, Outcome, SearchError};
use crate::tt::BoundType;

/// Exact score of a finished game for the side to move.
pub(crate) fn terminal_score(board: &Board) -> i32 {
    match board.outcome() {
        Outcome::Win => WIN_SCORE,
        Outcome::Loss => -WIN_SCORE,
        Outcome::Draw => 0,
    }
}

impl SearchState {
    /// Negamax value of `board` at remaining `depth` inside `(alpha, beta)`.
    ///
    /// Returns `beta` on a cutoff and `alpha` when every move fails low.
    /// The board is unchanged on `Ok`.
    pub(crate) fn negamax(
        &mut self,
        board: &mut Board,
        evaluator: &dyn Evaluator,
        depth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, SearchError> {
        if self.stats.nodes % STOP_CHECK_INTERVAL == 0 {
            self.check_stop()?;
        }
        self.stats.nodes += 1;

        let hash = board.hash();
        let mut hash_move = None;
        if let Some(entry) = self.tables.tt.as_ref().and_then(|tt| tt.probe(hash)) {
            if let Some(score) = entry.cutoff_score(depth, alpha, beta) {
                self.stats.tt_hits += 1;
                return Ok(score);
            }
            hash_move = entry.best_move();
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            if board.mobility(board.side_to_move().opponent()) == 0 {
                return Ok(terminal_score(board));
            }
            if depth == 0 {
                return Ok(evaluator.evaluate(board).clamp(-EVAL_LIMIT, EVAL_LIMIT));
            }
            board.pass()?;
            let score = self.negamax(board, evaluator, depth, -beta, -alpha);
            board.undo()?;
            return Ok(-score?);
        }

        if depth == 0 {
            return Ok(evaluator.evaluate(board).clamp(-EVAL_LIMIT, EVAL_LIMIT));
        }

        let killers = self.tables.killer_moves.get(depth);
        let ordered = order_moves(board, &moves, hash_move, &killers);

        let alpha_orig = alpha;
        let mut best_move: Option<Move> = None;
        for scored in ordered.iter() {
            let mv = scored.mv;
            board.apply(mv)?;
            let child = self.negamax(board, evaluator, depth - 1, -beta, -alpha);
            board.undo()?;
            let score = -child?;

            if score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
            if alpha >= beta {
                self.tables.killer_moves.update(depth, mv);
                self.stats.prunes += 1;
                self.store(hash, depth, beta, BoundType::LowerBound, Some(mv));
                return Ok(beta);
            }
        }

        let bound = if alpha <= alpha_orig {
            BoundType::UpperBound
        } else {
            BoundType::Exact
        };
        self.store(hash, depth, alpha, bound, best_move);
        Ok(alpha)
    }

    fn store(&mut self, hash: u64, depth: u32, score: i32, bound: BoundType, mv: Option<Move>) {
        if let Some(tt) = self.tables.tt.as_mut() {
            tt.store(hash, depth, score, bound, mv);
        }
    }

    /// One root iteration with a full window. Moves are tried with `hint`
    /// first, then in search order; a later move replaces the best only
    /// when strictly better. Returns `None` when there is no legal move.
    pub(crate) fn search_root(
        &mut self,
        board: &mut Board,
        evaluator: &dyn Evaluator,
        depth: u32,
        hint: Option<Move>,
    ) -> Result<Option<(Move, i32)>, SearchError> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Ok(None);
        }
        let killers = self.tables.killer_moves.get(depth);
        let ordered = order_moves(board, &moves, hint, &killers);

        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;
        for scored in ordered.iter() {
            let mv = scored.mv;
            board.apply(mv)?;
            let child = self.negamax(board, evaluator, depth - 1, -INFINITY, -alpha);
            board.undo()?;
            let score = -child?;

            if best.map_or(true, |(_, b)| score > b) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }
        Ok(best)
    }
}
