//! Negamax alpha-beta search with quiescence, transposition table and
//! iterative deepening.
//!
//! Two invariants govern every exit path, stopped or not: the position and
//! undo stack are restored exactly (each `make_move` pairs with one
//! `undo_move`), and scores produced after a stop are discarded rather
//! than trusted.

use crate::board::Position;
use crate::moves::execute::{generate_legal, make_move, undo_move};
use crate::moves::movegen::generate_pseudo_legal;
use crate::moves::square_control::in_check;
use crate::moves::tables::AttackTables;
use crate::moves::types::{Move, MoveList, UndoRecord};
use crate::search::eval::evaluate;
use crate::search::tt::{Bound, TranspositionTable};
use crate::status::repetition_count;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

pub const INF: i32 = 32_000;
pub const MATE: i32 = 30_000;
/// Scores beyond this are mate-in-N and carry a ply distance.
pub const MATE_THRESHOLD: i32 = MATE - 512;

const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_SCORE: i32 = 10_000;
const PROMOTION_SCORE: i32 = 9_000;
/// How often the deadline clock is consulted, in nodes. The cancel flag is
/// read at every node; only the `Instant::now` call is amortized.
const DEADLINE_CHECK_INTERVAL: u64 = 64;

/// Cooperative stop: an external cancel flag plus an optional deadline.
pub struct SearchControl {
    cancel: Arc<AtomicBool>,
    deadline: Option<Instant>,
    stopped: bool,
    pub nodes: u64,
}

impl SearchControl {
    pub fn new(cancel: Arc<AtomicBool>, deadline: Option<Instant>) -> Self {
        SearchControl {
            cancel,
            deadline,
            stopped: false,
            nodes: 0,
        }
    }

    /// A control that only stops when its private flag is never set.
    pub fn unlimited() -> Self {
        SearchControl::new(Arc::new(AtomicBool::new(false)), None)
    }

    #[inline(always)]
    fn check_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.cancel.load(Ordering::Relaxed) {
            self.stopped = true;
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.stopped = true;
                return true;
            }
        }
        false
    }

    #[inline(always)]
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Mate scores entering the table are made ply-independent, and restored to
/// the probing node's distance on the way out.
fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply
    } else if score <= -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply
    } else if score <= -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

fn move_order_score(pos: &Position, mv: Move, tt_move: Option<Move>) -> i32 {
    if Some(mv) == tt_move {
        return TT_MOVE_SCORE;
    }
    let mut score = 0;
    if mv.is_capture() {
        // Most-valuable-victim first, cheapest attacker breaking ties.
        let victim = pos
            .piece_at(mv.to())
            .map(|(_, piece)| piece.value())
            .unwrap_or(100); // en passant takes a pawn off an empty target
        let attacker = pos
            .piece_at(mv.from())
            .map(|(_, piece)| piece.value())
            .unwrap_or(0);
        score += CAPTURE_SCORE + victim * 10 - attacker / 10;
    }
    if let Some(promo) = mv.promotion() {
        score += PROMOTION_SCORE + promo.value();
    }
    score
}

fn order_moves(pos: &Position, moves: &mut [Move], tt_move: Option<Move>) {
    moves.sort_by_cached_key(|&mv| -move_order_score(pos, mv, tt_move));
}

/// Capture-only extension of the static evaluation. Stands pat on quiet
/// positions so the horizon lands on stable material balances.
fn quiescence(
    pos: &mut Position,
    tables: &AttackTables,
    ctrl: &mut SearchControl,
    ply: i32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    ctrl.nodes += 1;
    if ctrl.check_stop() {
        return 0;
    }

    let stand_pat = evaluate(pos);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut pseudo = MoveList::new();
    generate_pseudo_legal(pos, tables, &mut pseudo);
    pseudo.retain(|mv| mv.is_capture() || mv.is_promotion());
    order_moves(pos, &mut pseudo, None);

    let mover = pos.side_to_move();
    for &mv in pseudo.iter() {
        if ctrl.check_stop() {
            return 0;
        }
        let Some(undo) = make_move(pos, mv) else {
            continue;
        };
        if in_check(pos, tables, mover) {
            undo_move(pos, undo);
            continue;
        }
        let score = -quiescence(pos, tables, ctrl, ply + 1, -beta, -alpha);
        undo_move(pos, undo);

        if ctrl.stopped() {
            return 0;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

#[allow(clippy::too_many_arguments)]
fn alpha_beta(
    pos: &mut Position,
    history: &mut Vec<UndoRecord>,
    tables: &AttackTables,
    tt: &mut TranspositionTable,
    ctrl: &mut SearchControl,
    depth: i32,
    ply: i32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    ctrl.nodes += 1;
    if ctrl.check_stop() {
        return 0;
    }

    // A position already visited on the path (or in the game) scores as a
    // draw: the opponent can simply repeat.
    if ply > 0 && repetition_count(pos, history) >= 2 {
        return 0;
    }

    let hash = pos.hash();
    let mut tt_move = None;
    if let Some(entry) = tt.probe(hash) {
        tt_move = entry.best_move;
        if entry.depth >= depth && ply > 0 {
            let score = score_from_tt(entry.score, ply);
            match entry.bound {
                Bound::Exact => return score,
                Bound::Lower if score >= beta => return beta,
                Bound::Upper if score <= alpha => return alpha,
                _ => {}
            }
        }
    }

    if depth <= 0 {
        return quiescence(pos, tables, ctrl, ply, alpha, beta);
    }

    let mut moves = MoveList::new();
    generate_legal(pos, tables, &mut moves);
    if moves.is_empty() {
        return if in_check(pos, tables, pos.side_to_move()) {
            // Nearer mates score higher for the winner.
            -(MATE - ply)
        } else {
            0
        };
    }
    order_moves(pos, &mut moves, tt_move);

    let original_alpha = alpha;
    let mut best_move = None;

    for &mv in moves.iter() {
        if ctrl.check_stop() {
            return 0;
        }
        let undo = make_move(pos, mv).expect("generated move applies");
        history.push(undo);
        let score = -alpha_beta(
            pos,
            history,
            tables,
            tt,
            ctrl,
            depth - 1,
            ply + 1,
            -beta,
            -alpha,
        );
        let undo = history.pop().expect("own frame still on stack");
        undo_move(pos, undo);

        if ctrl.stopped() {
            return 0;
        }
        if score >= beta {
            tt.store(hash, depth, score_to_tt(beta, ply), Bound::Lower, Some(mv));
            return beta;
        }
        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
    }

    let bound = if alpha > original_alpha {
        Bound::Exact
    } else {
        Bound::Upper
    };
    tt.store(hash, depth, score_to_tt(alpha, ply), bound, best_move);

    alpha
}

/// One root move with the score of its subtree.
#[derive(Debug, Clone, Copy)]
pub struct RootMove {
    pub mv: Move,
    pub score: i32,
}

#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub best: Option<Move>,
    pub score: i32,
    /// Deepest iteration that ran to completion; 0 when even depth 1 was
    /// interrupted.
    pub depth_completed: u32,
    /// Root moves scored at the deepest completed iteration, best first.
    pub root_moves: Vec<RootMove>,
    pub nodes: u64,
    pub stopped: bool,
}

/// Iterative-deepening driver. Deepens from 1 to `max_depth`, keeping the
/// result of the last iteration that finished; an interrupt mid-iteration
/// discards that iteration's partial scores.
///
/// `full_width_root` searches every root move with an open window so the
/// returned scores are exact, at some pruning cost. Randomized move
/// selection needs that; plain strongest-move search does not.
pub fn search_root(
    pos: &mut Position,
    history: &mut Vec<UndoRecord>,
    tables: &AttackTables,
    tt: &mut TranspositionTable,
    ctrl: &mut SearchControl,
    max_depth: u32,
    full_width_root: bool,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();

    let mut legal = MoveList::new();
    generate_legal(pos, tables, &mut legal);
    if legal.is_empty() {
        return outcome;
    }

    // A prior search of this position seeds the first iteration's ordering.
    let mut previous_best: Option<Move> = tt.probe(pos.hash()).and_then(|e| e.best_move);

    for depth in 1..=max_depth {
        let iteration_start = Instant::now();
        // The previous iteration's best move leads; it usually survives.
        order_moves(pos, &mut legal, previous_best);

        let mut alpha = -INF;
        let mut scored: Vec<RootMove> = Vec::with_capacity(legal.len());
        let mut iteration_best = None;
        let mut interrupted = false;

        for &mv in legal.iter() {
            if ctrl.check_stop() {
                interrupted = true;
                break;
            }
            let window_alpha = if full_width_root { -INF } else { alpha };

            let undo = make_move(pos, mv).expect("legal move applies");
            history.push(undo);
            let score = -alpha_beta(
                pos,
                history,
                tables,
                tt,
                ctrl,
                depth as i32 - 1,
                1,
                -INF,
                -window_alpha,
            );
            let undo = history.pop().expect("own frame still on stack");
            undo_move(pos, undo);

            if ctrl.stopped() {
                interrupted = true;
                break;
            }
            scored.push(RootMove { mv, score });
            if iteration_best.is_none() || score > alpha {
                alpha = alpha.max(score);
                iteration_best = Some(mv);
            }
        }

        if interrupted {
            outcome.stopped = true;
            break;
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        outcome.best = iteration_best.or_else(|| scored.first().map(|r| r.mv));
        outcome.score = alpha;
        outcome.depth_completed = depth;
        outcome.root_moves = scored;
        previous_best = outcome.best;
        tt.store(
            pos.hash(),
            depth as i32,
            score_to_tt(outcome.score, 0),
            Bound::Exact,
            outcome.best,
        );

        debug!(
            depth,
            score = outcome.score,
            nodes = ctrl.nodes,
            elapsed_ms = iteration_start.elapsed().as_millis() as u64,
            best = %outcome.best.map(|m| m.to_uci()).unwrap_or_default(),
            "iteration complete"
        );

        // A forced mate does not improve with depth.
        if outcome.score.abs() >= MATE_THRESHOLD {
            break;
        }
    }

    outcome.nodes = ctrl.nodes;
    outcome
}
