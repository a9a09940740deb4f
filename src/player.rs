//! The CPU opponent: difficulty selection, asynchronous move calculation
//! with cooperative cancellation, and randomized move choice.
//!
//! One calculation runs at a time. `calculate_async` cancels and joins any
//! in-flight search before spawning, and the worker holds the engine mutex
//! for its whole run, so facade callers never observe a mid-search
//! position.

use crate::engine::Engine;
use crate::moves::types::Move;
use crate::search::search::{search_root, RootMove, SearchControl};
use crate::search::tt::TranspositionTable;
use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniform choice among legal moves; no search.
    Random,
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuConfig {
    pub difficulty: Difficulty,
    /// Depth ceiling used by `Hard`.
    pub max_depth: u32,
    /// Draw uniformly among near-best root moves instead of always playing
    /// the top one.
    pub randomize: bool,
    /// Wall-clock budget; on expiry the deepest completed iteration's move
    /// is returned.
    pub thinking_budget: Option<Duration>,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig {
            difficulty: Difficulty::Medium,
            max_depth: 6,
            randomize: true,
            thinking_budget: None,
        }
    }
}

impl CpuConfig {
    fn search_depth(&self) -> u32 {
        match self.difficulty {
            Difficulty::Random => 0,
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => self.max_depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Chosen(Move),
    NoLegalMoves,
    Cancelled,
}

/// Shared cancellation flag. Cloning observes the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

/// Handle to an in-flight calculation.
pub struct PendingMove {
    rx: mpsc::Receiver<MoveOutcome>,
    token: CancelToken,
}

impl PendingMove {
    /// Blocks until the calculation finishes or is cancelled.
    pub fn wait(self) -> MoveOutcome {
        self.rx.recv().unwrap_or(MoveOutcome::Cancelled)
    }

    /// Non-blocking poll; `None` while the worker is still searching.
    pub fn try_get(&self) -> Option<MoveOutcome> {
        self.rx.try_recv().ok()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

struct SearchJob {
    token: CancelToken,
    handle: JoinHandle<()>,
}

pub struct CpuPlayer {
    engine: Arc<Mutex<Engine>>,
    tt: Arc<Mutex<TranspositionTable>>,
    job: Option<SearchJob>,
}

impl CpuPlayer {
    pub fn new(engine: Arc<Mutex<Engine>>) -> Self {
        CpuPlayer {
            engine,
            tt: Arc::new(Mutex::new(TranspositionTable::default())),
            job: None,
        }
    }

    pub fn engine(&self) -> Arc<Mutex<Engine>> {
        Arc::clone(&self.engine)
    }

    /// Starts a calculation on a worker thread. Any outstanding calculation
    /// is cancelled and joined first; the returned handle resolves to the
    /// chosen move, `NoLegalMoves`, or `Cancelled`.
    pub fn calculate_async(&mut self, config: CpuConfig, token: CancelToken) -> PendingMove {
        self.cancel_and_wait();

        let (tx, rx) = mpsc::channel();
        let engine = Arc::clone(&self.engine);
        let tt = Arc::clone(&self.tt);
        let worker_token = token.clone();

        let handle = thread::spawn(move || {
            let mut engine = engine.lock();
            let mut tt = tt.lock();
            let outcome = choose_move(&mut engine, &mut tt, &config, &worker_token);
            // The receiver may be gone; the job is still done.
            let _ = tx.send(outcome);
        });

        self.job = Some(SearchJob {
            token: token.clone(),
            handle,
        });
        PendingMove { rx, token }
    }

    /// Synchronous calculation on the caller's thread.
    pub fn calculate(&mut self, config: CpuConfig) -> MoveOutcome {
        self.cancel_and_wait();
        let mut engine = self.engine.lock();
        let mut tt = self.tt.lock();
        choose_move(&mut engine, &mut tt, &config, &CancelToken::new())
    }

    /// Cancels any in-flight calculation and waits for its thread to exit.
    /// Idempotent; a no-op when nothing is running.
    pub fn cancel_and_wait(&mut self) {
        if let Some(job) = self.job.take() {
            job.token.cancel();
            let _ = job.handle.join();
        }
    }

    pub fn is_calculating(&self) -> bool {
        self.job
            .as_ref()
            .map(|job| !job.handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for CpuPlayer {
    fn drop(&mut self) {
        self.cancel_and_wait();
    }
}

/// Near-best window for randomized selection: candidates within half a pawn
/// of the top score, capped at five.
const RANDOMIZE_WINDOW_CP: i32 = 50;
const RANDOMIZE_MAX_CANDIDATES: usize = 5;

fn select_randomized(root_moves: &[RootMove]) -> Move {
    let best = root_moves[0].score;
    let candidates: Vec<Move> = root_moves
        .iter()
        .take(RANDOMIZE_MAX_CANDIDATES)
        .filter(|rm| best - rm.score <= RANDOMIZE_WINDOW_CP)
        .map(|rm| rm.mv)
        .collect();
    let pick = rand::rng().random_range(0..candidates.len());
    debug!(
        candidates = candidates.len(),
        chosen = %candidates[pick].to_uci(),
        "randomized selection"
    );
    candidates[pick]
}

fn choose_move(
    engine: &mut Engine,
    tt: &mut TranspositionTable,
    config: &CpuConfig,
    token: &CancelToken,
) -> MoveOutcome {
    let legal = engine.legal_moves();
    if legal.is_empty() {
        return MoveOutcome::NoLegalMoves;
    }
    if token.is_cancelled() {
        return MoveOutcome::Cancelled;
    }
    if legal.len() == 1 {
        return MoveOutcome::Chosen(legal[0]);
    }
    if config.difficulty == Difficulty::Random {
        let pick = rand::rng().random_range(0..legal.len());
        return MoveOutcome::Chosen(legal[pick]);
    }

    let deadline = config.thinking_budget.map(|budget| Instant::now() + budget);
    let mut ctrl = SearchControl::new(token.flag(), deadline);
    let depth = config.search_depth();

    let (pos, history, tables) = engine.search_parts();
    let outcome = search_root(pos, history, tables, tt, &mut ctrl, depth, config.randomize);

    if token.is_cancelled() {
        return MoveOutcome::Cancelled;
    }

    info!(
        depth = outcome.depth_completed,
        score = outcome.score,
        nodes = outcome.nodes,
        "calculation finished"
    );

    // Deadline fired before depth 1 completed: any legal move beats none.
    if outcome.depth_completed == 0 || outcome.root_moves.is_empty() {
        let pick = rand::rng().random_range(0..legal.len());
        return MoveOutcome::Chosen(legal[pick]);
    }

    let mv = if config.randomize {
        select_randomized(&outcome.root_moves)
    } else {
        outcome.best.unwrap_or(outcome.root_moves[0].mv)
    };
    MoveOutcome::Chosen(mv)
}
