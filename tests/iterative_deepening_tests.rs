//! Iterative deepening behavior: completed-depth tracking, deadline
//! handling, and score conventions at terminal nodes.

use gambit::board::Position;
use gambit::moves::tables::attack_tables;
use gambit::search::search::{search_root, SearchControl, MATE, MATE_THRESHOLD};
use gambit::search::tt::TranspositionTable;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn search(fen: &str, depth: u32, ctrl: &mut SearchControl) -> gambit::search::search::SearchOutcome {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut history = Vec::new();
    let mut tt = TranspositionTable::default();
    search_root(
        &mut pos,
        &mut history,
        attack_tables(),
        &mut tt,
        ctrl,
        depth,
        false,
    )
}

#[test]
fn completes_the_requested_depth_without_pressure() {
    let mut ctrl = SearchControl::unlimited();
    let outcome = search(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        3,
        &mut ctrl,
    );
    assert_eq!(outcome.depth_completed, 3);
    assert!(!outcome.stopped);
    assert!(outcome.best.is_some());
    assert_eq!(outcome.root_moves.len(), 20);
}

#[test]
fn deadline_keeps_the_last_completed_iteration() {
    let mut ctrl = SearchControl::new(
        Arc::new(AtomicBool::new(false)),
        Some(Instant::now() + Duration::from_millis(200)),
    );
    let outcome = search(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        64,
        &mut ctrl,
    );
    assert!(outcome.stopped);
    assert!(outcome.depth_completed >= 1, "depth 1 fits in 200ms");
    assert!(outcome.depth_completed < 64);
    assert!(outcome.best.is_some());
}

#[test]
fn mate_scores_stop_the_deepening_early() {
    let mut ctrl = SearchControl::unlimited();
    let outcome = search("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", 8, &mut ctrl);
    assert!(outcome.score >= MATE_THRESHOLD);
    assert_eq!(outcome.best.unwrap().to_uci(), "a1a8");
    // Mate in one is found at depth <= 2; deeper iterations are skipped.
    assert!(outcome.depth_completed <= 2);
}

#[test]
fn mated_side_reports_a_negative_mate_score() {
    // Black's only move is Kg8, after which Ra8 is mate: the root score is
    // a mate-in-two loss from Black's point of view.
    let mut ctrl = SearchControl::unlimited();
    let outcome = search("7k/8/6K1/8/8/8/8/R7 b - - 0 1", 4, &mut ctrl);
    assert_eq!(outcome.best.unwrap().to_uci(), "h8g8");
    assert_eq!(outcome.score, -(MATE - 2));
}

#[test]
fn mate_distance_prefers_the_faster_mate() {
    // Mate in one is available; a slower mate also exists. The score must
    // be the one-ply mate value.
    let mut ctrl = SearchControl::unlimited();
    let outcome = search("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", 6, &mut ctrl);
    assert_eq!(outcome.score, MATE - 1);
}

#[test]
fn stalemate_at_the_root_returns_no_move() {
    let mut ctrl = SearchControl::unlimited();
    let outcome = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 4, &mut ctrl);
    assert!(outcome.best.is_none());
    assert_eq!(outcome.depth_completed, 0);
    assert!(outcome.root_moves.is_empty());
}

#[test]
fn nodes_grow_with_depth() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut shallow_ctrl = SearchControl::unlimited();
    let shallow = search(fen, 2, &mut shallow_ctrl);
    let mut deep_ctrl = SearchControl::unlimited();
    let deep = search(fen, 4, &mut deep_ctrl);
    assert!(deep.nodes > shallow.nodes);
}
