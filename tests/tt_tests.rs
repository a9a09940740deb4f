//! Transposition-table interaction with the search: probing, bounds, and
//! the benefit of a warm table.

use gambit::board::Position;
use gambit::moves::tables::attack_tables;
use gambit::search::search::{search_root, SearchControl};
use gambit::search::tt::{Bound, TranspositionTable};

fn search_nodes(fen: &str, depth: u32, tt: &mut TranspositionTable) -> (u64, Option<String>) {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut history = Vec::new();
    let mut ctrl = SearchControl::unlimited();
    let outcome = search_root(
        &mut pos,
        &mut history,
        attack_tables(),
        tt,
        &mut ctrl,
        depth,
        false,
    );
    (outcome.nodes, outcome.best.map(|m| m.to_uci()))
}

#[test]
fn search_populates_the_table() {
    let mut tt = TranspositionTable::default();
    assert!(tt.is_empty());
    let (_, best) = search_nodes(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        3,
        &mut tt,
    );
    assert!(best.is_some());
    assert!(!tt.is_empty());
}

#[test]
fn warm_table_does_not_change_the_move_and_saves_work() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut tt = TranspositionTable::default();
    let (cold_nodes, cold_best) = search_nodes(fen, 4, &mut tt);
    let (warm_nodes, warm_best) = search_nodes(fen, 4, &mut tt);
    assert_eq!(cold_best, warm_best);
    assert!(
        warm_nodes <= cold_nodes,
        "warm search should not be more expensive: {warm_nodes} vs {cold_nodes}"
    );
}

#[test]
fn root_position_entry_records_an_exact_bound_and_the_best_move() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let pos = Position::from_fen(fen).unwrap();
    let mut tt = TranspositionTable::default();
    let (_, best) = search_nodes(fen, 3, &mut tt);

    let entry = tt.probe(pos.hash()).expect("root entry stored");
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.best_move.map(|m| m.to_uci()), best);
    assert!(entry.depth >= 3);
}

#[test]
fn deeper_results_overwrite_shallower_ones() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let pos = Position::from_fen(fen).unwrap();
    let mut tt = TranspositionTable::default();

    let _ = search_nodes(fen, 2, &mut tt);
    let shallow_depth = tt.probe(pos.hash()).unwrap().depth;
    let _ = search_nodes(fen, 4, &mut tt);
    let deep_depth = tt.probe(pos.hash()).unwrap().depth;
    assert!(deep_depth > shallow_depth);
}

#[test]
fn table_capacity_is_enforced() {
    let mut tt = TranspositionTable::new(128);
    for key in 0..1000u64 {
        tt.store(key, 1, 0, Bound::Exact, None);
    }
    assert!(tt.len() <= 128);
}
