//! Known perft counts for the generator/executor pair, plus make/undo
//! fuzzing with hash parity checks.

use gambit::board::Position;
use gambit::moves::execute::{generate_legal, make_move, undo_move};
use gambit::moves::perft::{perft, perft_divide};
use gambit::moves::tables::attack_tables;
use gambit::moves::types::MoveList;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

fn run(fen: &str, depth: u32, expected: u64) {
    let mut pos = Position::from_fen(fen).expect("valid fen");
    let nodes = perft(&mut pos, attack_tables(), depth);
    assert_eq!(nodes, expected, "perft({depth}) mismatch for {fen}");
}

#[test]
fn startpos_d1() {
    run(START_FEN, 1, 20);
}

#[test]
fn startpos_d2() {
    run(START_FEN, 2, 400);
}

#[test]
fn startpos_d3() {
    run(START_FEN, 3, 8_902);
}

#[test]
fn startpos_d4() {
    run(START_FEN, 4, 197_281);
}

#[test]
fn startpos_d5() {
    run(START_FEN, 5, 4_865_609);
}

#[test]
#[ignore] // heavy; run with --ignored
fn startpos_d6() {
    run(START_FEN, 6, 119_060_324);
}

#[test]
fn kiwipete_d1() {
    run(KIWIPETE_FEN, 1, 48);
}

#[test]
fn kiwipete_d2() {
    run(KIWIPETE_FEN, 2, 2_039);
}

#[test]
fn kiwipete_d3() {
    run(KIWIPETE_FEN, 3, 97_862);
}

#[test]
fn kiwipete_d4() {
    run(KIWIPETE_FEN, 4, 4_085_603);
}

#[test]
fn endgame_d1_through_d5() {
    for (depth, expected) in [(1, 14), (2, 191), (3, 2_812), (4, 43_238), (5, 674_624)] {
        run(ENDGAME_FEN, depth, expected);
    }
}

#[test]
fn divide_totals_match_perft() {
    let t = attack_tables();
    for (fen, depth, expected) in [(START_FEN, 3, 8_902u64), (KIWIPETE_FEN, 2, 2_039)] {
        let mut pos = Position::from_fen(fen).unwrap();
        let (rows, total) = perft_divide(&mut pos, t, depth);
        assert_eq!(total, expected);
        let sum: u64 = rows.iter().map(|(_, n)| n).sum();
        assert_eq!(sum, total);
    }
}

fn splitmix64(x: &mut u64) -> u64 {
    *x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Random walks with immediate make/undo at every step: the incremental
/// hash must match a from-scratch recompute before and after.
#[test]
fn make_undo_fuzz_keeps_hash_parity() {
    let t = attack_tables();
    let fens = [
        START_FEN,
        KIWIPETE_FEN,
        ENDGAME_FEN,
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        "4k3/P7/8/8/8/8/8/4K3 w - - 0 1",
    ];

    for &fen in &fens {
        for seed0 in [1u64, 7, 42] {
            let mut seed = seed0;
            let mut pos = Position::from_fen(fen).unwrap();
            for _ in 0..200 {
                assert_eq!(pos.hash(), pos.compute_hash_full());
                assert!(pos.validate().is_ok());

                let mut moves = MoveList::new();
                generate_legal(&mut pos, t, &mut moves);
                if moves.is_empty() {
                    break;
                }
                let mv = moves[(splitmix64(&mut seed) as usize) % moves.len()];

                let snapshot = pos.clone();
                let undo = make_move(&mut pos, mv).unwrap();
                assert_eq!(pos.hash(), pos.compute_hash_full());
                undo_move(&mut pos, undo);
                assert_eq!(pos, snapshot, "round trip diverged after {mv}");

                // Walk forward along the same move.
                let _ = make_move(&mut pos, mv).unwrap();
            }
        }
    }
}
