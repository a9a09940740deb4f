//! Pawn move generation edge cases: pushes, blocks, captures, promotions
//! and en passant, for both colors.

use gambit::board::Position;
use gambit::moves::movegen::{generate_pawn_moves, generate_pseudo_legal};
use gambit::moves::tables::attack_tables;
use gambit::moves::types::MoveList;

fn pawn_moves(fen: &str) -> MoveList {
    let pos = Position::from_fen(fen).unwrap();
    let mut moves = MoveList::new();
    generate_pawn_moves(&pos, attack_tables(), &mut moves);
    moves
}

fn ucis(moves: &MoveList) -> Vec<String> {
    moves.iter().map(|m| m.to_uci()).collect()
}

#[test]
fn white_pawn_single_and_double_push() {
    let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let ucis = ucis(&moves);
    assert!(ucis.contains(&"e2e3".to_string()));
    assert!(ucis.contains(&"e2e4".to_string()));
    assert_eq!(moves.len(), 2);
    assert_eq!(moves.iter().filter(|m| m.is_double_pawn_push()).count(), 1);
}

#[test]
fn black_pawn_single_and_double_push() {
    let moves = pawn_moves("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1");
    let ucis = ucis(&moves);
    assert!(ucis.contains(&"e7e6".to_string()));
    assert!(ucis.contains(&"e7e5".to_string()));
    assert_eq!(moves.len(), 2);
}

#[test]
fn blocked_pawns_do_not_push() {
    // White pawn blocked by a black piece directly ahead.
    let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    assert!(moves.iter().all(|m| !m.is_quiet() || m.to().to_string() != "e3"));
    assert!(ucis(&moves).iter().all(|u| u != "e2e3" && u != "e2e4"));

    // Double push blocked on the far square only: single push remains.
    let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
    let ucis = ucis(&moves);
    assert!(ucis.contains(&"e2e3".to_string()));
    assert!(!ucis.contains(&"e2e4".to_string()));
}

#[test]
fn captures_go_diagonally_both_ways() {
    let moves = pawn_moves("4k3/8/8/8/8/3r1n2/4P3/4K3 w - - 0 1");
    let ucis = ucis(&moves);
    assert!(ucis.contains(&"e2d3".to_string()));
    assert!(ucis.contains(&"e2f3".to_string()));
    assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 2);
}

#[test]
fn rim_pawns_capture_only_inward() {
    let moves = pawn_moves("4k3/8/8/8/8/1r4r1/P6P/4K3 w - - 0 1");
    let capture_ucis: Vec<String> = moves
        .iter()
        .filter(|m| m.is_capture())
        .map(|m| m.to_uci())
        .collect();
    assert_eq!(capture_ucis.len(), 2);
    assert!(capture_ucis.contains(&"a2b3".to_string()));
    assert!(capture_ucis.contains(&"h2g3".to_string()));
}

#[test]
fn black_promotion_with_capture_choices() {
    let moves = pawn_moves("4k3/8/8/8/8/8/6p1/4K2B b - - 0 1");
    // Four push promotions on g1 plus four capture promotions on h1.
    assert_eq!(moves.len(), 8);
    assert!(moves.iter().all(|m| m.is_promotion()));
    assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 4);
    let promos: Vec<String> = ucis(&moves);
    assert!(promos.contains(&"g2g1q".to_string()));
    assert!(promos.contains(&"g2h1n".to_string()));
}

#[test]
fn en_passant_is_not_offered_to_distant_pawns() {
    // Only the e5 pawn may take d6 en passant; the g5 pawn may not.
    let moves = pawn_moves("4k3/8/8/3pP1P1/8/8/8/4K3 w - d6 0 2");
    let ep: Vec<String> = moves
        .iter()
        .filter(|m| m.is_en_passant())
        .map(|m| m.to_uci())
        .collect();
    assert_eq!(ep, vec!["e5d6".to_string()]);
}

#[test]
fn black_en_passant_mirrors_white() {
    let moves = pawn_moves("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 2");
    let ep: Vec<String> = moves
        .iter()
        .filter(|m| m.is_en_passant())
        .map(|m| m.to_uci())
        .collect();
    assert_eq!(ep, vec!["e4d3".to_string()]);
}

#[test]
fn no_pawn_ever_lands_on_a_back_rank_unpromoted() {
    let fens = [
        "4k3/P7/8/8/8/8/7p/4K3 w - - 0 1",
        "4k3/P7/8/8/8/8/7p/4K3 b - - 0 1",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        let mut moves = MoveList::new();
        generate_pseudo_legal(&pos, attack_tables(), &mut moves);
        for mv in moves.iter() {
            let rank = mv.to().rank();
            if rank == 0 || rank == 7 {
                let from_piece = pos.piece_at(mv.from()).unwrap().1;
                if from_piece == gambit::board::Piece::Pawn {
                    assert!(mv.is_promotion(), "{fen}: {mv} reaches a back rank as a pawn");
                }
            }
        }
    }
}
