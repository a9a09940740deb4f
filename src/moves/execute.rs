//! Move execution: `make_move` / `undo_move` and the legality filter.
//!
//! `make_move` trusts that its input came from the generator; the only
//! failure it reports is an empty from-square, and in that case the
//! position is untouched. Every other path mutates and returns an
//! `UndoRecord` that `undo_move` consumes to restore the prior state
//! exactly, hash included.

use crate::board::{castle_bits::CASTLE_RIGHTS_MASK, Color, Piece, Position};
use crate::moves::movegen::generate_pseudo_legal;
use crate::moves::square_control::in_check;
use crate::moves::tables::AttackTables;
use crate::moves::types::{Move, MoveList, UndoRecord};
use crate::square::Square;

/// Rook relocation for a castling move, keyed by the king's destination.
#[inline(always)]
fn castle_rook_squares(king_to: u8) -> (Square, Square) {
    match king_to {
        62 => (Square::from_index(63), Square::from_index(61)), // White O-O: h1 -> f1
        58 => (Square::from_index(56), Square::from_index(59)), // White O-O-O: a1 -> d1
        6 => (Square::from_index(7), Square::from_index(5)),    // Black O-O: h8 -> f8
        2 => (Square::from_index(0), Square::from_index(3)),    // Black O-O-O: a8 -> d8
        other => panic!("castle to non-castling square index {other}"),
    }
}

/// The square of the pawn removed by an en-passant capture: one rank behind
/// the target from the mover's point of view.
#[inline(always)]
fn ep_victim_square(mover: Color, to: Square) -> Square {
    match mover {
        Color::White => Square::from_index(to.index() + 8),
        Color::Black => Square::from_index(to.index() - 8),
    }
}

/// Applies `mv` to `pos`. Returns `None` (without mutating) if the
/// from-square is empty; anything else is the caller's contract.
pub fn make_move(pos: &mut Position, mv: Move) -> Option<UndoRecord> {
    let from = mv.from();
    let to = mv.to();
    let (color, piece) = pos.piece_at(from)?;
    debug_assert_eq!(color, pos.side_to_move(), "move out of turn: {mv}");

    let mut undo = UndoRecord {
        mv,
        piece,
        captured: None,
        castling: pos.castling(),
        ep_target: pos.ep_target(),
        halfmove_clock: pos.halfmove_clock(),
        hash: pos.hash(),
    };

    // Any move extinguishes the previous en-passant opportunity.
    pos.set_ep_target(None);

    if mv.is_en_passant() {
        pos.remove_piece(color.opposite(), Piece::Pawn, ep_victim_square(color, to));
        undo.captured = Some(Piece::Pawn);
    } else if let Some((victim_color, victim)) = pos.piece_at(to) {
        debug_assert_ne!(victim_color, color, "capture of own piece: {mv}");
        pos.remove_piece(victim_color, victim, to);
        undo.captured = Some(victim);
    }

    pos.remove_piece(color, piece, from);
    pos.add_piece(color, mv.promotion().unwrap_or(piece), to);

    if mv.is_castling() {
        let (rook_from, rook_to) = castle_rook_squares(to.index());
        pos.move_piece(color, Piece::Rook, rook_from, rook_to);
    }

    if mv.is_double_pawn_push() {
        let behind = match color {
            Color::White => Square::from_index(from.index() - 8),
            Color::Black => Square::from_index(from.index() + 8),
        };
        pos.set_ep_target(Some(behind));
    }

    // One table lookup covers king moves, rook moves off their corners and
    // rook captures on their corners.
    let rights = pos.castling()
        & CASTLE_RIGHTS_MASK[from.index() as usize]
        & CASTLE_RIGHTS_MASK[to.index() as usize];
    pos.set_castling(rights);

    if undo.captured.is_some() || piece == Piece::Pawn {
        pos.set_halfmove_clock(0);
    } else {
        pos.set_halfmove_clock(undo.halfmove_clock + 1);
    }
    if color == Color::Black {
        pos.increment_fullmove();
    }
    pos.flip_side();

    #[cfg(debug_assertions)]
    pos.assert_hash();

    Some(undo)
}

/// Reverses the move recorded in `undo`. The position afterwards is
/// identical to the one `make_move` saw, including the hash.
pub fn undo_move(pos: &mut Position, undo: UndoRecord) {
    pos.flip_side();
    let color = pos.side_to_move();
    let mv = undo.mv;
    let from = mv.from();
    let to = mv.to();

    if let Some(promoted) = mv.promotion() {
        pos.remove_piece(color, promoted, to);
        pos.add_piece(color, Piece::Pawn, from);
    } else {
        pos.move_piece(color, undo.piece, to, from);
    }

    if let Some(victim) = undo.captured {
        let victim_sq = if mv.is_en_passant() {
            ep_victim_square(color, to)
        } else {
            to
        };
        pos.add_piece(color.opposite(), victim, victim_sq);
    }

    if mv.is_castling() {
        let (rook_from, rook_to) = castle_rook_squares(to.index());
        pos.move_piece(color, Piece::Rook, rook_to, rook_from);
    }

    if color == Color::Black {
        pos.decrement_fullmove();
    }
    pos.set_castling(undo.castling);
    pos.set_ep_target(undo.ep_target);
    pos.set_halfmove_clock(undo.halfmove_clock);

    debug_assert_eq!(pos.hash(), undo.hash, "undo did not restore the hash");
}

/// Legality of one pseudo-legal move, via speculative execution.
/// Side-effect free: the position is unchanged on return.
pub fn is_move_legal(pos: &mut Position, tables: &AttackTables, mv: Move) -> bool {
    let mover = pos.side_to_move();
    let Some(undo) = make_move(pos, mv) else {
        return false;
    };
    let legal = !in_check(pos, tables, mover);
    undo_move(pos, undo);
    legal
}

/// Fills `moves` with every legal move for the side to move.
pub fn generate_legal(pos: &mut Position, tables: &AttackTables, moves: &mut MoveList) {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(pos, tables, &mut pseudo);

    moves.clear();
    for &mv in pseudo.iter() {
        if is_move_legal(pos, tables, mv) {
            moves.push(mv);
        }
    }
}
