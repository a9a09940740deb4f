//! Terminal status: checkmate, stalemate and the draw taxonomy.

use crate::board::{Color, Piece, Position};
use crate::moves::execute::generate_legal;
use crate::moves::square_control::in_check;
use crate::moves::tables::AttackTables;
use crate::moves::types::{MoveList, UndoRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InPlay,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
    DrawThreefold,
    DrawInsufficientMaterial,
}

pub fn is_fifty_move(pos: &Position) -> bool {
    pos.halfmove_clock() >= 100
}

/// Dead-material reduction: K vs K, K+minor vs K, and K+NN vs K.
pub fn is_insufficient_material(pos: &Position) -> bool {
    // Any pawn, rook or queen can still mate.
    let heavy = pos.bb(Color::White, Piece::Pawn)
        | pos.bb(Color::Black, Piece::Pawn)
        | pos.bb(Color::White, Piece::Rook)
        | pos.bb(Color::Black, Piece::Rook)
        | pos.bb(Color::White, Piece::Queen)
        | pos.bb(Color::Black, Piece::Queen);
    if heavy != 0 {
        return false;
    }

    let white_knights = pos.bb(Color::White, Piece::Knight).count_ones();
    let white_bishops = pos.bb(Color::White, Piece::Bishop).count_ones();
    let black_knights = pos.bb(Color::Black, Piece::Knight).count_ones();
    let black_bishops = pos.bb(Color::Black, Piece::Bishop).count_ones();
    let white_minors = white_knights + white_bishops;
    let black_minors = black_knights + black_bishops;

    match white_minors + black_minors {
        0 => true, // K vs K
        1 => true, // K+minor vs K
        2 => {
            // Two knights against a bare king cannot force mate.
            (white_knights == 2 && black_minors == 0)
                || (black_knights == 2 && white_minors == 0)
        }
        _ => false,
    }
}

/// Occurrences of the current position, counting itself.
///
/// Each undo record stores the hash *before* its move, so the stack is a
/// history of prior position keys. Only the reversible window matters:
/// `halfmove_clock` counts plies since the last pawn move or capture, and
/// no position before such a move can recur.
pub fn repetition_count(pos: &Position, history: &[UndoRecord]) -> u32 {
    let window = (pos.halfmove_clock() as usize).min(history.len());
    let current = pos.hash();
    let mut count = 1;
    for record in history[history.len() - window..].iter().rev() {
        if record.hash == current {
            count += 1;
        }
    }
    count
}

pub fn is_threefold(pos: &Position, history: &[UndoRecord]) -> bool {
    repetition_count(pos, history) >= 3
}

/// Full status for the current position. Draw conditions are checked before
/// move-based outcomes so a dead position never reports checkmate.
pub fn position_status(
    pos: &mut Position,
    history: &[UndoRecord],
    tables: &AttackTables,
) -> GameStatus {
    if is_insufficient_material(pos) {
        return GameStatus::DrawInsufficientMaterial;
    }
    if is_threefold(pos, history) {
        return GameStatus::DrawThreefold;
    }
    if is_fifty_move(pos) {
        return GameStatus::DrawFiftyMove;
    }

    let mut legal = MoveList::new();
    generate_legal(pos, tables, &mut legal);
    if legal.is_empty() {
        if in_check(pos, tables, pos.side_to_move()) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else {
        GameStatus::InPlay
    }
}
