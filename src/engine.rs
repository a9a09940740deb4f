//! The engine facade: a position, its undo stack, and the synchronous
//! game-rules API. All mutation goes through `make`/`unmake`, so the stack
//! always mirrors the path from the initial position and the structural
//! invariants hold between calls.

use crate::board::{Color, FenError, Piece, Position};
use crate::moves::execute::{generate_legal, make_move, undo_move};
use crate::moves::square_control::in_check;
use crate::moves::tables::{attack_tables, AttackTables};
use crate::moves::types::{Move, MoveList, UndoRecord};
use crate::square::Square;
use crate::status::{self, GameStatus};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The move is not in the current legal set. The position is untouched.
    IllegalMove,
    /// `unmake` with no applied moves to revert.
    NoHistory,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::IllegalMove => write!(f, "move is not legal in this position"),
            EngineError::NoHistory => write!(f, "no move to unmake"),
        }
    }
}

impl Error for EngineError {}

pub struct Engine {
    pos: Position,
    history: Vec<UndoRecord>,
    tables: &'static AttackTables,
}

impl Engine {
    /// An engine at the standard start position.
    pub fn new_initial() -> Self {
        Engine {
            pos: Position::new_initial(),
            history: Vec::new(),
            tables: attack_tables(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Engine {
            pos: Position::from_fen(fen)?,
            history: Vec::new(),
            tables: attack_tables(),
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn side_to_move(&self) -> Color {
        self.pos.side_to_move()
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.pos.piece_at(sq)
    }

    pub fn hash(&self) -> u64 {
        self.pos.hash()
    }

    pub fn to_fen(&self) -> String {
        self.pos.to_fen()
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[UndoRecord] {
        &self.history
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    pub fn legal_moves(&mut self) -> MoveList {
        let mut moves = MoveList::new();
        generate_legal(&mut self.pos, self.tables, &mut moves);
        moves
    }

    pub fn legal_moves_from(&mut self, from: Square) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|mv| mv.from() == from);
        moves
    }

    /// Resolves a coordinate string (`e2e4`, `e7e8q`) against the current
    /// legal set.
    pub fn find_move(&mut self, uci: &str) -> Option<Move> {
        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.to_uci() == uci)
    }

    /// Applies a legal move. Rejects anything outside the legal set without
    /// touching the position.
    pub fn make(&mut self, mv: Move) -> Result<(), EngineError> {
        if !self.legal_moves().contains(&mv) {
            return Err(EngineError::IllegalMove);
        }
        let undo = make_move(&mut self.pos, mv).ok_or(EngineError::IllegalMove)?;
        self.history.push(undo);
        Ok(())
    }

    /// Reverts the most recent `make`.
    pub fn unmake(&mut self) -> Result<(), EngineError> {
        let undo = self.history.pop().ok_or(EngineError::NoHistory)?;
        undo_move(&mut self.pos, undo);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Terminal state
    // ------------------------------------------------------------------

    pub fn is_in_check(&self) -> bool {
        in_check(&self.pos, self.tables, self.pos.side_to_move())
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check() && self.legal_moves().is_empty()
    }

    /// Fifty-move rule, dead material, or threefold repetition.
    pub fn is_draw(&self) -> bool {
        status::is_fifty_move(&self.pos)
            || status::is_insufficient_material(&self.pos)
            || status::is_threefold(&self.pos, &self.history)
    }

    pub fn status(&mut self) -> GameStatus {
        status::position_status(&mut self.pos, &self.history, self.tables)
    }

    /// Exclusive access for the search: position, shared undo stack and
    /// attack tables. The search restores both before returning.
    pub(crate) fn search_parts(
        &mut self,
    ) -> (&mut Position, &mut Vec<UndoRecord>, &'static AttackTables) {
        (&mut self.pos, &mut self.history, self.tables)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new_initial()
    }
}
