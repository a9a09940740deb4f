//! FEN parsing and serialization.

use super::{castle_bits::*, Color, Piece, Position};
use crate::square::Square;
use std::error::Error;
use std::fmt;

/// Ways a FEN record can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Not exactly six whitespace-separated fields.
    FieldCount(usize),
    /// Placement field does not describe eight ranks.
    RankCount(usize),
    /// A rank does not describe exactly eight squares.
    RankWidth { rank: u8 },
    /// Unknown piece letter in the placement field.
    BadPiece(char),
    BadSide(String),
    BadCastling(String),
    /// En-passant field is not `-` or a square on rank 3 or 6.
    BadEnPassant(String),
    BadCounter(String),
    /// Structurally valid FEN describing an unplayable position.
    IllegalPosition(String),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::FieldCount(n) => write!(f, "expected 6 FEN fields, found {n}"),
            FenError::RankCount(n) => write!(f, "expected 8 ranks, found {n}"),
            FenError::RankWidth { rank } => write!(f, "rank {rank} does not cover 8 squares"),
            FenError::BadPiece(c) => write!(f, "unknown piece letter {c:?}"),
            FenError::BadSide(s) => write!(f, "bad side-to-move field {s:?}"),
            FenError::BadCastling(s) => write!(f, "bad castling field {s:?}"),
            FenError::BadEnPassant(s) => write!(f, "bad en-passant field {s:?}"),
            FenError::BadCounter(s) => write!(f, "bad move counter {s:?}"),
            FenError::IllegalPosition(s) => write!(f, "illegal position: {s}"),
        }
    }
}

impl Error for FenError {}

fn piece_from_char(c: char) -> Option<(Color, Piece)> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let piece = match c.to_ascii_lowercase() {
        'p' => Piece::Pawn,
        'n' => Piece::Knight,
        'b' => Piece::Bishop,
        'r' => Piece::Rook,
        'q' => Piece::Queen,
        'k' => Piece::King,
        _ => return None,
    };
    Some((color, piece))
}

fn piece_to_char(color: Color, piece: Piece) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

impl Position {
    /// Replaces the position with the one described by `fen`.
    /// On error the position is left unspecified; callers should treat it
    /// as consumed.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        *self = Position::empty();

        // Piece placement, rank 8 down to rank 1. With a8 = index 0 the
        // parse order walks the square indices sequentially.
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(FenError::RankWidth { rank: 8 - row as u8 });
                    }
                    file += skip as u8;
                } else {
                    let (color, piece) =
                        piece_from_char(c).ok_or(FenError::BadPiece(c))?;
                    if file >= 8 {
                        return Err(FenError::RankWidth { rank: 8 - row as u8 });
                    }
                    self.add_piece(color, piece, Square::from_index(row as u8 * 8 + file));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - row as u8 });
            }
        }

        // Side to move.
        match fields[1] {
            "w" => self.set_side(Color::White),
            "b" => self.set_side(Color::Black),
            other => return Err(FenError::BadSide(other.to_string())),
        }

        // Castling rights.
        let mut rights: CastleBits = 0;
        if fields[2] != "-" {
            for c in fields[2].chars() {
                rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(FenError::BadCastling(fields[2].to_string())),
                };
            }
        }
        self.set_castling(rights);

        // En-passant target.
        if fields[3] != "-" {
            let sq: Square = fields[3]
                .parse()
                .map_err(|_| FenError::BadEnPassant(fields[3].to_string()))?;
            let expected_rank = match self.side_to_move() {
                Color::White => 5, // Black just double-pushed onto rank 6
                Color::Black => 2,
            };
            if sq.rank() != expected_rank {
                return Err(FenError::BadEnPassant(fields[3].to_string()));
            }
            self.set_ep_target(Some(sq));
        }

        // Clocks.
        let halfmove: u32 = fields[4]
            .parse()
            .map_err(|_| FenError::BadCounter(fields[4].to_string()))?;
        let fullmove: u32 = fields[5]
            .parse()
            .map_err(|_| FenError::BadCounter(fields[5].to_string()))?;
        if fullmove == 0 {
            return Err(FenError::BadCounter(fields[5].to_string()));
        }
        self.set_halfmove_clock(halfmove);
        self.set_fullmove_number(fullmove);

        self.update_occupancies();
        self.refresh_hash();

        if self.bb(Color::White, Piece::King).count_ones() != 1
            || self.bb(Color::Black, Piece::King).count_ones() != 1
        {
            return Err(FenError::IllegalPosition(
                "each side must have exactly one king".into(),
            ));
        }
        self.validate().map_err(FenError::IllegalPosition)?;

        Ok(())
    }

    /// Serializes the position into the six-field FEN form.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(80);

        for row in 0..8u8 {
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                match self.piece_at(Square::from_index(row * 8 + file)) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            out.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        out.push(piece_to_char(color, piece));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push((b'0' + empty_run) as char);
            }
            if row < 7 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling() == 0 {
            out.push('-');
        } else {
            if self.has_castling(CASTLE_WK) {
                out.push('K');
            }
            if self.has_castling(CASTLE_WQ) {
                out.push('Q');
            }
            if self.has_castling(CASTLE_BK) {
                out.push('k');
            }
            if self.has_castling(CASTLE_BQ) {
                out.push('q');
            }
        }

        out.push(' ');
        match self.ep_target() {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));

        out
    }
}
