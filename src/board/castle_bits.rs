//! Castling-rights bits and the per-square rights-update table.

pub type CastleBits = u8;

pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;
pub const CASTLE_ALL: CastleBits = CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ;

/// Rights surviving a piece leaving or landing on each square:
/// `rights &= CASTLE_RIGHTS_MASK[from] & CASTLE_RIGHTS_MASK[to]`.
///
/// Covers king moves, rook moves off their corners, and rook captures on
/// their corners with a single table lookup. Only the six squares that can
/// invalidate a right (a8, e8, h8, a1, e1, h1) clear bits.
#[rustfmt::skip]
pub const CASTLE_RIGHTS_MASK: [CastleBits; 64] = [
    0x07, 0x0F, 0x0F, 0x0F, 0x03, 0x0F, 0x0F, 0x0B, // rank 8
    0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F,
    0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F,
    0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F,
    0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F,
    0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F,
    0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F,
    0x0D, 0x0F, 0x0F, 0x0F, 0x0C, 0x0F, 0x0F, 0x0E, // rank 1
];
