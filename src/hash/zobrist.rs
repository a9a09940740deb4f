//! Zobrist key tables for incremental position hashing.
//!
//! A position key is the XOR of one key per piece-on-square, the side key
//! when Black is to move, one key per castling bit, and one key per
//! en-passant file when an en-passant target exists.

use crate::board::castle_bits::*;
use once_cell::sync::OnceCell;
use rand::{rngs::StdRng, RngCore, SeedableRng};

#[cfg(feature = "deterministic_zobrist")]
const ZOBRIST_SEED: u64 = 0x5DEE_CE66_D1CE_4E5B;

pub struct ZobristKeys {
    /// `[color][piece][square]`, color {White=0, Black=1}, piece {P,N,B,R,Q,K}.
    pub piece: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// Bit order WK, WQ, BK, BQ.
    pub castling: [u64; 4],
    /// Files a..h.
    pub ep_file: [u64; 8],
}

fn make_rng() -> StdRng {
    #[cfg(feature = "deterministic_zobrist")]
    {
        StdRng::seed_from_u64(ZOBRIST_SEED)
    }
    #[cfg(not(feature = "deterministic_zobrist"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

/// Global key tables, generated on first use.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_keys(make_rng()))
}

fn generate_keys(mut rng: StdRng) -> ZobristKeys {
    // Zero keys would make distinct features cancel silently.
    let mut non_zero = || loop {
        let v = rng.next_u64();
        if v != 0 {
            return v;
        }
    };

    let mut keys = ZobristKeys {
        piece: [[[0u64; 64]; 6]; 2],
        side_to_move: 0,
        castling: [0u64; 4],
        ep_file: [0u64; 8],
    };

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                keys.piece[color][piece][sq] = non_zero();
            }
        }
    }
    for key in keys.castling.iter_mut() {
        *key = non_zero();
    }
    for key in keys.ep_file.iter_mut() {
        *key = non_zero();
    }
    keys.side_to_move = non_zero();

    keys
}

/// XORs the keys of every castling bit that differs between `old` and `new`.
#[inline]
pub fn xor_castling_delta(hash: &mut u64, keys: &ZobristKeys, old: CastleBits, new: CastleBits) {
    let delta = old ^ new;
    if delta & CASTLE_WK != 0 {
        *hash ^= keys.castling[0];
    }
    if delta & CASTLE_WQ != 0 {
        *hash ^= keys.castling[1];
    }
    if delta & CASTLE_BK != 0 {
        *hash ^= keys.castling[2];
    }
    if delta & CASTLE_BQ != 0 {
        *hash ^= keys.castling[3];
    }
}
