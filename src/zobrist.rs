//! Zobrist hashing for shogi positions.
//!
//! One 64-bit key per (square, piece-byte) pair, seeded once from the fixed
//! seed [`crate::constants::ZOBRIST_SEED`] so any build of this engine
//! agrees on the same hash space — useful when comparing TT/repetition
//! behavior across machines.

use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::board::geometry::SQUARE_NUM;
use crate::constants::ZOBRIST_SEED;

/// Width of the per-square key row. Piece bytes are `color_mask | type`
/// with `color_mask` in {16, 32} and `type` in 1..=14, so `piece - 16`
/// ranges over 1..=30; 32 slots leaves headroom without a second offset.
const KEYS_PER_SQUARE: usize = 32;

struct ZobristKeys {
    square_piece: Vec<[u64; KEYS_PER_SQUARE]>,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut square_piece = vec![[0u64; KEYS_PER_SQUARE]; SQUARE_NUM];
        for row in &mut square_piece {
            for key in row.iter_mut() {
                *key = rng.gen();
            }
        }
        ZobristKeys { square_piece }
    }
}

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Row index for a non-empty, non-wall piece byte.
#[inline]
fn piece_index(piece: u8) -> usize {
    (piece - 16) as usize
}

/// The Zobrist key contribution of `piece` sitting on `sq`.
#[inline]
pub fn piece_square_key(sq: usize, piece: u8) -> u64 {
    ZOBRIST.square_piece[sq][piece_index(piece)]
}

/// Forces Zobrist key generation eagerly (called from `isready`, matching
/// the source engine allocating `p2key` only once a game is about to start).
pub fn init() {
    Lazy::force(&ZOBRIST);
}
