//! Two-piece-relation ("PP") position evaluation.
//!
//! Material score plus a pairwise feature table: every position is reduced
//! to 40 piece-instance feature indices (one per piece on the board or in
//! hand), and the evaluation sums a learned weight for every unordered pair
//! of those indices. The weight table (`pp`) is persisted to `pp.bin` as a
//! raw little-endian `i16` blob and produced by [`crate::learn`].

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::board::geometry::{FILE_NUM, RANK_NUM};
use crate::board::state::Position;
use crate::constants::Score;
use crate::types::{piece_type, Color};

/// Maps a piece type code to its two-piece-relation feature class. King maps
/// to class 0 (and is never itself a board feature — it never appears on
/// the board side of a pair since it's excluded below — this table exists
/// for completeness/documentation); the four promoted minor generals
/// (ProPawn/ProLance/ProKnight/ProSilver) all collapse into Gold's class 7,
/// since a promoted minor moves exactly like Gold.
pub const CLASS_OF: [i32; piece_type::PIECE_TYPE_NUM as usize + 1] =
    [-1, 1, 2, 3, 4, 5, 6, 7, 0, 7, 7, 7, 7, 8, 9, 10];
/// One past the largest class index in [`CLASS_OF`]; the number of distinct
/// board-piece feature classes.
pub const CLASS_NUM: i32 = CLASS_OF[piece_type::PIECE_TYPE_NUM as usize];

/// Offset into the hand-feature block for the first instance of each hand
/// piece type (Pawn has up to 18 in-hand instances since both sides'
/// captured pawns of one color can in principle all funnel to one hand;
/// Lance/Knight/Silver up to 4, Bishop/Rook up to 2, Gold up to 4).
pub const HAND_OFFSET: [i32; piece_type::HAND_TYPE_NUM as usize + 1] =
    [-1, 0, 18, 22, 26, 30, 32, 34, 38];
/// Total number of hand-feature slots (one color's worth).
pub const HAND_SLOTS: i32 = HAND_OFFSET[piece_type::HAND_TYPE_NUM as usize];

/// Number of board-piece feature indices (one color's worth): one slot per
/// (class, square) pair.
pub const P1: i32 = CLASS_NUM * (RANK_NUM * FILE_NUM);
/// Number of single-color feature indices total (board pieces plus hand
/// pieces).
pub const P2: i32 = P1 + HAND_SLOTS;
/// Number of feature indices across both colors; the dimension of the `pp`
/// weight matrix.
pub const P3: i32 = P2 * 2;
/// Total element count of the flattened `pp` weight matrix.
pub const PP_SIZE: usize = (P3 as usize) * (P3 as usize);

/// Scale factor the pairwise sum is computed at before being divided back
/// out; keeps the per-pair `i16` weights from needing fractional precision.
const FV_SCALE: i32 = 32;

/// Material value of each piece type, Pawn..Dragon (index 0 unused/Empty).
const PIECE_SCORE: [i32; piece_type::PIECE_TYPE_NUM as usize] = [
    0, 100, 300, 300, 400, 700, 800, 500, // Pawn Lance Knight Silver Bishop Rook Gold
    0, 600, 500, 500, 500, 800, 1000, // King ProPawn ProLance ProKnight ProSilver Horse Dragon
];

/// Upper bound on the number of piece-instance features [`feature_list`] can
/// be asked to report: every board square occupied plus both hands full to
/// the per-type capacity [`HAND_OFFSET`] already reserves slots for. A legal
/// shogi position always has exactly 40; a `position sfen` handed an
/// over-full (but still per-type-addressable) hand/board combination — as
/// happens with some mating-problem fixtures that stuff every hand slot —
/// can reach this instead, and [`feature_list`] must not panic on it.
pub const MAX_FEATURES: usize = (RANK_NUM * FILE_NUM) as usize + (HAND_SLOTS as usize) * 2;

/// The piece-instance feature indices of `pos`: one per piece on the board,
/// then one per piece held in hand (iterated in hand-slot order, so a second
/// pawn in hand gets the next slot after the first), plus the count `h` of
/// how many of `pl`'s leading entries are populated. Shared between
/// [`evaluate`] and the learner's gradient accumulation, which must compute
/// exactly the same feature list for a position's quiescence leaf.
///
/// `h` is 40 for any legal position reached by play, but a position handed
/// in directly via `position sfen` can be over-full (see [`MAX_FEATURES`]);
/// such positions still evaluate, just over more or fewer pairs than usual,
/// matching the reference engine's own array-bounds tolerance here.
pub fn feature_list(pos: &Position) -> ([usize; MAX_FEATURES], usize) {
    let mut pl = [0usize; MAX_FEATURES];
    let mut h = 0;

    for y in 0..RANK_NUM {
        for x in 0..FILE_NUM {
            let sq = crate::board::geometry::square(x, y);
            let p = pos.piece[sq];
            if p == piece_type::EMPTY {
                continue;
            }
            let pt = crate::types::piece_type_of(p);
            let sgn = crate::types::turn_mask_sign(p);
            let class = CLASS_OF[pt as usize];
            let idx = class * (RANK_NUM * FILE_NUM) + (FILE_NUM * y + x) + if sgn < 0 { P2 } else { 0 };
            if h < MAX_FEATURES {
                pl[h] = idx as usize;
                h += 1;
            }
        }
    }

    for c in 0..2 {
        for pt in piece_type::PAWN..piece_type::HAND_TYPE_NUM {
            let count = pos.hand[c][pt as usize];
            for i in 0..count {
                let idx = P1 + HAND_OFFSET[pt as usize] + i as i32 + (c as i32) * P2;
                if h < MAX_FEATURES {
                    pl[h] = idx as usize;
                    h += 1;
                }
            }
        }
    }

    (pl, h)
}

/// The learned pairwise weight table. Reads (during search) and writes
/// (between learning epochs, or at startup when loading `pp.bin`) both go
/// through this lock; writes are rare and brief so contention never shows
/// up in search throughput.
pub static PP: Lazy<RwLock<Vec<i16>>> = Lazy::new(|| RwLock::new(vec![0i16; PP_SIZE]));

/// Loads `pp.bin` into [`PP`] if it exists, leaving the table zeroed
/// otherwise (matching a fresh, untrained engine).
pub fn load_weights(path: &Path) -> io::Result<()> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    let mut buf = vec![0u8; PP_SIZE * 2];
    file.read_exact(&mut buf)?;
    let mut weights = PP.write();
    for (dst, chunk) in weights.iter_mut().zip(buf.chunks_exact(2)) {
        *dst = i16::from_le_bytes([chunk[0], chunk[1]]);
    }
    Ok(())
}

/// Writes the current [`PP`] table to `path` as a raw little-endian `i16`
/// blob, the same format [`load_weights`] reads.
pub fn save_weights(path: &Path) -> io::Result<()> {
    let weights = PP.read();
    let mut buf = Vec::with_capacity(PP_SIZE * 2);
    for w in weights.iter() {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    let mut file = File::create(path)?;
    file.write_all(&buf)
}

impl Position {
    /// Static evaluation from the side to move's perspective: material
    /// balance plus the sum of `pp[pl[i]][pl[j]]` over every unordered pair
    /// of this position's piece-instance features (40 for any legal
    /// position; see [`feature_list`] for the over-full case).
    pub fn evaluate(&self) -> Score {
        let mut score = 0i32;

        for y in 0..RANK_NUM {
            for x in 0..FILE_NUM {
                let sq = crate::board::geometry::square(x, y);
                let p = self.piece[sq];
                if p == piece_type::EMPTY {
                    continue;
                }
                let pt = crate::types::piece_type_of(p);
                score += crate::types::turn_mask_sign(p) * PIECE_SCORE[pt as usize];
            }
        }

        let mut hand_sum = [0i32; 2];
        for c in 0..2 {
            for pt in piece_type::PAWN..piece_type::HAND_TYPE_NUM {
                hand_sum[c] += PIECE_SCORE[pt as usize] * self.hand[c][pt as usize] as i32;
            }
        }
        score += hand_sum[0] - hand_sum[1];

        let (pl, h) = feature_list(self);
        score *= FV_SCALE;
        {
            let pp = PP.read();
            let p3 = P3 as usize;
            for i in 0..h {
                let row = pl[i] * p3;
                for j in 0..i {
                    score += pp[row + pl[j]] as i32;
                }
            }
        }
        score /= FV_SCALE;

        score * self.turn.sign()
    }
}
