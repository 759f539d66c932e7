//! Repetition detection, including the "superior repetition" shortcut.
//!
//! Walks back through the position stack at even offsets 4, 6, .. 16 plies.
//! An exact key match is either a perpetual check (someone wins instead of
//! a draw) or a genuine repetition (draw). A near match differing only in
//! the low byte of each piece-count-like lane (the bit-pattern
//! [`SUPERIOR_MASK`] ignores) is treated as one side having strictly
//! improved its material/hand since the earlier occurrence, which this
//! engine scores as an immediate win rather than searching further.

use crate::board::state::Position;
use crate::constants::{Score, SCORE_INFINITE};

/// Clears every byte's high 7 bits, leaving only bit 0 of each byte lane of
/// a 64-bit difference — i.e. "did anything in this lane change by an odd
/// amount or more than one unit", used as a cheap superiority test on the
/// combined Zobrist key (board + hand + turn).
const SUPERIOR_MASK: i64 = 0x0303030303030300u64 as i64;

/// Probes the position at `stack[idx]` against its even-ply ancestors, one
/// ply of *this search* (`Position::ply`, reset to zero by
/// [`crate::engine::think`] at the root), not an absolute stack offset —
/// history from earlier in the real game is still visible here, since it
/// lives in the same contiguous stack below `idx`.
///
/// `stack` must reserve at least [`crate::constants::STACK_HEADROOM`] slots
/// before any position this is called on, so `idx - 16` never underflows.
/// Returns `None` if no repetition-relevant ancestor was found (search
/// should continue normally), or `Some(score)` if the search should return
/// immediately with that score.
pub fn probe(stack: &[Position], idx: usize) -> Option<Score> {
    if stack[idx].ply == 0 {
        return None;
    }
    let pos = &stack[idx];

    let mut i = 4usize;
    while i <= 16 {
        let other = &stack[idx - i];
        let diff = (pos.key as i64).wrapping_sub(other.key as i64);

        if diff == 0 {
            if pos.continuous_check[pos.turn.index()] as i64 * 2 >= i as i64 {
                return Some(-SCORE_INFINITE);
            }
            if pos.continuous_check[(!pos.turn).index()] as i64 * 2 >= i as i64 {
                return Some(SCORE_INFINITE);
            }
            return Some(0);
        }

        if diff & !SUPERIOR_MASK == 0 {
            return Some(SCORE_INFINITE);
        }
        if (-diff) & !SUPERIOR_MASK == 0 {
            return Some(-SCORE_INFINITE);
        }

        i += 2;
    }
    None
}
