//! Gradient accumulation and the AdaGrad weight update for the PP
//! evaluation table.

use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::board::state::Position;
use crate::constants::Score;
use crate::eval::{feature_list, P2, P3, PP};

/// Logistic temperature converting a centipawn score to a win probability
/// estimate.
const TEMPERATURE: f32 = 0.0016;
/// Blend weight between a position's own quiescence-based win-probability
/// estimate and the back-propagated result of the game it came from.
const RESULT_BLEND: f32 = 0.6;
/// AdaGrad step size.
const ETA: f32 = 30.0;

#[inline]
fn sigmoid(score: Score) -> f32 {
    1.0 / (1.0 + (-TEMPERATURE * score as f32).exp())
}

/// Reflects feature index `pi` through the board's 180-degree rotation
/// (file and rank both mirrored) and swaps which color's half of the
/// feature space it lives in. Hand-feature indices (`pi >= p1` within a
/// color's half) are unaffected by the square reflection, only the color
/// swap.
pub fn rotate180(pi: i32) -> i32 {
    use crate::eval::P1;
    use crate::board::geometry::{FILE_NUM, RANK_NUM};

    let color_half = pi >= P2;
    let mut pi = if color_half { pi - P2 } else { pi };
    if pi < P1 {
        let sq = pi % (RANK_NUM * FILE_NUM);
        pi += (RANK_NUM * FILE_NUM) - 1 - sq * 2;
    }
    if !color_half {
        pi += P2;
    }
    pi
}

/// Shared gradient accumulator. `g_pp`/`g2_pp` are zeroed (`g2_pp` is not —
/// it's the running AdaGrad sum of squares and persists across epochs) and
/// read at the end of every training epoch; `pos_num` is the epoch's
/// running total of positions contributed, used only for the progress line.
pub struct GradientState {
    pub g_pp: Vec<f32>,
    pub g2_pp: Vec<f32>,
    pub pos_num: u64,
}

impl GradientState {
    fn new() -> Self {
        let size = (P3 as usize) * (P3 as usize);
        GradientState {
            g_pp: vec![0.0; size],
            g2_pp: vec![0.0; size],
            pos_num: 0,
        }
    }

    pub fn start_epoch(&mut self) {
        self.g_pp.iter_mut().for_each(|v| *v = 0.0);
        self.pos_num = 0;
    }
}

pub static GRADIENT: Lazy<Mutex<GradientState>> = Lazy::new(|| Mutex::new(GradientState::new()));

/// Positions contributed to the current epoch so far, checked by each
/// worker thread without taking [`GRADIENT`]'s lock, so self-play games
/// never serialize on it — only the brief gradient-accumulation step does.
pub static EPOCH_POS_NUM: AtomicU64 = AtomicU64::new(0);

/// Accumulates the gradient contribution of one self-play game's plies
/// `k0+1..=k`, walking backward from the final position so each ply's
/// target blends the game's eventual outcome with the next ply's own
/// estimated win probability. Must run under [`GRADIENT`]'s lock, matching
/// the single global mutex the source engine serializes this step behind.
pub fn accumulate_game(
    state: &mut GradientState,
    quiescence_leaves: &[Position],
    scores: &[[Score; 2]],
    k0: i64,
    k_final: i64,
    mut result: f32,
) {
    let contributed = (k_final - k0) as u64;
    state.pos_num += contributed;
    EPOCH_POS_NUM.fetch_add(contributed, Ordering::SeqCst);

    let mut k = k_final;
    while k > k0 {
        let idx = k as usize;
        let pos = &quiescence_leaves[idx];
        let sa = scores[idx];

        result = result * RESULT_BLEND + sigmoid(sa[1]) * (1.0 - RESULT_BLEND);
        let t = sigmoid(sa[0]);
        let g = 2.0 * TEMPERATURE * t * (1.0 - t) * (t - result);

        let (pl, feature_count) = feature_list(pos);
        let p3 = P3 as usize;
        for i in 0..feature_count {
            let row = pl[i] * p3;
            for j in 0..i {
                state.g_pp[row + pl[j]] += g;
            }
        }

        k -= 1;
    }
}

/// Enforces the 180-degree rotational symmetry the PP table is trained
/// under (left-right mirror is deliberately not enforced) by folding every
/// gradient pair with its rotated counterpart, then runs one AdaGrad step
/// per nonzero gradient entry and reports the resulting weight range.
pub fn symmetrize_and_update(state: &mut GradientState) -> (i32, i32) {
    let p3 = P3 as usize;

    for pi0 in 0..p3 {
        for pi1 in (pi0 + 1)..p3 {
            let pi2 = rotate180(pi0 as i32) as usize;
            let pi3 = rotate180(pi1 as i32) as usize;
            let t = state.g_pp[pi0 * p3 + pi1] + state.g_pp[pi1 * p3 + pi0]
                - state.g_pp[pi2 * p3 + pi3]
                - state.g_pp[pi3 * p3 + pi2];
            state.g_pp[pi0 * p3 + pi1] = t;
            state.g_pp[pi1 * p3 + pi0] = t;
            state.g_pp[pi2 * p3 + pi3] = -t;
            state.g_pp[pi3 * p3 + pi2] = -t;
        }
    }

    let mut min = i32::MAX;
    let mut max = i32::MIN;
    let mut pp = PP.write();
    for pi0 in 0..p3 {
        for pi1 in 0..p3 {
            let g = state.g_pp[pi0 * p3 + pi1];
            if g == 0.0 {
                continue;
            }
            let g2 = &mut state.g2_pp[pi0 * p3 + pi1];
            *g2 += g * g;
            let rounding = if g > 0.0 { 0.5 } else { -0.5 };
            let delta = (ETA * g / g2.sqrt() + rounding) as i32;
            let w = &mut pp[pi0 * p3 + pi1];
            *w = w.wrapping_sub(delta as i16);
            min = min.min(*w as i32);
            max = max.max(*w as i32);
        }
    }
    (min, max)
}
