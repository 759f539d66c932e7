//! Negamax alpha-beta search with quiescence, check extension, a
//! transposition table, and a triangular PV table.
//!
//! `idx` throughout is an absolute slot in the position stack, so sliding
//! ancestors for repetition detection is just `stack[idx - i]`. `ply`
//! (`stack[idx].ply`, reset to zero by the caller at the root of each
//! top-level search) is the PV/mate-distance-relative depth instead, and is
//! what indexes the PV table and scores mate distance — it can be far
//! smaller than `idx` once a real game has been played a while.

use std::cell::RefCell;
use std::time::Instant;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::seq::SliceRandom;

use crate::board::state::Position;
use crate::constants::{Score, MAX_PLY, QSEARCH_DEPTH_FLOOR, SCORE_INFINITE, SCORE_MATE};
use crate::options;
use crate::search::{control, repetition};
use crate::transposition_table::{Bound, TranspositionTable};
use crate::types::{piece_type, Move};

pub static TT: Lazy<Mutex<TranspositionTable>> =
    Lazy::new(|| Mutex::new(TranspositionTable::new(crate::constants::DEFAULT_TT_SIZE)));

thread_local! {
    /// Triangular PV table: `PV[ply][0..]` is the principal variation found
    /// from that ply onward in the most recent search call at that ply.
    static PV: RefCell<Vec<[Move; MAX_PLY]>> =
        RefCell::new(vec![[Move::NONE; MAX_PLY]; MAX_PLY]);
}

/// Reads back the best move found at the root of the most recent search on
/// this thread (`PV[0][0]`).
pub fn root_best_move() -> Move {
    PV.with(|pv| pv.borrow()[0][0])
}

/// Reads back the full principal variation from the most recent root
/// search on this thread, stopping at the first [`Move::NONE`].
pub fn principal_variation() -> Vec<Move> {
    PV.with(|pv| {
        pv.borrow()[0]
            .iter()
            .take_while(|m| !m.is_none())
            .copied()
            .collect()
    })
}

fn set_pv(ply: usize, mv: Move, child_ply: usize) {
    PV.with(|pv| {
        let mut pv = pv.borrow_mut();
        pv[ply][0] = mv;
        for j in 1..MAX_PLY {
            let child_move = pv[child_ply][j - 1];
            pv[ply][j] = child_move;
            if child_move.is_none() {
                break;
            }
        }
    });
}

fn clear_pv(ply: usize) {
    PV.with(|pv| pv.borrow_mut()[ply][0] = Move::NONE);
}

/// Negamax search of `stack[idx]`, writing its children into
/// `stack[idx+1..]`. `time_end` is ignored entirely in learning mode (games
/// run to completion rather than a clock).
pub fn search(
    stack: &mut [Position],
    idx: usize,
    alpha: Score,
    beta: Score,
    depth: i32,
    time_end: Instant,
) -> Score {
    let ply = stack[idx].ply as usize;
    clear_pv(ply);
    control::node_visited();

    let learning = control::is_learning();
    let key = stack[idx].key;

    if ply > 0 {
        if let Some(r) = repetition::probe(stack, idx) {
            return r;
        }

        if !learning {
            let entry = TT.lock().probe(key);
            if entry.key == key && depth <= entry.depth {
                let usable = match entry.bound {
                    Bound::Exact => true,
                    Bound::Lower => entry.score >= beta,
                    Bound::Upper => entry.score <= alpha,
                };
                if usable {
                    return entry.score;
                }
            }
        }
    }

    let mut best_score = -SCORE_MATE + ply as Score;
    if stack[idx].is_win() {
        return -best_score;
    }

    let qsearch = depth <= 0 && !stack[idx].checked;
    if qsearch {
        best_score = stack[idx].evaluate();
        if best_score >= beta || depth <= QSEARCH_DEPTH_FLOOR {
            return best_score;
        }
    }

    let mut moves = stack[idx].generate_moves();
    if ply == 0 && options::ordering_is_random() {
        moves.as_mut_slice().shuffle(&mut rand::thread_rng());
    }

    let mut no_legal = true;
    let alpha0 = alpha;
    let mut alpha = alpha;
    let mut cutoff = false;

    for i in 0..moves.len() {
        let mv = moves.as_slice()[i];
        if qsearch && !mv.is_capture() {
            continue;
        }

        let turn = stack[idx].turn;
        let (head, tail) = stack.split_at_mut(idx + 1);
        head[idx].do_move_into(&mut tail[0], mv);
        if tail[0].in_check(turn) {
            continue;
        }

        let ext = if tail[0].checked && !qsearch { 1 } else { 0 };
        let score = -search(stack, idx + 1, -beta, -alpha, depth - 1 + ext, time_end);
        no_legal = false;

        if score > best_score {
            best_score = score;
            if score > alpha {
                set_pv(ply, mv, ply + 1);
                if score >= beta {
                    cutoff = true;
                    break;
                }
                alpha = score;
            }
        }

        if !learning && (control::should_stop() || Instant::now() >= time_end) {
            control::set_stop();
            return 0;
        }
    }

    if !cutoff && !qsearch && no_legal && stack[idx].checked {
        let pm = stack[idx].previous_move;
        if pm.is_drop() && pm.piece_type() == piece_type::PAWN {
            return SCORE_INFINITE;
        }
    }

    if !learning {
        let bound = if best_score <= alpha0 {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        TT.lock().store(key, best_score, depth, bound);
    }

    best_score
}
