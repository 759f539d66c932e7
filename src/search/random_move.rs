//! Random legal move selection, used when time runs out before any depth
//! completes and as the random-opening phase of self-play.

use std::time::Instant;

use rand::Rng;

use crate::board::state::Position;
use crate::constants::SCORE_INFINITE;
use crate::search::algorithms::search;
use crate::types::Move;

/// Picks a uniformly random legal move from `stack[idx]`, cycling through a
/// random starting offset so every pseudo-legal move gets a fair shot at
/// being first. A candidate is rejected (not just its own-king-in-check
/// pseudo-legality, but also) if a zero-depth search judges it an immediate
/// illegal pawn-drop mate or a perpetual-check win for the side to move —
/// both of which `search` signals with `SCORE_INFINITE`.
pub fn random_move(stack: &mut [Position], idx: usize, time_end: Instant) -> Move {
    let moves = stack[idx].generate_moves();
    let n = moves.len();
    if n == 0 {
        return Move::NONE;
    }
    let k = rand::thread_rng().gen_range(0..n);
    let turn = stack[idx].turn;

    for i in 0..n {
        let mv = moves.as_slice()[(i + k) % n];
        let (head, tail) = stack.split_at_mut(idx + 1);
        head[idx].do_move_into(&mut tail[0], mv);
        if tail[0].in_check(turn) {
            continue;
        }
        let score = search(stack, idx + 1, -SCORE_INFINITE, SCORE_INFINITE, 0, time_end);
        if score == SCORE_INFINITE {
            continue;
        }
        return mv;
    }
    Move::NONE
}
