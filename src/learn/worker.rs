//! Self-play game driver used by the `learn` training loop. Each worker
//! thread repeatedly calls [`play_one_game`], which plays out a full game
//! against itself (random opening, then depth-2 search) and returns the
//! quiescence-leaf position and blended score recorded at every ply after
//! its random opening, ready for [`crate::learn::gradient::accumulate_game`].

use std::time::{Duration, Instant};

use rand::Rng;

use crate::board::{self, state::Position};
use crate::constants::{Score, SCORE_INFINITE, SCORE_MATE_IN_MAX_PLY, STACK_HEADROOM};
use crate::search::{algorithms, random_move};
use crate::types::Move;

/// Plies considered in scope for a random opening move (`k < 10` in the
/// source engine).
const RANDOM_OPENING_PLIES: i64 = 10;
/// Plies below which a random move is always played rather than rolled.
const FORCED_RANDOM_PLIES: i64 = 4;
/// One chance in this many that a random move plays past the forced window.
const RANDOM_MOVE_CHANCE_DENOM: u32 = 8;
/// Game length ceiling, matching the source engine's outer ply cap.
const MAX_GAME_PLIES: i64 = 300;
/// Search depth used to pick each non-opening move.
const SEARCH_DEPTH: i32 = 2;
/// Recursion headroom reserved past the last possible game ply, generous
/// for a depth-2 search with check extensions plus quiescence.
const RECURSION_HEADROOM: usize = 128;

/// A clock bound learning games never hit: `learning` mode makes `search`
/// ignore the clock outright, but the type still wants a value.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(3600 * 24 * 365)
}

/// Outcome of one finished self-play game, ready to feed
/// [`crate::learn::gradient::accumulate_game`].
pub struct GameResult {
    /// Quiescence-leaf position recorded for each ply in `k0+1..=k_final`
    /// (other slots are unused placeholders).
    pub quiescence_leaves: Vec<Position>,
    /// `[qscore, score]` recorded for each ply, converted to Black's point
    /// of view, same indexing as `quiescence_leaves`.
    pub scores: Vec<[Score; 2]>,
    /// Last ply of the random opening.
    pub k0: i64,
    /// Last ply the game actually played.
    pub k_final: i64,
    /// Blended result seed from Black's point of view: 1.0 win, 0.0 loss,
    /// 0.5 for a ply-cap/no-mate ending.
    pub result: f32,
}

/// Reconstructs the position a principal variation leads to by replaying
/// it move by move from `start`, alternating between two scratch slots.
/// A safe stand-in for the source engine's trick of reading back whatever
/// its own search recursion left in its scratch stack.
fn replay_pv(start: &Position, pv: &[Move]) -> Position {
    let mut scratch = [start.clone(), Position::empty()];
    let mut cur = 0usize;
    for &mv in pv {
        if mv.is_none() {
            break;
        }
        if cur == 0 {
            let (a, b) = scratch.split_at_mut(1);
            a[0].do_move_into(&mut b[0], mv);
        } else {
            let (a, b) = scratch.split_at_mut(1);
            b[0].do_move_into(&mut a[0], mv);
        }
        cur ^= 1;
    }
    scratch[cur].clone()
}

/// Plays one self-play game from `startpos` to completion and returns its
/// recorded training data. `rng` drives both the random-opening coin flips
/// and (indirectly, through [`random_move::random_move`]) the opening move
/// choice itself.
pub fn play_one_game(rng: &mut impl Rng) -> GameResult {
    let capacity = STACK_HEADROOM + MAX_GAME_PLIES as usize + RECURSION_HEADROOM;
    let mut stack = vec![Position::empty(); capacity];
    board::load_sfen(&mut stack[STACK_HEADROOM..], board::STARTPOS_SFEN)
        .expect("the startpos SFEN always parses");

    let mut quiescence_leaves = vec![Position::empty(); MAX_GAME_PLIES as usize];
    let mut scores = vec![[0 as Score; 2]; MAX_GAME_PLIES as usize];
    let mut k0: i64 = 0;
    let mut k: i64 = 0;
    let mut score: Score = 0;
    let mut final_turn_sign: i32 = 1;

    let k_final = loop {
        let idx = STACK_HEADROOM + k as usize;
        stack[idx].ply = 0;
        let turn_sign = stack[idx].turn.sign();
        final_turn_sign = turn_sign;

        let is_random_ply = k < RANDOM_OPENING_PLIES
            && (k < FORCED_RANDOM_PLIES || rng.gen_range(0..RANDOM_MOVE_CHANCE_DENOM) > 0);

        let best_move;
        if is_random_ply {
            best_move = random_move::random_move(&mut stack, idx, far_future());
            k0 = k;
            // `score` is deliberately left at whatever the last real search
            // produced; the stale value still feeds the game-over check below.
        } else {
            score = algorithms::search(
                &mut stack,
                idx,
                -SCORE_INFINITE,
                SCORE_INFINITE,
                SEARCH_DEPTH,
                far_future(),
            );
            best_move = algorithms::root_best_move();

            if !best_move.is_none() {
                let qscore = algorithms::search(
                    &mut stack,
                    idx,
                    -SCORE_INFINITE,
                    SCORE_INFINITE,
                    0,
                    far_future(),
                );
                let pv = algorithms::principal_variation();
                quiescence_leaves[k as usize] = replay_pv(&stack[idx], &pv);
                scores[k as usize] = [qscore * turn_sign, score * turn_sign];
            }
        }

        if !best_move.is_none() {
            let (head, tail) = stack.split_at_mut(idx + 1);
            head[idx].do_move_into(&mut tail[0], best_move);
        }

        let game_over = score.abs() >= SCORE_MATE_IN_MAX_PLY
            || best_move.is_none()
            || k >= MAX_GAME_PLIES - 1;
        if game_over {
            break k;
        }
        k += 1;
    };

    let black_score = score * final_turn_sign;
    let result = if black_score >= SCORE_MATE_IN_MAX_PLY {
        1.0
    } else if black_score <= -SCORE_MATE_IN_MAX_PLY {
        0.0
    } else {
        0.5
    };

    GameResult {
        quiescence_leaves,
        scores,
        k0,
        k_final,
        result,
    }
}
