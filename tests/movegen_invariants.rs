//! Move-generation invariants driven by random legal play: no move ever
//! targets a square the mover already occupies, no drop ever places a
//! second unpromoted pawn on a file, and no generated move leaves a
//! pawn/lance on the last rank or a knight on the last two ranks without
//! the promotion flag set.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shogi_engine::board::geometry::in_promotion_zone;
use shogi_engine::board::{self, Position};
use shogi_engine::types::{piece_type, Move};

fn assert_no_self_capture(pos: &Position, moves: &[Move]) {
    let turn_mask = pos.turn.turn_mask();
    for mv in moves {
        if mv.is_drop() {
            continue;
        }
        let occupant = pos.piece[mv.to() as usize];
        assert_eq!(
            occupant & turn_mask,
            0,
            "move {mv:?} targets a square this side already occupies"
        );
    }
}

fn assert_no_double_pawn_drop(pos: &Position, moves: &[Move]) {
    let turn_mask = pos.turn.turn_mask();
    for mv in moves {
        if !mv.is_drop() || mv.piece_type() != piece_type::PAWN {
            continue;
        }
        let file_of = mv.to() as i32 % pos.stride();
        let has_own_pawn_on_file = (0..9).any(|y| {
            let sq = shogi_engine::board::geometry::square(file_of, y);
            let p = pos.piece[sq];
            p & turn_mask != 0 && shogi_engine::types::piece_type_of(p) == piece_type::PAWN
        });
        assert!(
            !has_own_pawn_on_file,
            "drop {mv:?} places a second unpromoted pawn on its file"
        );
    }
}

fn assert_promotion_restrictions(pos: &Position, moves: &[Move]) {
    for mv in moves {
        if mv.is_promote() {
            continue;
        }
        let blocked_last_rank = matches!(mv.piece_type(), piece_type::PAWN | piece_type::LANCE)
            && in_promotion_zone(pos.turn, mv.to() as usize, 1);
        let blocked_last_two = mv.piece_type() == piece_type::KNIGHT
            && in_promotion_zone(pos.turn, mv.to() as usize, 2);
        assert!(
            !blocked_last_rank,
            "move {mv:?} leaves a pawn/lance on the last rank without promoting"
        );
        assert!(
            !blocked_last_two,
            "move {mv:?} leaves a knight on the last two ranks without promoting"
        );
    }
}

/// Plays up to `max_plies` random pseudo-legal-but-own-king-safe moves from
/// the initial position, checking the invariants above at every ply.
fn walk_random_game(seed: u64, max_plies: u32) {
    let mut rng = StdRng::seed_from_u64(seed);
    let capacity = 20 + max_plies as usize;
    let mut stack = vec![Position::empty(); capacity];
    board::load_sfen(&mut stack[16..], board::STARTPOS_SFEN).unwrap();

    for ply in 0..max_plies as usize {
        let idx = 16 + ply;
        let moves = stack[idx].generate_moves();
        assert_no_self_capture(&stack[idx], moves.as_slice());
        assert_no_double_pawn_drop(&stack[idx], moves.as_slice());
        assert_promotion_restrictions(&stack[idx], moves.as_slice());

        if moves.is_empty() {
            break;
        }
        let turn = stack[idx].turn;
        let n = moves.len();
        let start = rng.gen_range(0..n);
        let mut played = false;
        for i in 0..n {
            let mv = moves.as_slice()[(start + i) % n];
            let (head, tail) = stack.split_at_mut(idx + 1);
            head[idx].do_move_into(&mut tail[0], mv);
            if !tail[0].in_check(turn) {
                played = true;
                break;
            }
        }
        if !played {
            break;
        }
    }
}

proptest! {
    #[test]
    fn movegen_invariants_hold_along_random_games(seed: u64, plies in 1u32..40) {
        walk_random_game(seed, plies);
    }
}
