//! Direct unit coverage of the repetition/perpetual-check probe's bit
//! arithmetic, independent of move generation: the probe only ever reads
//! `key`, `turn`, `ply`, and `continuous_check` off the stack, so these
//! fields are set by hand to hit each branch deterministically rather than
//! reconstructing a legal game that happens to recur.

use shogi_engine::board::Position;
use shogi_engine::constants::SCORE_INFINITE;
use shogi_engine::search::repetition::probe;
use shogi_engine::types::Color;

/// A 17-slot stack (`idx = 16`) with every "irrelevant" ancestor slot set to
/// a sentinel key whose low byte is nonzero — this guarantees (see the
/// module doc) that none of them can accidentally satisfy the superior-
/// repetition bitmask against a test key whose low byte is always zero.
const SENTINEL_KEY: u64 = 0x5555_5555_5555_5555;

fn fresh_stack() -> Vec<Position> {
    let mut stack = vec![Position::empty(); 17];
    for p in stack.iter_mut() {
        p.key = SENTINEL_KEY;
        p.continuous_check = [9, 9];
        p.turn = Color::Black;
    }
    stack
}

#[test]
fn exact_repeat_with_no_perpetual_checker_is_a_draw() {
    let mut stack = fresh_stack();
    stack[12].key = 0x1000;
    stack[12].continuous_check = [0, 0];
    stack[16].key = 0x1000;
    stack[16].ply = 4;
    stack[16].turn = Color::Black;
    stack[16].continuous_check = [0, 0];

    assert_eq!(probe(&stack, 16), Some(0));
}

#[test]
fn side_to_move_perpetually_checking_loses() {
    let mut stack = fresh_stack();
    stack[12].key = 0x1000;
    stack[16].key = 0x1000;
    stack[16].ply = 4;
    stack[16].turn = Color::Black;
    // Black (the side now to move) delivered check on each of its last two
    // moves, so it has been the one giving perpetual check.
    stack[16].continuous_check = [2, 0];

    assert_eq!(probe(&stack, 16), Some(-SCORE_INFINITE));
}

#[test]
fn opponent_perpetually_checking_wins_for_side_to_move() {
    let mut stack = fresh_stack();
    stack[12].key = 0x1000;
    stack[16].key = 0x1000;
    stack[16].ply = 4;
    stack[16].turn = Color::Black;
    // White has been perpetually checking; Black (to move) benefits.
    stack[16].continuous_check = [0, 2];

    assert_eq!(probe(&stack, 16), Some(SCORE_INFINITE));
}

#[test]
fn superior_repetition_shortcut_favors_the_side_with_more_material() {
    let mut stack = fresh_stack();
    stack[12].key = 0x1000;
    stack[16].key = 0x1000u64.wrapping_add(0x300);
    stack[16].ply = 4;
    stack[16].turn = Color::Black;
    stack[16].continuous_check = [0, 0];

    assert_eq!(probe(&stack, 16), Some(SCORE_INFINITE));
}

#[test]
fn inferior_repetition_shortcut_disfavors_the_side_with_less_material() {
    let mut stack = fresh_stack();
    stack[12].key = 0x1000;
    stack[16].key = 0x1000u64.wrapping_sub(0x300);
    stack[16].ply = 4;
    stack[16].turn = Color::Black;
    stack[16].continuous_check = [0, 0];

    assert_eq!(probe(&stack, 16), Some(-SCORE_INFINITE));
}

#[test]
fn root_position_is_never_a_repetition() {
    let mut stack = fresh_stack();
    stack[16].ply = 0;
    assert_eq!(probe(&stack, 16), None);
}
