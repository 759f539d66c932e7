//! Engine orchestration: the long-lived game stack, `isready` setup, and
//! spawning the detached search thread `go` starts.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::board::{self, Position, SfenError};
use crate::constants::STACK_HEADROOM;
use crate::search::{self, control};
use crate::types::Color;

/// Weight file the engine persists its learned evaluation table to.
pub const WEIGHTS_PATH: &str = "pp.bin";

/// How many plies of real-game history plus how much working depth the
/// stack reserves; generous enough for any realistic game length plus a
/// full-depth search descent.
const STACK_CAPACITY: usize = STACK_HEADROOM + 4096;

/// The single long-lived game position stack. `CURRENT_INDEX` names which
/// slot holds the position the next `go` should search from; everything
/// below it is real game history (visible to repetition detection),
/// everything from `STACK_HEADROOM` up to `CURRENT_INDEX` is the replayed
/// game, and everything above `CURRENT_INDEX` is overwritten by the next
/// search's descent.
pub static GAME_STACK: Lazy<Mutex<Vec<Position>>> =
    Lazy::new(|| Mutex::new(vec![Position::empty(); STACK_CAPACITY]));
pub static CURRENT_INDEX: AtomicUsize = AtomicUsize::new(STACK_HEADROOM);

/// One-time setup triggered by the USI `isready` command: allocates the
/// Zobrist key table, loads the learned weight file if present, and clears
/// the transposition table for a clean game.
pub fn isready() {
    crate::zobrist::init();
    let _ = crate::eval::load_weights(Path::new(WEIGHTS_PATH));
    search::TT.lock().clear();
}

/// Parses `sfen` (an SFEN string, `startpos`, or either with a trailing
/// `moves ...` list) into the game stack, starting at
/// [`crate::constants::STACK_HEADROOM`], and records where the resulting
/// position landed.
pub fn set_position(sfen: &str) -> Result<(), SfenError> {
    let mut stack = GAME_STACK.lock();
    let applied = board::load_sfen(&mut stack[STACK_HEADROOM..], sfen)?;
    CURRENT_INDEX.store(STACK_HEADROOM + applied, Ordering::SeqCst);
    Ok(())
}

/// Starts a search from the current position with a `msec` time budget
/// (already net of byoyomi/increment arithmetic; [`crate::options`]'s
/// `TimeMargin` is subtracted here, matching the source engine reserving a
/// safety margin against GUI/OS scheduling jitter). The search runs on a
/// detached thread; `info`/`bestmove` lines are written directly to stdout
/// as they become available.
pub fn think(msec: i64) {
    control::reset();
    let time_start = Instant::now();
    let budget = (msec - crate::options::time_margin_ms()).max(0);
    let time_end = time_start + Duration::from_millis(budget as u64);

    std::thread::spawn(move || {
        let mut stack = GAME_STACK.lock();
        let idx = CURRENT_INDEX.load(Ordering::SeqCst);
        stack[idx].ply = 0;
        search::iterative_deepening(&mut stack, idx, time_start, time_end);
    });
}

/// Evaluates the current position statically, for the `go infinite`
/// info-before-searching line.
pub fn evaluate_current() -> crate::constants::Score {
    let stack = GAME_STACK.lock();
    let idx = CURRENT_INDEX.load(Ordering::SeqCst);
    stack[idx].evaluate()
}

/// Whether the side to move at the current position is Black, used by the
/// `go btime ... wtime ...` handler to pick which clock applies.
pub fn turn_is_black() -> bool {
    let stack = GAME_STACK.lock();
    let idx = CURRENT_INDEX.load(Ordering::SeqCst);
    stack[idx].turn == Color::Black
}
