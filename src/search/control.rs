//! Search-wide mutable state shared across the worker thread(s): the stop
//! flag, node counter, and the learning-mode switch that disables the
//! transposition table and time checks during self-play.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static STOP: AtomicBool = AtomicBool::new(false);
static NODES: AtomicU64 = AtomicU64::new(0);
static LEARNING: AtomicBool = AtomicBool::new(false);

/// Resets node count and clears the stop flag; called at the start of every
/// `think`.
pub fn reset() {
    STOP.store(false, Ordering::Relaxed);
    NODES.store(0, Ordering::Relaxed);
}

pub fn set_stop() {
    STOP.store(true, Ordering::Relaxed);
}

pub fn should_stop() -> bool {
    STOP.load(Ordering::Relaxed)
}

pub fn node_visited() -> u64 {
    NODES.fetch_add(1, Ordering::Relaxed) + 1
}

pub fn nodes() -> u64 {
    NODES.load(Ordering::Relaxed)
}

/// While learning, the search skips transposition table reads/writes and
/// time-based stop checks entirely (self-play games run to their natural
/// end, not a clock).
pub fn set_learning(on: bool) {
    LEARNING.store(on, Ordering::Relaxed);
}

pub fn is_learning() -> bool {
    LEARNING.load(Ordering::Relaxed)
}
