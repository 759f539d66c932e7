//! Score domain and search-wide limits.
//!
//! Mirrors the constants a shogi engine keeps at global scope: mate scoring,
//! ply ceilings, and the fixed Zobrist seed that lets two independently
//! built engines agree on a hash space.

/// Centipawn score, signed from the side to move's perspective.
pub type Score = i32;

/// Plies a single search line may reach; also the PV table width.
pub const MAX_PLY: usize = 64;

/// Upper bound on pseudo-legal moves in any reachable shogi position.
pub const MAX_MOVES: usize = 593;

/// `i16::MAX`; used as the "infinite" sentinel for forced wins/losses that
/// are not literal mate scores (perpetual check, illegal pawn-drop mate).
pub const SCORE_INFINITE: Score = i16::MAX as Score;

/// Base mate score. A mate found at ply `p` scores `SCORE_MATE - p`, so a
/// shorter mate always outscores a longer one.
pub const SCORE_MATE: Score = 32600;

/// Scores at or beyond this magnitude are reported as `mate` in `info` lines
/// and short-circuit iterative deepening.
pub const SCORE_MATE_IN_MAX_PLY: Score = SCORE_MATE - MAX_PLY as Score;

/// Quiescence search gives up below this depth regardless of stand-pat.
pub const QSEARCH_DEPTH_FLOOR: i32 = -4;

/// Fixed Zobrist seed so engines on different machines share a hash space.
pub const ZOBRIST_SEED: u64 = 686;

/// Direct-mapped transposition table size (entries, power of two).
pub const DEFAULT_TT_SIZE: usize = 1 << 20;

/// Headroom reserved at the bottom of every position stack so repetition
/// detection (which walks back up to 16 plies) never indexes below zero.
pub const STACK_HEADROOM: usize = 16;
