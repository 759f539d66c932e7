//! Search: negamax with quiescence and a transposition table, iterative
//! deepening, repetition handling, and the random-move fallback.

pub mod algorithms;
pub mod control;
pub mod iterative;
pub mod random_move;
pub mod repetition;

pub use algorithms::{principal_variation, root_best_move, search, TT};
pub use iterative::run as iterative_deepening;
pub use random_move::random_move;
