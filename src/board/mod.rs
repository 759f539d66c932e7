//! Position representation: mailbox board, hands, move generation, SFEN I/O,
//! and the entering-king win judgment.

pub mod error;
pub mod geometry;
mod make_unmake;
mod movegen;
pub mod sfen;
pub mod state;
mod win;

pub use error::SfenError;
pub use sfen::{load_sfen, STARTPOS_SFEN};
pub use state::Position;
