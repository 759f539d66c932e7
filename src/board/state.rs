//! The `Position` struct: board, hands, and all per-position bookkeeping.

use crate::board::geometry::{square, FILE_NUM, RANK_NUM, SQUARE_NUM, STRIDE};
use crate::types::{piece_type, Color, Move, WALL};
use crate::zobrist;

/// A single shogi position.
///
/// Positions live in a contiguous stack (see [`crate::board::make_unmake`])
/// rather than being cloned on every move: `do_move` writes the successor
/// into the next slot, so ancestors stay reachable for repetition checks and
/// "undo" is simply not advancing the stack pointer.
#[derive(Clone)]
pub struct Position {
    /// Mailbox board: `piece_type::EMPTY`, a piece byte, or [`WALL`].
    pub piece: [u8; SQUARE_NUM],
    /// Captured-piece counts per color, indexed by [`piece_type`] (Pawn..Gold
    /// used; Bishop/Rook/Gold use only their first slot). Exactly 8 bytes per
    /// color so the whole row can be folded into the Zobrist key as one u64.
    pub hand: [[u8; 8]; 2],
    pub turn: Color,
    /// King square per color, kept denormalized for O(1) check tests.
    pub king: [usize; 2],
    /// Consecutive plies each color has held the opponent in check, reset to
    /// zero whenever that color's move leaves the opponent un-checked.
    pub continuous_check: [u32; 2],
    pub key: u64,
    pub ply: u32,
    pub previous_move: Move,
    /// Whether `turn` is currently in check. Set by `do_move` on the
    /// resulting position, unconditionally — even if the move that produced
    /// it will later be rejected as illegal (own king left in check).
    pub checked: bool,
}

impl Position {
    /// An all-wall board with nothing else initialized; only useful as a
    /// stack slot waiting for `do_move` to fill it in.
    pub fn empty() -> Position {
        Position {
            piece: [WALL; SQUARE_NUM],
            hand: [[0; 8]; 2],
            turn: Color::Black,
            king: [0, 0],
            continuous_check: [0, 0],
            key: 0,
            ply: 0,
            previous_move: Move::NONE,
            checked: false,
        }
    }

    /// Clears the playing 9x9 area to empty squares, leaving the padding
    /// rows/columns as walls, and zeroes every other field. The starting
    /// point for both `fromSfen` and test fixtures that build a position by
    /// hand.
    pub fn clear(&mut self) {
        self.piece = [WALL; SQUARE_NUM];
        for y in 0..RANK_NUM {
            for x in 0..FILE_NUM {
                self.piece[square(x, y)] = piece_type::EMPTY;
            }
        }
        self.hand = [[0; 8]; 2];
        self.turn = Color::Black;
        self.king = [0, 0];
        self.continuous_check = [0, 0];
        self.key = 0;
        self.ply = 0;
        self.previous_move = Move::NONE;
        self.checked = false;
    }

    /// Recomputes [`Position::key`] from scratch: XOR of every occupied
    /// square's Zobrist key, plus the side to move's hand reinterpreted as a
    /// raw `u64`, plus the turn bit. Called once after a position is fully
    /// built (board setup, hand counts, turn) rather than incrementally, to
    /// keep `do_move` simple.
    pub fn calc_key(&self) -> u64 {
        let mut key = 0u64;
        for sq in 0..SQUARE_NUM {
            let p = self.piece[sq];
            if p != piece_type::EMPTY && p != WALL {
                key ^= zobrist::piece_square_key(sq, p);
            }
        }
        key = key.wrapping_add(u64::from_le_bytes(self.hand[self.turn.index()]));
        key = key.wrapping_add(self.turn.index() as u64);
        key
    }

    /// Whether `sq` is attacked by any piece of `color` on this board, used
    /// both for check detection and for drop/king-move legality.
    pub fn attacked_by(&self, sq: usize, color: Color) -> bool {
        for from in 0..SQUARE_NUM {
            let p = self.piece[from];
            if p == piece_type::EMPTY || p == WALL {
                continue;
            }
            if p & color.turn_mask() == 0 {
                continue;
            }
            let pt = crate::types::piece_type_of(p);
            let hit = crate::board::geometry::for_attack(&self.piece, from, pt, color, |target| {
                target == sq
            });
            if hit {
                return true;
            }
        }
        false
    }

    /// Whether `color`'s own king is presently in check.
    pub fn in_check(&self, color: Color) -> bool {
        self.attacked_by(self.king[color.index()], !color)
    }

    /// Field-by-field equality, used by tests and by the repetition search's
    /// exact-match fallback. Positions compare equal purely on reachable
    /// state (board, hands, turn), not on `key` (which is derived) or on
    /// bookkeeping fields (`ply`, `continuous_check`, `previous_move`).
    pub fn board_equal(&self, other: &Position) -> bool {
        self.piece == other.piece && self.hand == other.hand && self.turn == other.turn
    }

    #[inline]
    pub fn stride(&self) -> i32 {
        STRIDE
    }
}
