//! Pseudo-legal move generation.
//!
//! "Pseudo-legal" here follows the source engine exactly: a king left in
//! check by its own move is a legal-looking move this generator happily
//! produces. Callers filter those out after `do_move` by testing
//! `in_check` on the resulting position (see [`crate::board::make_unmake`]
//! and the search loop), rather than this module ever looking at the
//! opponent's king.

use crate::board::geometry::{for_attack, square, FILE_NUM, RANK_NUM};
use crate::board::state::Position;
use crate::types::{piece_type, Move, MoveList};

impl Position {
    /// All pseudo-legal moves available to `self.turn`: every board move a
    /// piece can make (including both the promoting and non-promoting
    /// variant when both are legal), plus every legal drop.
    pub fn generate_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let turn_mask = self.turn.turn_mask();

        // Board moves. `pawn_files` tracks which files already have one of
        // this side's unpromoted pawns, for the two-pawn-per-file rule on
        // drops below.
        let mut pawn_files: u16 = 0;
        for y in 0..RANK_NUM {
            for x in 0..FILE_NUM {
                let from = square(x, y);
                let p = self.piece[from];
                if p & turn_mask == 0 {
                    continue;
                }
                let pt = crate::types::piece_type_of(p);
                if pt == piece_type::PAWN {
                    pawn_files |= 1 << x;
                }
                for_attack(&self.piece, from, pt, self.turn, |to| {
                    let captured = self.piece[to];
                    if captured & turn_mask != 0 {
                        // own piece, or a wall (all bits set, so it always
                        // matches some turn_mask bit)
                        return false;
                    }
                    let captured_type = crate::types::piece_type_of(captured);

                    if piece_type::can_promote(pt)
                        && (self.in_zone(from) || self.in_zone(to))
                    {
                        moves.push(Move::new_board(from as u8, to as u8, pt, true, captured_type));
                    }
                    let last_rank_blocked = (pt == piece_type::PAWN || pt == piece_type::LANCE)
                        && self.in_last_ranks(to, 1);
                    let last_two_blocked =
                        pt == piece_type::KNIGHT && self.in_last_ranks(to, 2);
                    if !last_rank_blocked && !last_two_blocked {
                        moves.push(Move::new_board(
                            from as u8,
                            to as u8,
                            pt,
                            false,
                            captured_type,
                        ));
                    }
                    false
                });
            }
        }

        // Drops.
        for pt in piece_type::PAWN..piece_type::HAND_TYPE_NUM {
            if self.hand[self.turn.index()][pt as usize] == 0 {
                continue;
            }
            for y in 0..RANK_NUM {
                for x in 0..FILE_NUM {
                    let to = square(x, y);
                    if self.piece[to] != piece_type::EMPTY {
                        continue;
                    }
                    if pt == piece_type::PAWN && pawn_files & (1 << x) != 0 {
                        continue;
                    }
                    let last_rank_blocked =
                        (pt == piece_type::PAWN || pt == piece_type::LANCE)
                            && self.in_last_ranks(to, 1);
                    let last_two_blocked = pt == piece_type::KNIGHT && self.in_last_ranks(to, 2);
                    if !last_rank_blocked && !last_two_blocked {
                        moves.push(Move::new_drop(to as u8, pt));
                    }
                }
            }
        }

        moves
    }

    #[inline]
    fn in_zone(&self, sq: usize) -> bool {
        crate::board::geometry::in_promotion_zone(
            self.turn,
            sq,
            crate::board::geometry::PROMOTION_RANK,
        )
    }

    #[inline]
    fn in_last_ranks(&self, sq: usize, ranks: i32) -> bool {
        crate::board::geometry::in_promotion_zone(self.turn, sq, ranks)
    }
}
