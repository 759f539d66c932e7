//! Entering-king (`nyugyoku`) declaration-win judgment.

use crate::board::geometry::{square, FILE_NUM};
use crate::board::state::Position;
use crate::types::piece_type;

/// Point value of each piece type under entering-king scoring: rooks and
/// bishops (promoted or not) are worth 5, every other non-king piece is
/// worth 1, the king itself is worth 0. Distinct from [`crate::eval`]'s
/// material table, which this scoring scheme has nothing to do with.
const ENTERING_KING_SCORE: [i32; piece_type::PIECE_TYPE_NUM as usize] = [
    0, 1, 1, 1, 1, 5, 5, 1, // Empty Pawn Lance Knight Silver Bishop Rook Gold
    0, 1, 1, 1, 1, 5, 5, // King ProPawn ProLance ProKnight ProSilver Horse Dragon
];

impl Position {
    /// Whether `self.turn` may declare a win by entering the king (24-point
    /// / 27-point rule): the king must already be in its own far camp, not
    /// currently in check, with at least 10 other pieces of its own in that
    /// camp and a total piece-value (board camp pieces plus hand) of at
    /// least 28 for Black or 27 for White.
    pub fn is_win(&self) -> bool {
        if !crate::board::geometry::in_promotion_zone(
            self.turn,
            self.king[self.turn.index()],
            crate::board::geometry::PROMOTION_RANK,
        ) {
            return false;
        }
        if self.checked {
            return false;
        }

        let turn_mask = self.turn.turn_mask();
        let y1 = if self.turn == crate::types::Color::Black {
            3
        } else {
            9
        };

        let mut piece_count = 0;
        let mut score = 0;
        for y in (y1 - 3)..y1 {
            for x in 0..FILE_NUM {
                let sq = square(x, y);
                let p = self.piece[sq];
                if p & turn_mask == 0 {
                    continue;
                }
                let pt = crate::types::piece_type_of(p);
                if pt != piece_type::KING {
                    score += ENTERING_KING_SCORE[pt as usize];
                    piece_count += 1;
                }
            }
        }
        if piece_count < 10 {
            return false;
        }

        for pt in piece_type::PAWN..piece_type::HAND_TYPE_NUM {
            score += ENTERING_KING_SCORE[pt as usize]
                * self.hand[self.turn.index()][pt as usize] as i32;
        }

        let required = if self.turn == crate::types::Color::Black {
            28
        } else {
            27
        };
        score >= required
    }
}
