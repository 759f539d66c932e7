//! SFEN parsing/formatting and the `position ... moves ...` replay used by
//! the USI `position` command.

use crate::board::error::SfenError;
use crate::board::geometry::{square, FILE_NUM, ORIGIN, RANK_NUM, STRIDE};
use crate::board::state::Position;
use crate::types::{piece_type, Color, Move};

/// Piece letters in board order; index 0 (`+`) is never looked up directly,
/// it only flags promotion of the next piece.
const SFEN_PIECE: &str = "+PLNSBRGK";

/// Standard shogi starting position, substituted in for the literal token
/// `startpos` the same way the USI `position` command does.
pub const STARTPOS_SFEN: &str =
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

impl Move {
    /// Renders this move the way a GUI expects it on the wire: `"resign"`
    /// for [`Move::NONE`], `"P*5e"`-style for drops, `"7g7f"` / `"7g7f+"` for
    /// board moves.
    pub fn to_sfen(self) -> String {
        if self.is_none() {
            return "resign".to_string();
        }

        let mut s = String::new();
        let add = |s: &mut String, sq: u8| {
            let sq = sq as i32 - ORIGIN;
            let file = (b'1' + (FILE_NUM - 1 - sq % STRIDE) as u8) as char;
            let rank = (b'a' + (sq / STRIDE) as u8) as char;
            s.push(file);
            s.push(rank);
        };

        if self.is_drop() {
            s.push(
                SFEN_PIECE
                    .chars()
                    .nth(self.piece_type() as usize)
                    .expect("piece type in range"),
            );
            s.push('*');
            add(&mut s, self.to());
        } else {
            add(&mut s, self.from());
            add(&mut s, self.to());
            if self.is_promote() {
                s.push('+');
            }
        }
        s
    }
}

impl Position {
    /// Parses the board/turn/hand/movecount fields of an SFEN string into
    /// `self` and returns whatever trailing text followed the movecount
    /// field (typically empty, or `"moves m1 m2 ..."`).
    ///
    /// `startpos` is accepted in place of those four fields, substituted for
    /// the literal starting SFEN exactly as the protocol defines it.
    pub fn parse_sfen_fields<'a>(&mut self, s: &'a str) -> Result<String, SfenError> {
        self.clear();

        let body;
        let s: &str = if let Some(rest) = s.strip_prefix("startpos") {
            body = format!("{STARTPOS_SFEN}{rest}");
            &body
        } else {
            s
        };

        let mut parts = s.split_whitespace();
        let board_field = parts.next().ok_or(SfenError::TooFewParts { found: 0 })?;
        let turn_field = parts.next().ok_or(SfenError::TooFewParts { found: 1 })?;
        let hand_field = parts.next().ok_or(SfenError::TooFewParts { found: 2 })?;
        let _move_count = parts.next().ok_or(SfenError::TooFewParts { found: 3 })?;

        self.parse_board(board_field)?;
        self.parse_turn(turn_field)?;
        self.parse_hand(hand_field)?;

        self.checked = self.in_check(self.turn);
        self.key = self.calc_key();

        Ok(parts.collect::<Vec<_>>().join(" "))
    }

    fn parse_board(&mut self, field: &str) -> Result<(), SfenError> {
        let mut x = 0i32;
        let mut y = 0usize;
        let mut promote = false;
        let max_rank = RANK_NUM as usize;

        for c in field.chars() {
            if c.is_ascii_digit() {
                x += c.to_digit(10).unwrap() as i32;
            } else if c == '+' {
                promote = true;
            } else if c == '/' {
                if x != FILE_NUM {
                    return Err(SfenError::RankFileCount { rank: y, files: x });
                }
                x = 0;
                y += 1;
                if y >= max_rank {
                    return Err(SfenError::TooManyRanks { found: y + 1 });
                }
            } else {
                let color = if c.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };
                let upper = c.to_ascii_uppercase();
                let idx = SFEN_PIECE
                    .find(upper)
                    .ok_or(SfenError::InvalidPiece { char: c })?;
                if idx == 0 || idx as u8 > piece_type::KING {
                    return Err(SfenError::InvalidPiece { char: c });
                }
                let pt = idx as u8 + if promote { piece_type::PROMOTE_MASK } else { 0 };
                let sq = square(x, y as i32);
                self.piece[sq] = pt | color.turn_mask();
                if idx as u8 == piece_type::KING {
                    self.king[color.index()] = sq;
                }
                promote = false;
                x += 1;
            }
        }
        if x != FILE_NUM {
            return Err(SfenError::RankFileCount { rank: y, files: x });
        }
        Ok(())
    }

    fn parse_turn(&mut self, field: &str) -> Result<(), SfenError> {
        self.turn = match field {
            "b" => Color::Black,
            "w" => Color::White,
            _ => {
                return Err(SfenError::InvalidTurn {
                    found: field.to_string(),
                })
            }
        };
        Ok(())
    }

    fn parse_hand(&mut self, field: &str) -> Result<(), SfenError> {
        if field == "-" {
            return Ok(());
        }
        let mut count = 0u32;
        for c in field.chars() {
            if c.is_ascii_digit() {
                count = count * 10 + c.to_digit(10).unwrap();
            } else {
                let color = if c.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };
                let upper = c.to_ascii_uppercase();
                let idx = SFEN_PIECE
                    .find(upper)
                    .ok_or(SfenError::InvalidPiece { char: c })?;
                if idx == 0 || idx as u8 >= piece_type::KING {
                    return Err(SfenError::InvalidPiece { char: c });
                }
                self.hand[color.index()][idx] = if count == 0 { 1 } else { count as u8 };
                count = 0;
            }
        }
        Ok(())
    }
}

/// Parses `s` into `stack[0]` and replays any trailing `moves m1 m2 ...`
/// forward through the rest of `stack`, one stack slot per move (see
/// [`crate::board::make_unmake`] for why the stack is write-forward rather
/// than mutate-in-place). Returns the number of moves applied, i.e. how far
/// the caller's "current position" pointer should advance into `stack`.
///
/// A move token that matches no pseudo-legal move generated from the
/// position it's applied to is a GUI protocol violation; this is treated as
/// fatal; matching the reference engine's behavior of asserting rather than
/// silently ignoring it.
pub fn load_sfen(stack: &mut [Position], s: &str) -> Result<usize, SfenError> {
    let rest = stack[0].parse_sfen_fields(s)?;
    let mut tokens = rest.split_whitespace();
    match tokens.next() {
        Some("moves") => {}
        _ => return Ok(0),
    }

    let mut applied = 0;
    for token in tokens {
        let (head, tail) = stack[applied..].split_at_mut(1);
        let pos = &mut head[0];
        let moves = pos.generate_moves();
        let found = moves
            .iter()
            .find(|mv| mv.to_sfen() == token)
            .copied()
            .ok_or_else(|| SfenError::UnknownMove {
                notation: token.to_string(),
            })?;
        let next = &mut tail[0];
        pos.do_move_into(next, found);
        applied += 1;
    }
    Ok(applied)
}
