//! Error types for SFEN parsing and move formatting.

use std::fmt;

/// Error parsing an SFEN position string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SfenError {
    /// Fewer than four whitespace-separated fields (board, turn, hand, move count).
    TooFewParts { found: usize },
    /// A character in the board field isn't a recognized piece letter.
    InvalidPiece { char: char },
    /// Too many ranks in the board field.
    TooManyRanks { found: usize },
    /// A rank in the board field doesn't sum to exactly nine files.
    RankFileCount { rank: usize, files: i32 },
    /// Side-to-move field was neither `b` nor `w`.
    InvalidTurn { found: String },
    /// A `moves` token didn't match any pseudo-legal move from the current position.
    UnknownMove { notation: String },
}

impl fmt::Display for SfenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SfenError::TooFewParts { found } => {
                write!(f, "sfen must have at least 4 parts, found {found}")
            }
            SfenError::InvalidPiece { char } => write!(f, "invalid piece character '{char}'"),
            SfenError::TooManyRanks { found } => write!(f, "too many ranks ({found}), expected 9"),
            SfenError::RankFileCount { rank, files } => {
                write!(f, "rank {rank} covers {files} files, expected 9")
            }
            SfenError::InvalidTurn { found } => {
                write!(f, "invalid side to move '{found}', expected 'b' or 'w'")
            }
            SfenError::UnknownMove { notation } => {
                write!(f, "'{notation}' does not match any pseudo-legal move")
            }
        }
    }
}

impl std::error::Error for SfenError {}
