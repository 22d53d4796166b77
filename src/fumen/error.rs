use crate::fumen::field::Piece;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FumenError {
    #[error("Unsupported fumen version (expected v115@, m115@ or d115@ data)")]
    UnsupportedVersion,

    #[error("Invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Unexpected end of fumen data")]
    UnexpectedEnd,

    #[error("Field data overflows the board")]
    FieldOverflow,

    #[error("Invalid piece value: {0}")]
    InvalidPiece(u32),

    #[error("Piece {piece:?} at ({x}, {y}) does not fit on the board")]
    PieceOutOfBounds { piece: Piece, x: i32, y: i32 },

    #[error("Fumen contains no pages")]
    NoPages,
}

pub type FumenResult<T> = std::result::Result<T, FumenError>;
