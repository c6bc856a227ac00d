//! Move representation.

use crate::{Color, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a moving piece comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSource {
    /// A piece already standing on the board.
    Board(Square),
    /// A drop from the given color's piece stand.
    Stand(Color),
}

/// A shogi move.
///
/// Besides origin and destination a move carries the moving piece and the
/// piece it captures, so that a caller can describe exactly the move it
/// intends; the validator rejects moves whose pieces disagree with the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: MoveSource,
    pub to: Square,
    /// The piece as it stands before moving (never promoted on a drop).
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promote: bool,
}

impl Move {
    /// Creates a board move.
    #[inline]
    pub const fn board(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        promote: bool,
    ) -> Self {
        Move {
            from: MoveSource::Board(from),
            to,
            piece,
            captured,
            promote,
        }
    }

    /// Creates a drop of `piece` from its owner's stand.
    #[inline]
    pub const fn drop(to: Square, piece: Piece) -> Self {
        Move {
            from: MoveSource::Stand(piece.color),
            to,
            piece,
            captured: None,
            promote: false,
        }
    }

    /// Returns true if this move drops a piece from a stand.
    #[inline]
    pub const fn is_drop(&self) -> bool {
        matches!(self.from, MoveSource::Stand(_))
    }

    /// Returns the origin square of a board move.
    #[inline]
    pub const fn from_square(&self) -> Option<Square> {
        match self.from {
            MoveSource::Board(sq) => Some(sq),
            MoveSource::Stand(_) => None,
        }
    }

    /// Returns a copy of this move with the promotion flag replaced.
    #[inline]
    pub const fn with_promotion(self, promote: bool) -> Self {
        Move { promote, ..self }
    }

    /// Returns the piece standing on the destination after the move.
    pub fn piece_after(&self) -> Piece {
        if self.promote {
            self.piece.promoted().unwrap_or(self.piece)
        } else {
            self.piece
        }
    }

    /// Returns the USI notation for this move (e.g. `"7g7f"`, `"8h2b+"`, `"P*5e"`).
    pub fn to_usi(&self) -> String {
        match self.from {
            MoveSource::Board(from) => {
                let promo = if self.promote { "+" } else { "" };
                format!("{}{}{}", from, self.to, promo)
            }
            MoveSource::Stand(_) => format!("{}*{}", self.piece.kind.sfen_letter(), self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.piece, self.to_usi())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}
