//! Check detection.

use super::{attackers_to, between, BitboardSet};
use crate::Bitboard;
use shogi_core::{Color, Move, PieceKind, Square};

/// The check status of one side's king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInfo {
    /// The king's square, or `None` if the side has no king.
    pub king: Option<Square>,
    /// Squares of enemy pieces attacking the king.
    pub checkers: Bitboard,
    /// Destinations that answer a single check by a non-king move: capturing
    /// the checker or interposing on the line from a sliding checker. `None`
    /// unless exactly one piece gives check.
    pub resolving: Option<Bitboard>,
}

impl CheckInfo {
    /// Analyzes the attacks on `side`'s king.
    pub fn analyze(set: &BitboardSet, side: Color) -> Self {
        let Some(king) = set.king_square(side) else {
            return CheckInfo {
                king: None,
                checkers: Bitboard::EMPTY,
                resolving: None,
            };
        };

        let checkers = attackers_to(set, king, side.opposite());
        let resolving = if checkers.count() == 1 {
            checkers.lsb().map(|checker| {
                let slides = PieceKind::ALL.into_iter().any(|kind| {
                    kind.is_slider() && set.pieces(side.opposite(), kind).contains(checker)
                });
                let line = if slides {
                    between(checker, king)
                } else {
                    Bitboard::EMPTY
                };
                Bitboard::from_square(checker) | line
            })
        } else {
            None
        };

        CheckInfo {
            king: Some(king),
            checkers,
            resolving,
        }
    }

    /// Number of pieces giving check.
    #[inline]
    pub fn count(&self) -> u32 {
        self.checkers.count()
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.checkers.is_not_empty()
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checkers.count() >= 2
    }

    /// Returns true if `mv` could answer the check this describes.
    ///
    /// Any move is allowed when not in check. In check the king may go
    /// anywhere (its safety is examined later); under a single check other
    /// moves must land on a resolving square; under a double check nothing
    /// but the king may move.
    pub fn admits(&self, mv: &Move) -> bool {
        if !self.is_check() {
            return true;
        }
        if mv.piece.kind == PieceKind::King && !mv.is_drop() {
            return true;
        }
        self.resolving.is_some_and(|squares| squares.contains(mv.to))
    }
}
