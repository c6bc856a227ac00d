//! Per-kind and per-color occupancy bitboards.

use crate::{Bitboard, Board};
use shogi_core::{Color, Piece, PieceKind, Square};

/// Bitboards for every (color, kind) pair, plus per-color unions.
///
/// Kept in sync with a [`Board`] by the move simulator; built from scratch at
/// the start of every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitboardSet {
    pieces: [[Bitboard; PieceKind::COUNT]; 2],
    colors: [Bitboard; 2],
}

impl BitboardSet {
    /// Builds the bitboards for every piece on `board`.
    pub fn from_board(board: &Board) -> Self {
        let mut set = BitboardSet::default();
        for (sq, piece) in board.pieces() {
            set.put(sq, piece);
        }
        set
    }

    /// Marks `piece` as standing on `sq`.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.pieces[piece.color.index()][piece.kind.index()].set(sq);
        self.colors[piece.color.index()].set(sq);
    }

    /// Removes `piece` from `sq`.
    #[inline]
    pub fn remove(&mut self, sq: Square, piece: Piece) {
        self.pieces[piece.color.index()][piece.kind.index()].clear(sq);
        self.colors[piece.color.index()].clear(sq);
    }

    /// Squares holding `color`'s pieces of `kind`.
    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    /// Squares holding any of `color`'s pieces.
    #[inline]
    pub fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// All occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// All empty squares.
    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, PieceKind::King).lsb()
    }
}
