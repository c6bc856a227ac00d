//! Pseudo-legal move generation.
//!
//! Generates every move a piece's movement pattern allows, with promotion
//! variants and drop restrictions applied, but without regard to whether the
//! mover's king is left attacked.

use super::{attacks, BitboardSet, MoveList};
use crate::{Bitboard, Board, PieceStand};
use shogi_core::{Color, Move, Piece, PieceKind, Square};

/// Returns true if `piece` standing on `sq` would have no legal move ever
/// again: a pawn or lance on the far rank, a knight on the two far ranks.
#[inline]
pub fn is_dead_square(piece: Piece, sq: Square) -> bool {
    let relative = piece.color.relative_rank(sq.rank());
    match piece.kind {
        PieceKind::Pawn | PieceKind::Lance => relative == 1,
        PieceKind::Knight => relative <= 2,
        _ => false,
    }
}

/// Returns true if moving `piece` from `from` to `to` may promote.
#[inline]
pub fn may_promote(piece: Piece, from: Square, to: Square) -> bool {
    let zone = Bitboard::promotion_zone(piece.color);
    piece.kind.can_promote() && (zone.contains(from) || zone.contains(to))
}

/// Pushes the promoting and non-promoting variants of a board move.
///
/// The non-promoting variant is omitted when the piece could never move
/// again from the destination.
pub(crate) fn push_promotion_variants(mv: Move, from: Square, moves: &mut MoveList) {
    if may_promote(mv.piece, from, mv.to) {
        moves.push(mv.with_promotion(true));
    }
    if !is_dead_square(mv.piece, mv.to) {
        moves.push(mv.with_promotion(false));
    }
}

/// Pushes every pseudo-legal move of `piece` standing on `from`.
pub(crate) fn push_board_moves(
    board: &Board,
    set: &BitboardSet,
    from: Square,
    piece: Piece,
    moves: &mut MoveList,
) {
    let targets = attacks(piece, from, set.occupied()) & !set.color(piece.color);
    for to in targets {
        let mv = Move::board(from, to, piece, board.get(to), false);
        push_promotion_variants(mv, from, moves);
    }
}

/// Returns the squares where `color` may drop a piece of `kind`.
///
/// Drops go to empty squares only. A pawn, lance or knight may not be dropped
/// where it could never move, and a pawn may not be dropped on a file that
/// already holds an unpromoted pawn of the same color.
pub fn drop_targets(set: &BitboardSet, color: Color, kind: PieceKind) -> Bitboard {
    let mut targets = set.empty();
    match kind {
        PieceKind::Pawn | PieceKind::Lance => targets &= !Bitboard::far_ranks(color, 1),
        PieceKind::Knight => targets &= !Bitboard::far_ranks(color, 2),
        _ => {}
    }
    if kind == PieceKind::Pawn {
        for pawn in set.pieces(color, PieceKind::Pawn) {
            targets &= !Bitboard::file(pawn.file());
        }
    }
    targets
}

/// Pushes every pseudo-legal drop of `kind` by `color`.
pub(crate) fn push_drops(set: &BitboardSet, color: Color, kind: PieceKind, moves: &mut MoveList) {
    let piece = Piece::new(kind, color);
    for to in drop_targets(set, color, kind) {
        moves.push(Move::drop(to, piece));
    }
}

/// Pushes every pseudo-legal move for `side`: board moves in square order,
/// then drops in stand order.
pub(crate) fn generate_pseudo_moves(
    board: &Board,
    stand: &PieceStand,
    set: &BitboardSet,
    side: Color,
    moves: &mut MoveList,
) {
    for from in set.color(side) {
        if let Some(piece) = board.get(from) {
            push_board_moves(board, set, from, piece, moves);
        }
    }
    for (kind, _) in stand.holdings(side) {
        push_drops(set, side, kind, moves);
    }
}
