//! Structural sanity checks for positions.
//!
//! Move generation trusts its input; these checks are for callers that accept
//! positions from outside (an SFEN typed by a user, a board set up in an
//! editor) and want to reject ones that could not arise in a real game.

use serde::{Deserialize, Serialize};
use shogi_core::{Color, Piece, PieceKind, Square};
use thiserror::Error;
use tracing::warn;

use crate::movegen::is_dead_square;
use crate::{Board, PieceStand};

/// Ways a position can be structurally unsound.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StructuralError {
    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },

    #[error("{count} pieces of kind {kind} exceed the supply of {max}")]
    SupplyExceeded {
        kind: PieceKind,
        count: u32,
        max: u8,
    },

    #[error("{color} has more than one unpromoted pawn on file {file}")]
    DoublePawn { color: Color, file: u8 },

    #[error("{piece} on {square} can never move")]
    DeadPiece { piece: Piece, square: Square },
}

/// Which optional checks [`validate_position_with`] runs.
///
/// King count and piece supply are always checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityOptions {
    /// Reject two unpromoted pawns of one color on the same file.
    pub double_pawn: bool,
    /// Reject pawns and lances on the far rank and knights on the two far ranks.
    pub dead_pieces: bool,
}

impl Default for SanityOptions {
    fn default() -> Self {
        SanityOptions {
            double_pawn: true,
            dead_pieces: true,
        }
    }
}

/// Checks a position with the default [`SanityOptions`].
pub fn validate_position(board: &Board, stand: &PieceStand) -> Result<(), StructuralError> {
    validate_position_with(board, stand, &SanityOptions::default())
}

/// Checks a position, returning the first problem found.
pub fn validate_position_with(
    board: &Board,
    stand: &PieceStand,
    options: &SanityOptions,
) -> Result<(), StructuralError> {
    let result = check_kings(board)
        .and_then(|()| check_supply(board, stand))
        .and_then(|()| {
            if options.double_pawn {
                check_double_pawns(board)
            } else {
                Ok(())
            }
        })
        .and_then(|()| {
            if options.dead_pieces {
                check_dead_pieces(board)
            } else {
                Ok(())
            }
        });

    if let Err(error) = &result {
        warn!(%error, "position failed sanity check");
    }
    result
}

fn check_kings(board: &Board) -> Result<(), StructuralError> {
    for color in Color::ALL {
        let king = Piece::new(PieceKind::King, color);
        let count = board.pieces().filter(|&(_, piece)| piece == king).count();
        if count != 1 {
            return Err(StructuralError::KingCount { color, count });
        }
    }
    Ok(())
}

fn check_supply(board: &Board, stand: &PieceStand) -> Result<(), StructuralError> {
    let mut counts = [0u32; PieceKind::COUNT];
    for (_, piece) in board.pieces() {
        counts[piece.kind.unpromote().index()] += 1;
    }
    for color in Color::ALL {
        for (kind, count) in stand.holdings(color) {
            counts[kind.index()] += u32::from(count);
        }
    }

    for kind in PieceKind::ALL.into_iter().filter(|kind| !kind.is_promoted()) {
        let count = counts[kind.index()];
        let max = kind.supply();
        if count > u32::from(max) {
            return Err(StructuralError::SupplyExceeded { kind, count, max });
        }
    }
    Ok(())
}

fn check_double_pawns(board: &Board) -> Result<(), StructuralError> {
    for color in Color::ALL {
        let pawn = Piece::new(PieceKind::Pawn, color);
        let mut seen = [false; 9];
        for (sq, piece) in board.pieces() {
            if piece != pawn {
                continue;
            }
            let file = sq.file();
            let slot = &mut seen[usize::from(file - 1)];
            if *slot {
                return Err(StructuralError::DoublePawn { color, file });
            }
            *slot = true;
        }
    }
    Ok(())
}

fn check_dead_pieces(board: &Board) -> Result<(), StructuralError> {
    match board.pieces().find(|&(sq, piece)| is_dead_square(piece, sq)) {
        Some((square, piece)) => Err(StructuralError::DeadPiece { piece, square }),
        None => Ok(()),
    }
}
