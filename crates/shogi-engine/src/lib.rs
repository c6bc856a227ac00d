//! Shogi legal-move generation and validation.
//!
//! This crate provides:
//! - [`Bitboard`] - 81-bit board representation with efficient operations
//! - [`Board`] and [`PieceStand`] - snapshots of the board and the pieces in hand
//! - [`Position`] - Full game state with SFEN and USI support
//! - [`MoveValidator`] - Legality queries, promotion choices and check counts
//! - Structural sanity checks for externally supplied positions
//!
//! # Architecture
//!
//! Every query builds a [`BitboardSet`](movegen::BitboardSet) from the board
//! snapshot: one bitboard per color and piece kind. Pseudo-legal moves and
//! drops come from static movement-pattern tables. A check-aware pre-filter
//! discards moves that cannot answer a check, and each survivor is then played
//! on a scratch copy to confirm the mover's king is safe. Pawn drops that give
//! mate are rejected by searching the opponent's replies on the same scratch.
//!
//! # Example
//!
//! ```
//! use shogi_engine::{MoveValidator, Position};
//!
//! let position = Position::startpos();
//! let validator = MoveValidator::new();
//! let moves = validator.enumerate_legal_moves(
//!     position.side_to_move,
//!     &position.board,
//!     &position.stand,
//! );
//! assert_eq!(moves.len(), 30);
//!
//! let push = position.parse_usi_move("7g7f").unwrap();
//! let status = validator.check_position_move(&position, &push);
//! assert!(status.non_promoting_move_exists);
//! assert!(!status.promoting_move_exists);
//! ```

mod bitboard;
mod board;
pub mod movegen;
mod position;
pub mod sanity;
mod validator;

pub use bitboard::Bitboard;
pub use board::{Board, PieceStand};
pub use movegen::{
    attackers_to, between, generate_moves, is_king_attacked, is_legal, make_move, CheckInfo,
    MoveList,
};
pub use position::Position;
pub use sanity::{validate_position, validate_position_with, SanityOptions, StructuralError};
pub use validator::{LegalMoveStatus, MoveValidator};
