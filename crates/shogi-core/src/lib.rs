//! Core types for shogi.
//!
//! This crate provides the fundamental types used across the shogi engine:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`] and [`MoveSource`] for move representation
//! - SFEN parsing and serialization

mod color;
mod mov;
mod piece;
mod sfen;
mod square;

pub use color::Color;
pub use mov::{Move, MoveSource};
pub use piece::{Piece, PieceKind};
pub use sfen::{SfenError, SfenParser};
pub use square::Square;
