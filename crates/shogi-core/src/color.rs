//! Player color representation.

use serde::{Deserialize, Serialize};

/// The two players. Black (sente) moves first and advances toward rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// Both colors in index order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Returns the index (0 for Black, 1 for White).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the rank delta of one step forward (-1 for Black, +1 for White).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => -1,
            Color::White => 1,
        }
    }

    /// Returns how many ranks `rank` lies from this color's far edge (1 = far rank).
    #[inline]
    pub const fn relative_rank(self, rank: u8) -> u8 {
        match self {
            Color::Black => rank,
            Color::White => 10 - rank,
        }
    }

    /// Returns the SFEN side-to-move character.
    #[inline]
    pub const fn to_sfen_char(self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}
