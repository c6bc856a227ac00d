//! Board square representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A square on the 9x9 board, indexed 0-80.
///
/// Files and ranks both run 1-9. File 1 is on Black's right, rank 1 is the
/// rank farthest from Black. The index is `(rank - 1) * 9 + (file - 1)`:
/// - 1a = 0, 2a = 1, ..., 9a = 8
/// - 1b = 9, ..., 9i = 80
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 81;

    /// Creates a square from file and rank (both 1-9).
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file >= 1 && file <= 9 && rank >= 1 && rank <= 9 {
            Some(Square((rank - 1) * 9 + (file - 1)))
        } else {
            None
        }
    }

    /// Creates a square from index (0-80).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from index without bounds checking.
    ///
    /// # Safety
    /// The index must be in the range 0-80.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        debug_assert!((index as usize) < Self::COUNT);
        Square(index)
    }

    /// Returns the index (0-80).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file (1-9).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 9 + 1
    }

    /// Returns the rank (1-9).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 9 + 1
    }

    /// Returns the square `file_delta` files and `rank_delta` ranks away,
    /// or `None` if it falls off the board.
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file < 1 || file > 9 || rank < 1 || rank > 9 {
            None
        } else {
            Square::new(file as u8, rank as u8)
        }
    }

    /// Iterates over all 81 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT as u8).map(Square)
    }

    /// Parses a square from USI notation (e.g. `"7g"`).
    pub fn from_usi(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match bytes[0] {
            b'1'..=b'9' => bytes[0] - b'0',
            _ => return None,
        };
        let rank = match bytes[1] {
            b'a'..=b'i' => bytes[1] - b'a' + 1,
            _ => return None,
        };
        Square::new(file, rank)
    }

    /// Returns the USI notation for this square.
    pub fn to_usi(self) -> String {
        format!("{}{}", self.file(), (b'a' + self.rank() - 1) as char)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_usi())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}
