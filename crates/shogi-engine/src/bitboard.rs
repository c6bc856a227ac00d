//! Bitboard representation and operations.
//!
//! A bitboard is an 81-bit set stored in the low bits of a `u128`, one bit per
//! square of the shogi board. This allows cheap set operations over occupancy
//! and attack coverage.

use shogi_core::{Color, Square};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

const MASK: u128 = (1u128 << Square::COUNT) - 1;

/// An 81-bit board representation.
///
/// Bit `n` corresponds to the square with [`Square::index`] `n` (1a = 0, 9i = 80).
/// The 47 high bits are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u128);

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Full bitboard (all 81 squares set).
    pub const FULL: Bitboard = Bitboard(MASK);

    /// Creates a bitboard from raw bits, discarding bits above square 80.
    #[inline]
    pub const fn new(bits: u128) -> Self {
        Bitboard(bits & MASK)
    }

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u128 << sq.index())
    }

    /// Returns all squares on the given file (1-9); empty for other values.
    pub const fn file(file: u8) -> Self {
        let mut bits = 0u128;
        let mut rank = 1u8;
        while rank <= 9 {
            if let Some(sq) = Square::new(file, rank) {
                bits |= 1u128 << sq.index();
            }
            rank += 1;
        }
        Bitboard(bits)
    }

    /// Returns all squares on the given rank (1-9); empty for other values.
    pub const fn rank(rank: u8) -> Self {
        if rank < 1 || rank > 9 {
            return Bitboard::EMPTY;
        }
        Bitboard(0x1FFu128 << ((rank - 1) * 9))
    }

    /// Returns the `depth` ranks farthest from `color`'s side of the board.
    ///
    /// `far_ranks(color, 3)` is the promotion zone.
    pub const fn far_ranks(color: Color, depth: u8) -> Self {
        let mut bits = 0u128;
        let mut relative = 1u8;
        while relative <= depth && relative <= 9 {
            let rank = match color {
                Color::Black => relative,
                Color::White => 10 - relative,
            };
            bits |= Bitboard::rank(rank).0;
            relative += 1;
        }
        Bitboard(bits)
    }

    /// Returns the promotion zone of `color`.
    #[inline]
    pub const fn promotion_zone(color: Color) -> Self {
        Self::far_ranks(color, 3)
    }

    /// Returns true if the bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the bitboard is not empty.
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns the number of set bits (population count).
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u128 << sq.index())) != 0
    }

    /// Sets the given square.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u128 << sq.index();
    }

    /// Clears the given square.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u128 << sq.index());
    }

    /// Returns the lowest-indexed square, or `None` if the bitboard is empty.
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// Pops and returns the lowest-indexed square.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            // SAFETY: only the low 81 bits are ever set.
            Some(unsafe { Square::from_index_unchecked(index) })
        }
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0 & MASK)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard({:#023x})", self.0)?;
        writeln!(f, "  9 8 7 6 5 4 3 2 1")?;
        for rank in 1..=9u8 {
            write!(f, "{} ", (b'a' + rank - 1) as char)?;
            for file in (1..=9u8).rev() {
                let set = Square::new(file, rank).is_some_and(|sq| self.contains(sq));
                write!(f, "{} ", if set { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over set squares in a bitboard.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn bitboard_from_square() {
        let bb = Bitboard::from_square(sq(1, 1));
        assert_eq!(bb.0, 1);
        assert!(bb.contains(sq(1, 1)));
        assert!(!bb.contains(sq(2, 1)));
    }

    #[test]
    fn bitboard_count() {
        assert_eq!(Bitboard::EMPTY.count(), 0);
        assert_eq!(Bitboard::FULL.count(), 81);
        assert_eq!(Bitboard::file(5).count(), 9);
        assert_eq!(Bitboard::rank(9).count(), 9);
        assert_eq!(Bitboard::file(0), Bitboard::EMPTY);
        assert_eq!(Bitboard::rank(10), Bitboard::EMPTY);
    }

    #[test]
    fn not_stays_on_board() {
        assert_eq!(!Bitboard::EMPTY, Bitboard::FULL);
        assert_eq!((!Bitboard::file(1)).count(), 72);
    }

    #[test]
    fn promotion_zones() {
        let black = Bitboard::promotion_zone(Color::Black);
        let white = Bitboard::promotion_zone(Color::White);
        assert_eq!(black.count(), 27);
        assert!(black.contains(sq(5, 3)));
        assert!(!black.contains(sq(5, 4)));
        assert!(white.contains(sq(5, 7)));
        assert!(!white.contains(sq(5, 6)));
        assert_eq!(Bitboard::far_ranks(Color::White, 1), Bitboard::rank(9));
    }

    #[test]
    fn bitboard_iterator() {
        let squares: Vec<Square> = Bitboard::file(3).into_iter().collect();
        assert_eq!(squares.len(), 9);
        assert_eq!(squares[0], sq(3, 1));
        assert_eq!(squares[8], sq(3, 9));
    }

    #[test]
    fn bitboard_pop_lsb() {
        let mut bb = Bitboard::new(0b1010);
        assert_eq!(bb.pop_lsb(), Some(sq(2, 1)));
        assert_eq!(bb.pop_lsb(), Some(sq(4, 1)));
        assert_eq!(bb.pop_lsb(), None);
    }

    #[test]
    fn new_masks_high_bits() {
        assert_eq!(Bitboard::new(u128::MAX), Bitboard::FULL);
        assert_eq!(Bitboard::FULL.lsb(), Some(sq(1, 1)));
    }
}
