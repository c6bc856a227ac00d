//! Move generation.
//!
//! Legal moves are produced in three steps: every pseudo-legal move and drop,
//! a cheap check-aware filter that discards moves unable to answer a check,
//! and a make/test/unmake simulation that removes anything leaving the king
//! attacked or dropping a pawn for mate.

mod attacks;
mod check;
mod legal;
mod occupancy;
pub mod perft;
mod pseudo;

use crate::{board, Position};
use shogi_core::{Color, Move};

pub use attacks::{
    attackers_to, attacks, between, is_square_attacked, movement_pattern, orient, slide_attacks,
    step_attacks, MovementPattern, Offset, PATTERNS,
};
pub use check::CheckInfo;
pub(crate) use legal::{degenerate_reason, legal_candidate, legal_moves, legal_variants};
pub use occupancy::BitboardSet;
pub use pseudo::{drop_targets, is_dead_square, may_promote};

/// A list of moves.
///
/// Shogi positions can have close to six hundred legal moves once drops are
/// counted, so the list grows on the heap; [`MoveList::new`] reserves room for
/// a typical middlegame position.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    const INITIAL_CAPACITY: usize = 128;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns true if the list contains `m`.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
pub fn generate_moves(position: &Position) -> MoveList {
    legal_moves(&position.board, &position.stand, position.side_to_move)
}

/// Returns true if `m` is legal for the side to move.
pub fn is_legal(position: &Position, m: &Move) -> bool {
    legal_candidate(&position.board, &position.stand, position.side_to_move, m)
}

/// Returns true if `color`'s king is attacked.
pub fn is_king_attacked(position: &Position, color: Color) -> bool {
    let set = BitboardSet::from_board(&position.board);
    CheckInfo::analyze(&set, color).is_check()
}

/// Makes a move on a position, returning the new position.
///
/// The move is applied as given without checking legality. A capture sends
/// the unpromoted piece to the mover's stand; the side to move flips and the
/// move number advances.
pub fn make_move(position: &Position, m: Move) -> Position {
    let mut next = position.clone();
    board::apply_move(&mut next.board, &mut next.stand, &m);
    next.side_to_move = position.side_to_move.opposite();
    next.move_number = position.move_number.saturating_add(1);
    next
}
