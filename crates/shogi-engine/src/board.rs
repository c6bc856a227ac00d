//! Board and piece-stand snapshots.

use serde::{Deserialize, Serialize};
use shogi_core::{Color, Move, MoveSource, Piece, PieceKind, Square};
use std::fmt;
use std::ops::Index;

/// The 81 squares of a shogi board, each empty or holding one piece.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            cells: [None; Square::COUNT],
        }
    }

    /// Creates a board from cells indexed by [`Square::index`].
    pub const fn from_cells(cells: [Option<Piece>; Square::COUNT]) -> Self {
        Board { cells }
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    /// Replaces the contents of `sq` and returns what was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.cells[sq.index() as usize], piece)
    }

    /// Iterates over occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Returns the square of `color`'s king, or `None` if it has none.
    ///
    /// With several kings of one color (a malformed board) the
    /// lowest-indexed one is returned.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
    }

    /// Converts the board to the piece-placement field of an SFEN string.
    pub fn to_sfen(&self) -> String {
        let mut sfen = String::new();
        for rank in 1..=9u8 {
            let mut empty = 0;
            for file in (1..=9u8).rev() {
                match Square::new(file, rank).and_then(|sq| self.get(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            sfen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        sfen.push_str(&piece.to_sfen());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                sfen.push_str(&empty.to_string());
            }
            if rank < 9 {
                sfen.push('/');
            }
        }
        sfen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.cells[sq.index() as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   9  8  7  6  5  4  3  2  1")?;
        for rank in 1..=9u8 {
            write!(f, "{} ", (b'a' + rank - 1) as char)?;
            for file in (1..=9u8).rev() {
                match Square::new(file, rank).and_then(|sq| self.get(sq)) {
                    Some(piece) => write!(f, "{:>2} ", piece.to_sfen())?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Captured pieces held by each side, available for dropping.
///
/// Only the seven droppable kinds can be held; pieces always return to the
/// stand unpromoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PieceStand {
    counts: [[u8; PieceKind::HAND.len()]; 2],
}

impl PieceStand {
    /// Creates an empty stand for both colors.
    pub const fn new() -> Self {
        PieceStand {
            counts: [[0; PieceKind::HAND.len()]; 2],
        }
    }

    #[inline]
    fn slot(kind: PieceKind) -> Option<usize> {
        kind.is_droppable().then(|| kind.index())
    }

    /// Returns how many pieces of `kind` `color` holds (always 0 for kings and promoted kinds).
    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u8 {
        Self::slot(kind).map_or(0, |slot| self.counts[color.index()][slot])
    }

    /// Sets the number of pieces of `kind` held by `color`.
    ///
    /// Returns false, leaving the stand untouched, for a kind that cannot be held.
    pub fn set(&mut self, color: Color, kind: PieceKind, count: u8) -> bool {
        match Self::slot(kind) {
            Some(slot) => {
                self.counts[color.index()][slot] = count;
                true
            }
            None => false,
        }
    }

    /// Adds one piece to `color`'s stand, unpromoting it first.
    ///
    /// Returns false for a king, which can never be held, and leaves a count
    /// already at `u8::MAX` unchanged.
    pub fn add(&mut self, color: Color, kind: PieceKind) -> bool {
        let Some(slot) = Self::slot(kind.unpromote()) else {
            return false;
        };
        let count = &mut self.counts[color.index()][slot];
        match count.checked_add(1) {
            Some(next) => {
                *count = next;
                true
            }
            None => false,
        }
    }

    /// Removes one piece of `kind` from `color`'s stand.
    ///
    /// Returns false if there was none to remove.
    pub fn remove(&mut self, color: Color, kind: PieceKind) -> bool {
        match Self::slot(kind) {
            Some(slot) if self.counts[color.index()][slot] > 0 => {
                self.counts[color.index()][slot] -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns true if `color` holds nothing.
    pub fn is_empty(&self, color: Color) -> bool {
        self.counts[color.index()].iter().all(|&count| count == 0)
    }

    /// Iterates over the kinds `color` holds, with their counts.
    pub fn holdings(&self, color: Color) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::HAND
            .into_iter()
            .map(move |kind| (kind, self.count(color, kind)))
            .filter(|&(_, count)| count > 0)
    }

    /// Converts the stand to the hand field of an SFEN string.
    ///
    /// Black's pieces come first, each side ordered rook, bishop, gold,
    /// silver, knight, lance, pawn.
    pub fn to_sfen(&self) -> String {
        const ORDER: [PieceKind; 7] = [
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Gold,
            PieceKind::Silver,
            PieceKind::Knight,
            PieceKind::Lance,
            PieceKind::Pawn,
        ];

        let mut sfen = String::new();
        for color in Color::ALL {
            for kind in ORDER {
                let count = self.count(color, kind);
                if count > 1 {
                    sfen.push_str(&count.to_string());
                }
                if count > 0 {
                    sfen.push_str(&Piece::new(kind, color).to_sfen());
                }
            }
        }
        if sfen.is_empty() {
            sfen.push('-');
        }
        sfen
    }
}

/// What [`revert_move`] needs to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Undo {
    /// The piece that stood on the destination.
    pub captured: Option<Piece>,
    /// Whether the captured piece reached the mover's stand.
    stashed: bool,
}

/// Applies `mv` to a board and stand without any legality check.
///
/// A captured piece goes to the mover's stand unpromoted, unless that stand
/// count is already saturated.
pub(crate) fn apply_move(board: &mut Board, stand: &mut PieceStand, mv: &Move) -> Undo {
    match mv.from {
        MoveSource::Board(from) => {
            board.set(from, None);
        }
        MoveSource::Stand(color) => {
            stand.remove(color, mv.piece.kind);
        }
    }
    let captured = board.set(mv.to, Some(mv.piece_after()));
    let stashed = captured.is_some_and(|piece| stand.add(mv.piece.color, piece.kind));
    Undo { captured, stashed }
}

/// Reverts a move applied with [`apply_move`].
pub(crate) fn revert_move(board: &mut Board, stand: &mut PieceStand, mv: &Move, undo: Undo) {
    board.set(mv.to, undo.captured);
    if let Some(captured) = undo.captured.filter(|_| undo.stashed) {
        stand.remove(mv.piece.color, captured.kind.unpromote());
    }
    match mv.from {
        MoveSource::Board(from) => {
            board.set(from, Some(mv.piece));
        }
        MoveSource::Stand(color) => {
            stand.add(color, mv.piece.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn board_get_set() {
        let mut board = Board::empty();
        let gold = Piece::new(PieceKind::Gold, Color::Black);
        assert_eq!(board.set(sq(5, 5), Some(gold)), None);
        assert_eq!(board.get(sq(5, 5)), Some(gold));
        assert_eq!(board[sq(5, 5)], Some(gold));
        assert_eq!(board.set(sq(5, 5), None), Some(gold));
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn king_square() {
        let mut board = Board::empty();
        board.set(sq(5, 9), Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(board.king_square(Color::Black), Some(sq(5, 9)));
        assert_eq!(board.king_square(Color::White), None);
    }

    #[test]
    fn board_sfen() {
        let mut board = Board::empty();
        board.set(sq(5, 1), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq(5, 9), Some(Piece::new(PieceKind::King, Color::Black)));
        board.set(sq(1, 5), Some(Piece::new(PieceKind::Dragon, Color::Black)));
        assert_eq!(board.to_sfen(), "4k4/9/9/9/8+R/9/9/9/4K4");
    }

    #[test]
    fn stand_counts() {
        let mut stand = PieceStand::new();
        assert!(stand.is_empty(Color::Black));
        assert!(stand.add(Color::Black, PieceKind::Horse));
        assert_eq!(stand.count(Color::Black, PieceKind::Bishop), 1);
        assert_eq!(stand.count(Color::Black, PieceKind::Horse), 0);
        assert!(!stand.add(Color::Black, PieceKind::King));
        assert!(stand.remove(Color::Black, PieceKind::Bishop));
        assert!(!stand.remove(Color::Black, PieceKind::Bishop));
        assert!(!stand.set(Color::White, PieceKind::Dragon, 1));
        assert!(stand.is_empty(Color::Black));
    }

    #[test]
    fn stand_sfen_order() {
        let mut stand = PieceStand::new();
        stand.set(Color::Black, PieceKind::Pawn, 2);
        stand.set(Color::Black, PieceKind::Rook, 1);
        stand.set(Color::White, PieceKind::Bishop, 1);
        assert_eq!(stand.to_sfen(), "R2Pb");
        assert_eq!(PieceStand::new().to_sfen(), "-");
        let holdings: Vec<_> = stand.holdings(Color::Black).collect();
        assert_eq!(holdings, vec![(PieceKind::Pawn, 2), (PieceKind::Rook, 1)]);
    }

    #[test]
    fn apply_and_revert_capture() {
        let mut board = Board::empty();
        let mut stand = PieceStand::new();
        let silver = Piece::new(PieceKind::Silver, Color::Black);
        let tokin = Piece::new(PieceKind::ProPawn, Color::White);
        board.set(sq(5, 4), Some(silver));
        board.set(sq(5, 3), Some(tokin));
        let before = (board.clone(), stand);

        let mv = Move::board(sq(5, 4), sq(5, 3), silver, Some(tokin), true);
        let undo = apply_move(&mut board, &mut stand, &mv);
        assert_eq!(undo.captured, Some(tokin));
        assert_eq!(board.get(sq(5, 3)).map(|p| p.kind), Some(PieceKind::ProSilver));
        assert_eq!(stand.count(Color::Black, PieceKind::Pawn), 1);

        revert_move(&mut board, &mut stand, &mv, undo);
        assert_eq!((board, stand), before);
    }

    #[test]
    fn apply_and_revert_drop() {
        let mut board = Board::empty();
        let mut stand = PieceStand::new();
        stand.set(Color::White, PieceKind::Knight, 1);
        let knight = Piece::new(PieceKind::Knight, Color::White);

        let mv = Move::drop(sq(3, 3), knight);
        let undo = apply_move(&mut board, &mut stand, &mv);
        assert_eq!(undo.captured, None);
        assert_eq!(board.get(sq(3, 3)), Some(knight));
        assert!(stand.is_empty(Color::White));

        revert_move(&mut board, &mut stand, &mv, undo);
        assert_eq!(board.get(sq(3, 3)), None);
        assert_eq!(stand.count(Color::White, PieceKind::Knight), 1);
    }

    #[test]
    fn saturated_stand_survives_apply_and_revert() {
        let mut board = Board::empty();
        let mut stand = PieceStand::new();
        stand.set(Color::Black, PieceKind::Pawn, u8::MAX);
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        board.set(sq(5, 5), Some(rook));
        board.set(sq(5, 3), Some(pawn));
        let before = (board.clone(), stand);

        let mv = Move::board(sq(5, 5), sq(5, 3), rook, Some(pawn), false);
        let undo = apply_move(&mut board, &mut stand, &mv);
        assert_eq!(undo.captured, Some(pawn));
        assert_eq!(stand.count(Color::Black, PieceKind::Pawn), u8::MAX);

        revert_move(&mut board, &mut stand, &mv, undo);
        assert_eq!((board, stand), before);
    }

    #[test]
    fn stand_add_stops_at_max() {
        let mut stand = PieceStand::new();
        stand.set(Color::White, PieceKind::Gold, u8::MAX);
        assert!(!stand.add(Color::White, PieceKind::Gold));
        assert_eq!(stand.count(Color::White, PieceKind::Gold), u8::MAX);
    }
}
