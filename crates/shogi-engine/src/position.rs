//! Shogi position representation.

use shogi_core::{Color, Move, Piece, PieceKind, SfenError, SfenParser, Square};

use crate::movegen::{self, MoveList};
use crate::{Board, PieceStand};

/// Complete shogi position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Pieces on the board.
    pub board: Board,

    /// Pieces in hand for both sides.
    pub stand: PieceStand,

    /// The side to move.
    pub side_to_move: Color,

    /// Move number (starts at 1, increments after every move).
    pub move_number: u32,
}

impl Position {
    /// Creates an empty position with Black to move.
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            stand: PieceStand::new(),
            side_to_move: Color::Black,
            move_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_sfen(SfenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from an SFEN string.
    pub fn from_sfen(sfen: &str) -> Result<Self, SfenError> {
        let parsed = SfenParser::parse(sfen)?;

        let mut stand = PieceStand::new();
        for (piece, count) in parsed.hand_counts()? {
            let total = stand.count(piece.color, piece.kind).saturating_add(count);
            stand.set(piece.color, piece.kind, total);
        }

        Ok(Position {
            board: Board::from_cells(parsed.cells()?),
            stand,
            side_to_move: parsed.side_to_move,
            move_number: parsed.move_number,
        })
    }

    /// Converts the position to an SFEN string.
    pub fn to_sfen(&self) -> String {
        format!(
            "{} {} {} {}",
            self.board.to_sfen(),
            self.side_to_move.to_sfen_char(),
            self.stand.to_sfen(),
            self.move_number
        )
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        movegen::generate_moves(self)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        movegen::is_king_attacked(self, self.side_to_move)
    }

    /// Makes a move, returning the new position.
    ///
    /// The move is not checked for legality.
    pub fn make_move(&self, m: Move) -> Position {
        movegen::make_move(self, m)
    }

    /// Resolves a USI move string (e.g. `"7g7f"`, `"8h2b+"`, `"P*5e"`) against
    /// this position.
    ///
    /// Returns `None` if the text is malformed or the source square is empty.
    /// The result carries the moving and captured pieces from the board and
    /// may still be illegal.
    pub fn parse_usi_move(&self, usi: &str) -> Option<Move> {
        if let Some((letter, to)) = usi.split_once('*') {
            let mut chars = letter.chars();
            let kind = PieceKind::from_sfen_letter(chars.next()?.to_ascii_uppercase())?;
            if chars.next().is_some() {
                return None;
            }
            let to = Square::from_usi(to)?;
            return Some(Move::drop(to, Piece::new(kind, self.side_to_move)));
        }

        let (body, promote) = match usi.strip_suffix('+') {
            Some(body) => (body, true),
            None => (usi, false),
        };
        if body.len() != 4 || !body.is_ascii() {
            return None;
        }
        let from = Square::from_usi(&body[..2])?;
        let to = Square::from_usi(&body[2..])?;
        let piece = self.board.get(from)?;
        Some(Move::board(from, to, piece, self.board.get(to), promote))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
