//! Shogi piece representation.

use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fourteen kinds of shogi pieces: eight base kinds and six promoted forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Lance = 1,
    Knight = 2,
    Silver = 3,
    Gold = 4,
    Bishop = 5,
    Rook = 6,
    King = 7,
    ProPawn = 8,
    ProLance = 9,
    ProKnight = 10,
    ProSilver = 11,
    Horse = 12,
    Dragon = 13,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 14;

    /// All piece kinds in index order.
    pub const ALL: [PieceKind; 14] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::King,
        PieceKind::ProPawn,
        PieceKind::ProLance,
        PieceKind::ProKnight,
        PieceKind::ProSilver,
        PieceKind::Horse,
        PieceKind::Dragon,
    ];

    /// Kinds that can be held on a piece stand, in stand order.
    ///
    /// Their indices are 0-6, so `kind.index()` doubles as the stand slot.
    pub const HAND: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    /// Returns the index of this kind (0-13).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a kind from its index (0-13).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the promoted form, or `None` if this kind cannot promote.
    #[inline]
    pub const fn promote(self) -> Option<Self> {
        match self {
            PieceKind::Pawn => Some(PieceKind::ProPawn),
            PieceKind::Lance => Some(PieceKind::ProLance),
            PieceKind::Knight => Some(PieceKind::ProKnight),
            PieceKind::Silver => Some(PieceKind::ProSilver),
            PieceKind::Bishop => Some(PieceKind::Horse),
            PieceKind::Rook => Some(PieceKind::Dragon),
            _ => None,
        }
    }

    /// Returns the unpromoted (base) form. Base kinds map to themselves.
    #[inline]
    pub const fn unpromote(self) -> Self {
        match self {
            PieceKind::ProPawn => PieceKind::Pawn,
            PieceKind::ProLance => PieceKind::Lance,
            PieceKind::ProKnight => PieceKind::Knight,
            PieceKind::ProSilver => PieceKind::Silver,
            PieceKind::Horse => PieceKind::Bishop,
            PieceKind::Dragon => PieceKind::Rook,
            other => other,
        }
    }

    /// Returns true for the six promoted kinds.
    #[inline]
    pub const fn is_promoted(self) -> bool {
        (self as u8) >= PieceKind::ProPawn as u8
    }

    /// Returns true if this kind has a promoted form.
    #[inline]
    pub const fn can_promote(self) -> bool {
        self.promote().is_some()
    }

    /// Returns true if this kind may be held on a stand and dropped.
    #[inline]
    pub const fn is_droppable(self) -> bool {
        (self as u8) < PieceKind::King as u8
    }

    /// Returns true for kinds that move along rays (lance, bishop, rook, horse, dragon).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(
            self,
            PieceKind::Lance
                | PieceKind::Bishop
                | PieceKind::Rook
                | PieceKind::Horse
                | PieceKind::Dragon
        )
    }

    /// Returns the number of pieces of this base kind in the standard set,
    /// both colors and promoted forms included.
    pub const fn supply(self) -> u8 {
        match self.unpromote() {
            PieceKind::Pawn => 18,
            PieceKind::Lance | PieceKind::Knight | PieceKind::Silver | PieceKind::Gold => 4,
            _ => 2,
        }
    }

    /// Returns the uppercase SFEN letter of the base kind.
    pub const fn sfen_letter(self) -> char {
        match self.unpromote() {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Gold => 'G',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            _ => 'K',
        }
    }

    /// Parses a base kind from an SFEN letter of either case.
    pub const fn from_sfen_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Lance => "Lance",
            PieceKind::Knight => "Knight",
            PieceKind::Silver => "Silver",
            PieceKind::Gold => "Gold",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::King => "King",
            PieceKind::ProPawn => "Tokin",
            PieceKind::ProLance => "Promoted Lance",
            PieceKind::ProKnight => "Promoted Knight",
            PieceKind::ProSilver => "Promoted Silver",
            PieceKind::Horse => "Horse",
            PieceKind::Dragon => "Dragon",
        };
        write!(f, "{}", name)
    }
}

/// A piece of a given kind belonging to a given color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Returns the promoted piece, or `None` if the kind cannot promote.
    #[inline]
    pub const fn promoted(self) -> Option<Self> {
        match self.kind.promote() {
            Some(kind) => Some(Piece::new(kind, self.color)),
            None => None,
        }
    }

    /// Returns this piece with its kind reduced to the base kind.
    #[inline]
    pub const fn unpromoted(self) -> Self {
        Piece::new(self.kind.unpromote(), self.color)
    }

    /// Returns the SFEN token for this piece (e.g. `"P"`, `"+b"`).
    pub fn to_sfen(self) -> String {
        let letter = match self.color {
            Color::Black => self.kind.sfen_letter(),
            Color::White => self.kind.sfen_letter().to_ascii_lowercase(),
        };
        if self.kind.is_promoted() {
            format!("+{}", letter)
        } else {
            letter.to_string()
        }
    }

    /// Parses an SFEN letter with an optional preceding `+`.
    ///
    /// Uppercase letters are Black, lowercase White.
    pub fn from_sfen(c: char, promoted: bool) -> Option<Self> {
        let base = PieceKind::from_sfen_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };
        let kind = if promoted { base.promote()? } else { base };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sfen())
    }
}
