//! SFEN (Shogi Forsyth-Edwards Notation) parsing and serialization.

use crate::{Color, Piece, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing SFEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SfenError {
    #[error("invalid SFEN: expected 3 or 4 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid side to move: expected 'b' or 'w', got '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid pieces in hand: {0}")]
    InvalidHand(String),

    #[error("invalid move number: {0}")]
    InvalidMoveNumber(String),
}

/// Parsed SFEN data.
///
/// Holds the raw, validated SFEN fields. The engine converts them into its
/// board and piece-stand snapshots through [`cells`](SfenParser::cells) and
/// [`hand_counts`](SfenParser::hand_counts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfenParser {
    /// Piece placement (e.g. "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL")
    pub piece_placement: String,
    /// Side to move.
    pub side_to_move: Color,
    /// Pieces in hand (e.g. "2Pb", "-")
    pub hand: String,
    /// Move number (defaults to 1 when omitted)
    pub move_number: u32,
}

impl SfenParser {
    /// The standard starting position.
    pub const STARTPOS: &'static str =
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

    /// Parses an SFEN string. An optional leading `sfen ` keyword is accepted.
    pub fn parse(sfen: &str) -> Result<Self, SfenError> {
        let sfen = sfen.trim();
        let sfen = sfen.strip_prefix("sfen ").unwrap_or(sfen);
        let parts: Vec<&str> = sfen.split_whitespace().collect();

        if parts.len() != 3 && parts.len() != 4 {
            return Err(SfenError::InvalidPartCount(parts.len()));
        }

        parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => return Err(SfenError::InvalidSideToMove(other.to_string())),
        };

        parse_hand(parts[2])?;

        let move_number = match parts.get(3) {
            Some(text) => text
                .parse::<u32>()
                .map_err(|_| SfenError::InvalidMoveNumber(text.to_string()))?,
            None => 1,
        };

        Ok(SfenParser {
            piece_placement: parts[0].to_string(),
            side_to_move,
            hand: parts[2].to_string(),
            move_number,
        })
    }

    /// Returns the board cells indexed by [`Square::index`].
    pub fn cells(&self) -> Result<[Option<Piece>; Square::COUNT], SfenError> {
        parse_placement(&self.piece_placement)
    }

    /// Returns the pieces in hand as (piece, count) pairs in SFEN order.
    pub fn hand_counts(&self) -> Result<Vec<(Piece, u8)>, SfenError> {
        parse_hand(&self.hand)
    }

    /// Converts the parsed SFEN back to an SFEN string.
    pub fn to_sfen(&self) -> String {
        format!(
            "{} {} {} {}",
            self.piece_placement,
            self.side_to_move.to_sfen_char(),
            self.hand,
            self.move_number
        )
    }
}

impl Default for SfenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; Square::COUNT], SfenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 9 {
        return Err(SfenError::InvalidPiecePlacement(format!(
            "expected 9 ranks, got {}",
            rows.len()
        )));
    }

    let mut cells = [None; Square::COUNT];
    for (row, text) in rows.iter().enumerate() {
        let rank = row as u8 + 1;
        let overflow = || {
            SfenError::InvalidPiecePlacement(format!("rank {} has more than 9 squares", rank))
        };
        // Files run 9 -> 1 within a row.
        let mut columns = 0u8;
        let mut promoted = false;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|_| !promoted) {
                if skip == 0 {
                    return Err(SfenError::InvalidPiecePlacement(format!(
                        "zero skip count in rank {}",
                        rank
                    )));
                }
                columns += skip as u8;
                if columns > 9 {
                    return Err(overflow());
                }
            } else if c == '+' && !promoted {
                promoted = true;
            } else {
                let piece = Piece::from_sfen(c, promoted).ok_or_else(|| {
                    SfenError::InvalidPiecePlacement(format!(
                        "invalid piece '{}{}' in rank {}",
                        if promoted { "+" } else { "" },
                        c,
                        rank
                    ))
                })?;
                let sq = Square::new(9 - columns.min(9), rank).ok_or_else(overflow)?;
                cells[sq.index() as usize] = Some(piece);
                promoted = false;
                columns += 1;
            }
        }
        if promoted || columns != 9 {
            return Err(SfenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 9",
                rank, columns
            )));
        }
    }

    Ok(cells)
}

fn parse_hand(hand: &str) -> Result<Vec<(Piece, u8)>, SfenError> {
    if hand == "-" {
        return Ok(Vec::new());
    }

    let mut counts = Vec::new();
    let mut pending: Option<u32> = None;
    for c in hand.chars() {
        if let Some(digit) = c.to_digit(10) {
            let count = pending.unwrap_or(0) * 10 + digit;
            if count > PieceKind::Pawn.supply() as u32 {
                return Err(SfenError::InvalidHand(format!("count {} too large", count)));
            }
            pending = Some(count);
            continue;
        }
        let piece = Piece::from_sfen(c, false)
            .filter(|p| p.kind.is_droppable())
            .ok_or_else(|| SfenError::InvalidHand(format!("invalid piece '{}'", c)))?;
        let count = pending.take().unwrap_or(1);
        if count == 0 {
            return Err(SfenError::InvalidHand(format!("zero count for '{}'", c)));
        }
        counts.push((piece, count as u8));
    }

    if pending.is_some() || counts.is_empty() {
        return Err(SfenError::InvalidHand(hand.to_string()));
    }
    Ok(counts)
}
