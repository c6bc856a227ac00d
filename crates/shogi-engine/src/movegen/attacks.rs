//! Movement patterns and attack lookup for all piece kinds.
//!
//! Patterns are written from Black's point of view, where "forward" is toward
//! rank 1. White's patterns are the same offsets rotated half a turn.

use super::BitboardSet;
use crate::Bitboard;
use shogi_core::{Color, Piece, PieceKind, Square};

/// A (file delta, rank delta) pair.
pub type Offset = (i8, i8);

/// How a piece kind moves: single steps plus unbounded slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementPattern {
    /// Offsets reachable in one step.
    pub steps: &'static [Offset],
    /// Directions the piece slides along until blocked.
    pub slides: &'static [Offset],
}

const NONE: [Offset; 0] = [];
const PAWN: [Offset; 1] = [(0, -1)];
const KNIGHT: [Offset; 2] = [(1, -2), (-1, -2)];
const SILVER: [Offset; 5] = [(1, -1), (0, -1), (-1, -1), (1, 1), (-1, 1)];
const GOLD: [Offset; 6] = [(1, -1), (0, -1), (-1, -1), (1, 0), (-1, 0), (0, 1)];
const KING: [Offset; 8] = [
    (1, -1),
    (0, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];
const ORTHOGONAL: [Offset; 4] = [(0, -1), (1, 0), (-1, 0), (0, 1)];
const DIAGONAL: [Offset; 4] = [(1, -1), (-1, -1), (1, 1), (-1, 1)];

const fn pattern(steps: &'static [Offset], slides: &'static [Offset]) -> MovementPattern {
    MovementPattern { steps, slides }
}

/// Movement patterns indexed by [`PieceKind::index`].
pub const PATTERNS: [MovementPattern; PieceKind::COUNT] = [
    pattern(&PAWN, &NONE),           // Pawn
    pattern(&NONE, &PAWN),           // Lance
    pattern(&KNIGHT, &NONE),         // Knight
    pattern(&SILVER, &NONE),         // Silver
    pattern(&GOLD, &NONE),           // Gold
    pattern(&NONE, &DIAGONAL),       // Bishop
    pattern(&NONE, &ORTHOGONAL),     // Rook
    pattern(&KING, &NONE),           // King
    pattern(&GOLD, &NONE),           // ProPawn
    pattern(&GOLD, &NONE),           // ProLance
    pattern(&GOLD, &NONE),           // ProKnight
    pattern(&GOLD, &NONE),           // ProSilver
    pattern(&ORTHOGONAL, &DIAGONAL), // Horse
    pattern(&DIAGONAL, &ORTHOGONAL), // Dragon
];

/// Precomputed step attacks [color][kind][square].
static STEP_ATTACKS: [[[Bitboard; Square::COUNT]; PieceKind::COUNT]; 2] = compute_step_attacks();

/// Returns the movement pattern of `kind`, from Black's point of view.
#[inline]
pub fn movement_pattern(kind: PieceKind) -> &'static MovementPattern {
    &PATTERNS[kind.index()]
}

/// Orients a Black-relative offset for `color`.
#[inline]
pub const fn orient(color: Color, (file_delta, rank_delta): Offset) -> Offset {
    match color {
        Color::Black => (file_delta, rank_delta),
        Color::White => (-file_delta, -rank_delta),
    }
}

/// Returns the squares `piece` reaches by single steps from `sq`.
#[inline]
pub fn step_attacks(piece: Piece, sq: Square) -> Bitboard {
    STEP_ATTACKS[piece.color.index()][piece.kind.index()][sq.index() as usize]
}

/// Returns the squares `piece` slides to from `sq`.
///
/// Each ray stops at the first occupied square, which is included.
pub fn slide_attacks(piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &offset in movement_pattern(piece.kind).slides {
        let (file_delta, rank_delta) = orient(piece.color, offset);
        let mut current = sq;
        while let Some(next) = current.offset(file_delta, rank_delta) {
            attacks.set(next);
            if occupied.contains(next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

/// Returns every square `piece` on `sq` attacks given the board occupancy.
#[inline]
pub fn attacks(piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
    let steps = step_attacks(piece, sq);
    if piece.kind.is_slider() {
        steps | slide_attacks(piece, sq, occupied)
    } else {
        steps
    }
}

/// Returns the squares of `by`'s pieces that attack `sq`.
///
/// A piece of kind K attacks `sq` exactly when a piece of kind K belonging to
/// the other side, standing on `sq`, would attack it.
pub fn attackers_to(set: &BitboardSet, sq: Square, by: Color) -> Bitboard {
    let occupied = set.occupied();
    let mut attackers = Bitboard::EMPTY;
    for kind in PieceKind::ALL {
        let candidates = set.pieces(by, kind);
        if candidates.is_empty() {
            continue;
        }
        let mirror = Piece::new(kind, by.opposite());
        attackers |= attacks(mirror, sq, occupied) & candidates;
    }
    attackers
}

/// Returns true if any of `by`'s pieces attacks `sq`.
#[inline]
pub fn is_square_attacked(set: &BitboardSet, sq: Square, by: Color) -> bool {
    attackers_to(set, sq, by).is_not_empty()
}

/// Returns the squares strictly between `a` and `b`.
///
/// Empty unless the two squares share a file, a rank or a diagonal.
pub fn between(a: Square, b: Square) -> Bitboard {
    let file_delta = b.file() as i8 - a.file() as i8;
    let rank_delta = b.rank() as i8 - a.rank() as i8;
    let aligned = file_delta == 0 || rank_delta == 0 || file_delta.abs() == rank_delta.abs();
    if a == b || !aligned {
        return Bitboard::EMPTY;
    }

    let step = (file_delta.signum(), rank_delta.signum());
    let mut squares = Bitboard::EMPTY;
    let mut current = a;
    while let Some(next) = current.offset(step.0, step.1) {
        if next == b {
            break;
        }
        squares.set(next);
        current = next;
    }
    squares
}

/// Computes step attacks for every color, kind and square at compile time.
const fn compute_step_attacks() -> [[[Bitboard; Square::COUNT]; PieceKind::COUNT]; 2] {
    let mut table = [[[Bitboard::EMPTY; Square::COUNT]; PieceKind::COUNT]; 2];
    let colors = [Color::Black, Color::White];

    let mut c = 0;
    while c < 2 {
        let mut kind = 0;
        while kind < PieceKind::COUNT {
            let steps = PATTERNS[kind].steps;
            let mut index = 0u8;
            while (index as usize) < Square::COUNT {
                if let Some(sq) = Square::from_index(index) {
                    let mut bits = 0u128;
                    let mut i = 0;
                    while i < steps.len() {
                        let (file_delta, rank_delta) = orient(colors[c], steps[i]);
                        if let Some(target) = sq.offset(file_delta, rank_delta) {
                            bits |= 1u128 << target.index();
                        }
                        i += 1;
                    }
                    table[c][kind][index as usize] = Bitboard(bits);
                }
                index += 1;
            }
            kind += 1;
        }
        c += 1;
    }

    table
}
