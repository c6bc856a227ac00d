//! Legality filtering by make/test/unmake simulation.

use super::pseudo::{generate_pseudo_moves, push_board_moves, push_drops};
use super::{BitboardSet, CheckInfo, MoveList};
use crate::board::{apply_move, revert_move, Undo};
use crate::{Board, PieceStand};
use shogi_core::{Color, Move, MoveSource, PieceKind};
use tracing::trace;

/// A private copy of a position that moves are tried on and taken back.
struct Scratch {
    board: Board,
    stand: PieceStand,
    set: BitboardSet,
    /// Move buffers for opponent reply searches, one per nesting level.
    replies: Vec<MoveList>,
}

impl Scratch {
    fn new(board: &Board, stand: &PieceStand) -> Self {
        Scratch {
            board: board.clone(),
            stand: *stand,
            set: BitboardSet::from_board(board),
            replies: Vec::new(),
        }
    }

    fn apply(&mut self, mv: &Move) -> Undo {
        if let MoveSource::Board(from) = mv.from {
            self.set.remove(from, mv.piece);
        }
        let undo = apply_move(&mut self.board, &mut self.stand, mv);
        if let Some(captured) = undo.captured {
            self.set.remove(mv.to, captured);
        }
        self.set.put(mv.to, mv.piece_after());
        undo
    }

    fn revert(&mut self, mv: &Move, undo: Undo) {
        self.set.remove(mv.to, mv.piece_after());
        if let Some(captured) = undo.captured {
            self.set.put(mv.to, captured);
        }
        if let MoveSource::Board(from) = mv.from {
            self.set.put(from, mv.piece);
        }
        revert_move(&mut self.board, &mut self.stand, mv, undo);
    }

    fn pseudo_moves(&self, side: Color) -> MoveList {
        let mut moves = MoveList::new();
        self.fill_pseudo_moves(side, &mut moves);
        moves
    }

    fn fill_pseudo_moves(&self, side: Color, moves: &mut MoveList) {
        moves.clear();
        generate_pseudo_moves(&self.board, &self.stand, &self.set, side, moves);
    }
}

/// Returns why a queried move cannot describe a move of `side` in this
/// position at all, or `None` if it is well-formed.
pub(crate) fn degenerate_reason(
    board: &Board,
    stand: &PieceStand,
    side: Color,
    mv: &Move,
) -> Option<&'static str> {
    if mv.piece.color != side {
        return Some("moving piece belongs to the other side");
    }
    match mv.from {
        MoveSource::Board(from) => match board.get(from) {
            None => return Some("source square is empty"),
            Some(piece) if piece != mv.piece => return Some("source square holds another piece"),
            Some(_) => {}
        },
        MoveSource::Stand(color) => {
            if color != side {
                return Some("drop from the opponent's stand");
            }
            if !mv.piece.kind.is_droppable() {
                return Some("piece kind cannot be dropped");
            }
            if stand.count(side, mv.piece.kind) == 0 {
                return Some("piece is not in hand");
            }
            if board.get(mv.to).is_some() {
                return Some("drop onto an occupied square");
            }
        }
    }
    if mv.captured != board.get(mv.to) {
        return Some("captured piece does not match the destination");
    }
    None
}

/// Returns true if the position after `mv` has the king of the side that did
/// not move attacked by a pawn just dropped in front of it.
fn is_pawn_drop_check(set: &BitboardSet, mv: &Move) -> bool {
    if !mv.is_drop() || mv.piece.kind != PieceKind::Pawn {
        return false;
    }
    let color = mv.piece.color;
    let ahead = mv.to.offset(0, color.forward());
    ahead.is_some() && set.king_square(color.opposite()) == ahead
}

/// Runs both filter stages on one pseudo-legal move of `side`.
fn survives(scratch: &mut Scratch, info: &CheckInfo, side: Color, mv: &Move) -> bool {
    if !info.admits(mv) {
        trace!(%mv, "move does not answer check");
        return false;
    }

    let undo = scratch.apply(mv);
    let legal = if CheckInfo::analyze(&scratch.set, side).is_check() {
        trace!(%mv, "move leaves king attacked");
        false
    } else if is_pawn_drop_check(&scratch.set, mv) && !has_legal_reply(scratch, side.opposite()) {
        trace!(%mv, "pawn drop gives mate");
        false
    } else {
        true
    };
    scratch.revert(mv, undo);
    legal
}

/// Returns true if `side` has at least one legal move in the scratch position.
///
/// The reply list is borrowed from the scratch's buffer pool and handed back
/// afterward, so repeated searches reuse the same allocation.
fn has_legal_reply(scratch: &mut Scratch, side: Color) -> bool {
    let mut replies = scratch.replies.pop().unwrap_or_default();
    scratch.fill_pseudo_moves(side, &mut replies);
    let info = CheckInfo::analyze(&scratch.set, side);
    let found = replies
        .iter()
        .any(|reply| survives(scratch, &info, side, reply));
    scratch.replies.push(replies);
    found
}

/// Generates every legal move of `side`.
pub(crate) fn legal_moves(board: &Board, stand: &PieceStand, side: Color) -> MoveList {
    let mut scratch = Scratch::new(board, stand);
    let mut moves = scratch.pseudo_moves(side);
    let info = CheckInfo::analyze(&scratch.set, side);
    moves.retain(|mv| survives(&mut scratch, &info, side, mv));
    moves
}

/// Returns whether the non-promoting and promoting variants of a well-formed
/// queried move are legal, in that order.
pub(crate) fn legal_variants(
    board: &Board,
    stand: &PieceStand,
    side: Color,
    mv: &Move,
) -> [bool; 2] {
    let mut scratch = Scratch::new(board, stand);
    let mut candidates = MoveList::new();
    match mv.from {
        MoveSource::Board(from) => {
            push_board_moves(&scratch.board, &scratch.set, from, mv.piece, &mut candidates)
        }
        MoveSource::Stand(_) => push_drops(&scratch.set, side, mv.piece.kind, &mut candidates),
    }
    candidates.retain(|candidate| candidate.to == mv.to);

    let info = CheckInfo::analyze(&scratch.set, side);
    [false, true].map(|promote| {
        let variant = mv.with_promotion(promote);
        candidates.contains(&variant) && survives(&mut scratch, &info, side, &variant)
    })
}

/// Returns true if `mv`, promotion flag included, is legal for `side`.
pub(crate) fn legal_candidate(board: &Board, stand: &PieceStand, side: Color, mv: &Move) -> bool {
    degenerate_reason(board, stand, side, mv).is_none()
        && legal_variants(board, stand, side, mv)[usize::from(mv.promote)]
}
