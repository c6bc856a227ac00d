//! Move legality queries.
//!
//! [`MoveValidator`] answers the three questions a game front end asks: which
//! moves are legal, whether a particular move is legal (and with which
//! promotion choices), and how many pieces are giving check.

use serde::{Deserialize, Serialize};
use shogi_core::{Color, Move};
use tracing::debug;

use crate::movegen::{self, BitboardSet, CheckInfo, MoveList};
use crate::sanity::{self, SanityOptions, StructuralError};
use crate::{Board, PieceStand, Position};

/// Which promotion variants of a queried move are legal.
///
/// Both flags false means the move is illegal. Both true means the player has
/// to choose whether to promote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LegalMoveStatus {
    pub non_promoting_move_exists: bool,
    pub promoting_move_exists: bool,
}

impl LegalMoveStatus {
    /// Neither variant is legal.
    pub const ILLEGAL: LegalMoveStatus = LegalMoveStatus {
        non_promoting_move_exists: false,
        promoting_move_exists: false,
    };

    /// Returns true if at least one variant is legal.
    #[inline]
    pub const fn is_legal(self) -> bool {
        self.non_promoting_move_exists || self.promoting_move_exists
    }

    /// Returns true if both variants are legal.
    #[inline]
    pub const fn requires_choice(self) -> bool {
        self.non_promoting_move_exists && self.promoting_move_exists
    }

    /// Returns true if the move is legal only as a promotion.
    #[inline]
    pub const fn promotion_is_mandatory(self) -> bool {
        self.promoting_move_exists && !self.non_promoting_move_exists
    }
}

/// Stateless legality oracle over board and piece-stand snapshots.
///
/// Every query builds its own working copy of the position, so a validator
/// can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveValidator {
    options: SanityOptions,
}

impl MoveValidator {
    /// Creates a validator with the default sanity options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator that checks positions with `options`.
    pub fn with_options(options: SanityOptions) -> Self {
        MoveValidator { options }
    }

    /// Returns the sanity options used by [`validate_position`](Self::validate_position).
    pub fn options(&self) -> &SanityOptions {
        &self.options
    }

    /// Checks whether `mv` is legal for `side`, trying it both without and
    /// with promotion. The promotion flag of `mv` itself is ignored.
    ///
    /// Queries that cannot describe a move in this position (a piece of the
    /// wrong color, a source square that does not hold the stated piece, a
    /// capture that does not match the destination, a drop of a piece not in
    /// hand) are illegal.
    pub fn check_move_legality(
        &self,
        side: Color,
        board: &Board,
        stand: &PieceStand,
        mv: &Move,
    ) -> LegalMoveStatus {
        if let Some(reason) = movegen::degenerate_reason(board, stand, side, mv) {
            debug!(%mv, ?side, reason, "rejecting malformed legality query");
            return LegalMoveStatus::ILLEGAL;
        }

        let [non_promoting, promoting] = movegen::legal_variants(board, stand, side, mv);
        LegalMoveStatus {
            non_promoting_move_exists: non_promoting,
            promoting_move_exists: promoting,
        }
    }

    /// Returns every legal move of `side`.
    ///
    /// Promoting and non-promoting variants are listed as separate moves.
    pub fn enumerate_legal_moves(
        &self,
        side: Color,
        board: &Board,
        stand: &PieceStand,
    ) -> MoveList {
        movegen::legal_moves(board, stand, side)
    }

    /// Returns the number of enemy pieces attacking `side`'s king.
    ///
    /// A side without a king is never in check.
    pub fn check_count(&self, side: Color, board: &Board) -> u32 {
        let set = BitboardSet::from_board(board);
        CheckInfo::analyze(&set, side).count()
    }

    /// Returns true if `side` is in check and has no legal move.
    pub fn is_checkmate(&self, side: Color, board: &Board, stand: &PieceStand) -> bool {
        self.check_count(side, board) > 0
            && self.enumerate_legal_moves(side, board, stand).is_empty()
    }

    /// Checks the structural soundness of a position with this validator's options.
    pub fn validate_position(
        &self,
        board: &Board,
        stand: &PieceStand,
    ) -> Result<(), StructuralError> {
        sanity::validate_position_with(board, stand, &self.options)
    }

    /// Checks a move against a whole [`Position`], using its side to move.
    pub fn check_position_move(&self, position: &Position, mv: &Move) -> LegalMoveStatus {
        self.check_move_legality(position.side_to_move, &position.board, &position.stand, mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shogi_core::{MoveSource, Piece, PieceKind, Square};

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn status(sfen: &str, from: Square, to: Square) -> LegalMoveStatus {
        let position = Position::from_sfen(sfen).unwrap();
        let piece = position.board.get(from).unwrap();
        let captured = position.board.get(to);
        let mv = Move::board(from, to, piece, captured, false);
        MoveValidator::new().check_position_move(&position, &mv)
    }

    fn drop_status(sfen: &str, kind: PieceKind, to: Square) -> LegalMoveStatus {
        let position = Position::from_sfen(sfen).unwrap();
        let mv = Move::drop(to, Piece::new(kind, position.side_to_move));
        MoveValidator::new().check_position_move(&position, &mv)
    }

    const BOTH: LegalMoveStatus = LegalMoveStatus {
        non_promoting_move_exists: true,
        promoting_move_exists: true,
    };
    const PLAIN: LegalMoveStatus = LegalMoveStatus {
        non_promoting_move_exists: true,
        promoting_move_exists: false,
    };
    const PROMOTE_ONLY: LegalMoveStatus = LegalMoveStatus {
        non_promoting_move_exists: false,
        promoting_move_exists: true,
    };

    #[test]
    fn status_helpers() {
        assert!(!LegalMoveStatus::ILLEGAL.is_legal());
        assert!(BOTH.requires_choice());
        assert!(PROMOTE_ONLY.promotion_is_mandatory());
        assert!(PLAIN.is_legal() && !PLAIN.requires_choice());
        assert_eq!(LegalMoveStatus::default(), LegalMoveStatus::ILLEGAL);
    }

    #[test]
    fn white_has_thirty_moves_at_start() {
        let start = Position::startpos();
        let validator = MoveValidator::new();
        let moves = validator.enumerate_legal_moves(Color::White, &start.board, &start.stand);
        assert_eq!(moves.len(), 30);
    }

    #[test]
    fn pawn_promotion_choices() {
        let last_rank = "8k/4P4/9/9/9/9/9/9/4K4 b - 1";
        assert_eq!(status(last_rank, sq(5, 2), sq(5, 1)), PROMOTE_ONLY);
        let zone_edge = "8k/9/9/4P4/9/9/9/9/4K4 b - 1";
        assert_eq!(status(zone_edge, sq(5, 4), sq(5, 3)), BOTH);
        let outside = "8k/9/9/9/4P4/9/9/9/4K4 b - 1";
        assert_eq!(status(outside, sq(5, 5), sq(5, 4)), PLAIN);
    }

    #[test]
    fn knight_must_promote_on_far_two_ranks() {
        let near = "8k/9/9/4N4/9/9/9/9/4K4 b - 1";
        assert_eq!(status(near, sq(5, 4), sq(4, 2)), PROMOTE_ONLY);
        let far = "8k/9/9/9/4N4/9/9/9/4K4 b - 1";
        assert_eq!(status(far, sq(5, 5), sq(6, 3)), BOTH);
        assert_eq!(status(far, sq(5, 5), sq(5, 3)), LegalMoveStatus::ILLEGAL);
    }

    #[test]
    fn lance_promotion() {
        let sfen = "8k/9/9/9/9/9/9/9/L3K4 b - 1";
        assert_eq!(status(sfen, sq(9, 9), sq(9, 1)), PROMOTE_ONLY);
        assert_eq!(status(sfen, sq(9, 9), sq(9, 2)), BOTH);
        assert_eq!(status(sfen, sq(9, 9), sq(9, 4)), PLAIN);
    }

    #[test]
    fn silver_leaving_zone_may_promote() {
        let leaving = "8k/9/4S4/9/9/9/9/9/4K4 b - 1";
        assert_eq!(status(leaving, sq(5, 3), sq(4, 4)), BOTH);
        let outside = "8k/9/9/9/4S4/9/9/9/4K4 b - 1";
        assert_eq!(status(outside, sq(5, 5), sq(5, 4)), PLAIN);
    }

    #[test]
    fn gold_and_promoted_pieces_never_promote() {
        let gold = "8k/9/9/4G4/9/9/9/9/4K4 b - 1";
        assert_eq!(status(gold, sq(5, 4), sq(5, 3)), PLAIN);
        let dragon = "8k/9/9/4+R4/9/9/9/9/4K4 b - 1";
        assert_eq!(status(dragon, sq(5, 4), sq(5, 2)), PLAIN);
        assert_eq!(status(dragon, sq(5, 4), sq(4, 3)), PLAIN);
    }

    #[test]
    fn white_pawn_promotes_on_rank_i() {
        let last_rank = "4k4/9/9/9/9/9/9/4p4/K8 w - 1";
        assert_eq!(status(last_rank, sq(5, 8), sq(5, 9)), PROMOTE_ONLY);
        let in_zone = "4k4/9/9/9/9/9/4p4/9/K8 w - 1";
        assert_eq!(status(in_zone, sq(5, 7), sq(5, 8)), BOTH);
    }

    #[test]
    fn piece_movement_cases() {
        let sfen = "4k4/9/9/9/4S4/9/9/9/4K4 b - 1";
        assert!(status(sfen, sq(5, 5), sq(4, 4)).is_legal());
        assert!(status(sfen, sq(5, 5), sq(6, 6)).is_legal());
        assert!(!status(sfen, sq(5, 5), sq(5, 6)).is_legal());
        assert!(!status(sfen, sq(5, 5), sq(4, 5)).is_legal());

        let sfen = "4k4/9/9/9/4G4/9/9/9/4K4 b - 1";
        assert!(status(sfen, sq(5, 5), sq(5, 6)).is_legal());
        assert!(status(sfen, sq(5, 5), sq(4, 5)).is_legal());
        assert!(!status(sfen, sq(5, 5), sq(4, 6)).is_legal());

        let sfen = "4k4/9/9/9/4B4/9/9/9/4K4 b - 1";
        assert!(status(sfen, sq(5, 5), sq(1, 1)).is_legal());
        assert!(status(sfen, sq(5, 5), sq(9, 9)).is_legal());
        assert!(!status(sfen, sq(5, 5), sq(5, 4)).is_legal());

        let sfen = "4k4/9/9/9/4+B4/9/9/9/4K4 b - 1";
        assert!(status(sfen, sq(5, 5), sq(5, 4)).is_legal());
        assert!(!status(sfen, sq(5, 5), sq(5, 3)).is_legal());

        let sfen = "4k4/9/9/9/4R4/9/9/9/4K4 b - 1";
        assert!(status(sfen, sq(5, 5), sq(5, 2)).is_legal());
        assert!(status(sfen, sq(5, 5), sq(1, 5)).is_legal());
        assert!(!status(sfen, sq(5, 5), sq(5, 9)).is_legal());

        let sfen = "4k4/9/9/9/4+R4/9/9/9/4K4 b - 1";
        assert!(status(sfen, sq(5, 5), sq(4, 4)).is_legal());
        assert!(!status(sfen, sq(5, 5), sq(3, 3)).is_legal());
    }

    #[test]
    fn drop_restrictions() {
        let sfen = "4k4/9/9/9/9/9/9/9/4K4 b PLN 1";
        assert!(!drop_status(sfen, PieceKind::Pawn, sq(3, 1)).is_legal());
        assert!(!drop_status(sfen, PieceKind::Lance, sq(3, 1)).is_legal());
        assert!(!drop_status(sfen, PieceKind::Knight, sq(3, 1)).is_legal());
        assert!(!drop_status(sfen, PieceKind::Knight, sq(3, 2)).is_legal());
        assert_eq!(drop_status(sfen, PieceKind::Knight, sq(3, 3)), PLAIN);
        assert_eq!(drop_status(sfen, PieceKind::Lance, sq(3, 2)), PLAIN);
        assert!(!drop_status(sfen, PieceKind::Gold, sq(3, 3)).is_legal());
        assert!(!drop_status(sfen, PieceKind::Pawn, sq(5, 9)).is_legal());
    }

    #[test]
    fn degenerate_queries_are_illegal() {
        let start = Position::startpos();
        let validator = MoveValidator::new();
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);

        let mine = Move::board(sq(7, 7), sq(7, 6), pawn, None, false);
        let status = validator.check_move_legality(Color::White, &start.board, &start.stand, &mine);
        assert_eq!(status, LegalMoveStatus::ILLEGAL);

        let king_drop = Move {
            from: MoveSource::Stand(Color::Black),
            to: sq(5, 5),
            piece: Piece::new(PieceKind::King, Color::Black),
            captured: None,
            promote: false,
        };
        assert!(!validator.check_position_move(&start, &king_drop).is_legal());

        let promoted_drop = Move::drop(sq(5, 5), Piece::new(PieceKind::ProPawn, Color::Black));
        assert!(!validator.check_position_move(&start, &promoted_drop).is_legal());

        let phantom_capture = Move::board(sq(7, 7), sq(7, 6), pawn, Some(pawn), false);
        assert!(!validator.check_position_move(&start, &phantom_capture).is_legal());

        let king = Piece::new(PieceKind::King, Color::Black);
        let gold = Piece::new(PieceKind::Gold, Color::Black);
        let own_capture = Move::board(sq(5, 9), sq(6, 9), king, Some(gold), false);
        assert!(!validator.check_position_move(&start, &own_capture).is_legal());
    }

    #[test]
    fn promotion_flag_of_query_is_ignored() {
        let position = Position::from_sfen("8k/9/9/4P4/9/9/9/9/4K4 b - 1").unwrap();
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let plain = Move::board(sq(5, 4), sq(5, 3), pawn, None, false);
        let validator = MoveValidator::new();
        assert_eq!(
            validator.check_position_move(&position, &plain),
            validator.check_position_move(&position, &plain.with_promotion(true))
        );
    }

    #[test]
    fn queries_do_not_change_inputs() {
        let position = Position::from_sfen("4r3k/9/9/9/9/9/9/9/3GK4 b P 1").unwrap();
        let snapshot = position.clone();
        let validator = MoveValidator::new();
        let (board, stand) = (&position.board, &position.stand);
        let first = validator.enumerate_legal_moves(Color::Black, board, stand);
        let second = validator.enumerate_legal_moves(Color::Black, board, stand);
        assert_eq!(first, second);
        assert_eq!(position, snapshot);
    }

    #[test]
    fn check_counts() {
        let validator = MoveValidator::new();
        let single = Position::from_sfen("4r3k/9/9/9/9/9/9/9/3GK4 b - 1").unwrap();
        assert_eq!(validator.check_count(Color::Black, &single.board), 1);
        assert_eq!(validator.check_count(Color::White, &single.board), 0);
        let double = Position::from_sfen("4r3k/9/9/9/8b/9/9/9/3GK4 b - 1").unwrap();
        assert_eq!(validator.check_count(Color::Black, &double.board), 2);
        assert_eq!(validator.check_count(Color::Black, &Board::empty()), 0);
    }

    #[test]
    fn checkmate_detection() {
        let validator = MoveValidator::new();
        let mate = Position::from_sfen("7Gk/7R1/9/9/9/9/9/9/K8 w - 1").unwrap();
        assert!(validator.is_checkmate(Color::White, &mate.board, &mate.stand));
        let start = Position::startpos();
        assert!(!validator.is_checkmate(Color::Black, &start.board, &start.stand));
    }

    #[test]
    fn validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<MoveValidator>();
    }

    #[test]
    fn validate_position_uses_configured_options() {
        let doubled = Position::from_sfen("4k4/9/9/4P4/9/4P4/9/9/4K4 b - 1").unwrap();
        let strict = MoveValidator::new();
        assert_eq!(
            strict.validate_position(&doubled.board, &doubled.stand),
            Err(StructuralError::DoublePawn {
                color: Color::Black,
                file: 5
            })
        );

        let lenient = MoveValidator::with_options(SanityOptions {
            double_pawn: false,
            ..SanityOptions::default()
        });
        assert!(!lenient.options().double_pawn);
        assert!(lenient.options().dead_pieces);
        assert_eq!(lenient.validate_position(&doubled.board, &doubled.stand), Ok(()));

        // King count is checked whatever the options say.
        let two_kings = Position::from_sfen("4k4/9/9/9/9/9/9/9/3KK4 b - 1").unwrap();
        assert!(matches!(
            lenient.validate_position(&two_kings.board, &two_kings.stand),
            Err(StructuralError::KingCount {
                color: Color::Black,
                count: 2
            })
        ));
    }
}
