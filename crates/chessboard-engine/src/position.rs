//! Position: everything the move rules need to know about a moment in a game.

use chessboard_core::{
    CastlingRights, Color, Fen, FenError, Move, MoveFlag, Piece, PieceKind, Square,
};

use crate::zobrist::ZOBRIST;
use crate::Board;

/// Board plus side to move, the previous ply, and the move counters.
///
/// Castling rights are not stored: they follow from the `has_moved` flags of
/// kings and rooks. The en passant window is the previous ply itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// The ply that led here, if known.
    pub last_move: Option<Move>,

    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates a position with an empty board and White to move.
    pub fn empty() -> Self {
        Self::from_board(Board::empty(), Color::White)
    }

    /// Wraps a hand-built board. Counters start fresh and there is no
    /// previous ply.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Position {
            board,
            side_to_move,
            last_move: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// Creates a position from a FEN string.
    ///
    /// Kings and rooks count as unmoved only where the castling field grants
    /// a right that needs them; pawns count as unmoved on their starting
    /// rank. An en passant field becomes the double step that allowed it.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_fen_record(&Fen::parse(fen)?))
    }

    /// Builds a position from an already parsed FEN record.
    pub fn from_fen_record(fen: &Fen) -> Self {
        let mut board = Board::empty();
        for &(sq, kind, color) in &fen.placement {
            let unmoved = match kind {
                PieceKind::Pawn => sq.rank_index() == color.pawn_rank(),
                PieceKind::King => {
                    sq == king_home(color)
                        && (fen.castling.kingside(color) || fen.castling.queenside(color))
                }
                PieceKind::Rook => {
                    (sq == rook_home(color, true) && fen.castling.kingside(color))
                        || (sq == rook_home(color, false) && fen.castling.queenside(color))
                }
                _ => true,
            };
            let piece = Piece::new(kind, color);
            board.place(sq, if unmoved { piece } else { piece.moved() });
        }

        let last_move = fen
            .en_passant
            .and_then(|ep| double_push_through(&board, ep, fen.side_to_move.opposite()));

        Position {
            board,
            side_to_move: fen.side_to_move,
            last_move,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        }
    }

    /// Converts the position to a FEN record.
    pub fn to_fen_record(&self) -> Fen {
        Fen {
            placement: self
                .board
                .pieces()
                .map(|(sq, p)| (sq, p.kind, p.color))
                .collect(),
            side_to_move: self.side_to_move,
            castling: self.castling_rights(),
            en_passant: self.en_passant_square(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_fen_record().to_string()
    }

    /// Castling rights implied by unmoved kings and corner rooks.
    ///
    /// A right here means the pieces are in place; whether castling is
    /// playable now also depends on empty and unattacked squares.
    pub fn castling_rights(&self) -> CastlingRights {
        CastlingRights {
            white_kingside: self.castle_pieces_ready(Color::White, true),
            white_queenside: self.castle_pieces_ready(Color::White, false),
            black_kingside: self.castle_pieces_ready(Color::Black, true),
            black_queenside: self.castle_pieces_ready(Color::Black, false),
        }
    }

    /// Returns true if `color`'s king and the rook on the given wing are
    /// both on their home squares and unmoved.
    pub fn castle_pieces_ready(&self, color: Color, kingside: bool) -> bool {
        let unmoved = |sq: Square, kind: PieceKind| {
            matches!(
                self.board.piece_at(sq),
                Some(p) if p.kind == kind && p.color == color && !p.has_moved
            )
        };
        unmoved(king_home(color), PieceKind::King)
            && unmoved(rook_home(color, kingside), PieceKind::Rook)
    }

    /// The square skipped by a double step on the previous ply.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.last_move
            .filter(|m| m.is_double_push())
            .and_then(|m| m.from().offset(0, m.piece().color.pawn_direction()))
    }

    /// Computes the Zobrist key of this position from scratch.
    pub fn zobrist_hash(&self) -> u64 {
        let mut hash = 0u64;
        for (sq, piece) in self.board.pieces() {
            hash ^= ZOBRIST.piece_key(piece.kind, piece.color, sq);
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move;
        }
        let rights = self.castling_rights();
        for (i, set) in [
            rights.white_kingside,
            rights.white_queenside,
            rights.black_kingside,
            rights.black_queenside,
        ]
        .into_iter()
        .enumerate()
        {
            if set {
                hash ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(ep) = self.en_passant_square() {
            hash ^= ZOBRIST.en_passant_key(ep.file_index() as usize);
        }
        hash
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Home square of a side's king.
pub(crate) const fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

/// Home square of a side's rook on the given wing.
pub(crate) const fn rook_home(color: Color, kingside: bool) -> Square {
    match (color, kingside) {
        (Color::White, true) => Square::H1,
        (Color::White, false) => Square::A1,
        (Color::Black, true) => Square::H8,
        (Color::Black, false) => Square::A8,
    }
}

/// Reconstructs the double step by `mover` that skipped over `ep`, if the
/// board is consistent with one.
fn double_push_through(board: &Board, ep: Square, mover: Color) -> Option<Move> {
    let dir = mover.pawn_direction();
    let from = ep.offset(0, -dir)?;
    let to = ep.offset(0, dir)?;
    let pawn = board.piece_at(to)?;
    let consistent = pawn.kind == PieceKind::Pawn
        && pawn.color == mover
        && from.rank_index() == mover.pawn_rank()
        && board.is_empty(from)
        && board.is_empty(ep);
    consistent.then(|| {
        Move::new(
            from,
            to,
            Piece::new(PieceKind::Pawn, mover),
            None,
            MoveFlag::DoublePush,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), Fen::STARTPOS);
        assert_eq!(Position::from_fen(Fen::STARTPOS).unwrap(), pos);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn castling_field_sets_moved_flags() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let flag = |name: &str| pos.board.piece_at(sq(name)).unwrap().has_moved;

        assert!(!flag("e1"));
        assert!(!flag("h1"));
        assert!(flag("a1"));
        assert!(!flag("e8"));
        assert!(!flag("a8"));
        assert!(flag("h8"));
        assert_eq!(pos.castling_rights().to_string(), "Kq");
    }

    #[test]
    fn no_castling_field_marks_kings_moved() {
        let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1").unwrap();
        assert!(pos.board.piece_at(Square::E1).unwrap().has_moved);
        assert!(pos.castling_rights().is_empty());
        assert_eq!(
            pos.to_fen(),
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1"
        );
    }

    #[test]
    fn pawns_off_start_rank_have_moved() {
        let pos = Position::from_fen("4k3/8/8/8/4P3/8/3P4/4K3 w - - 0 1").unwrap();
        assert!(pos.board.piece_at(sq("e4")).unwrap().has_moved);
        assert!(!pos.board.piece_at(sq("d2")).unwrap().has_moved);
    }

    #[test]
    fn en_passant_field_becomes_last_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let pos = Position::from_fen(fen).unwrap();
        let last = pos.last_move.unwrap();
        assert_eq!(last.from(), sq("e2"));
        assert_eq!(last.to(), sq("e4"));
        assert!(last.is_double_push());
        assert_eq!(pos.en_passant_square(), Some(sq("e3")));
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn inconsistent_en_passant_field_is_dropped() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - e3 0 1").unwrap();
        assert_eq!(pos.last_move, None);
        assert_eq!(pos.en_passant_square(), None);
    }

    #[test]
    fn position_empty() {
        let pos = Position::empty();
        assert_eq!(pos.side_to_move, Color::White);
        assert!(pos.castling_rights().is_empty());
        assert_eq!(pos.en_passant_square(), None);
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert_eq!(pos.board.pieces().count(), 0);
    }

    #[test]
    fn zobrist_distinguishes_side_and_rights() {
        let white = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let black = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let no_rights = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();

        assert_ne!(white.zobrist_hash(), black.zobrist_hash());
        assert_ne!(white.zobrist_hash(), no_rights.zobrist_hash());
        assert_eq!(white.zobrist_hash(), white.clone().zobrist_hash());
    }

    #[test]
    fn zobrist_ignores_counters() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 17 40").unwrap();
        assert_eq!(a.zobrist_hash(), b.zobrist_hash());
    }
}
