//! Candidate moves per piece kind, ignoring whether the mover's king ends up
//! in check.

use super::attacks::attack_targets;
use super::MoveList;
use crate::position::{king_home, rook_home};
use crate::Position;
use chessboard_core::{Color, Move, MoveFlag, Piece, PieceKind, Square};
use std::collections::BTreeSet;

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CastleGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastleGeometry {
    pub(crate) fn new(color: Color, kingside: bool) -> Self {
        let king_from = king_home(color);
        let (king_step, rook_step) = if kingside { (2, 1) } else { (-2, -1) };
        let shift = |df: i8| match king_from.offset(df, 0) {
            Some(sq) => sq,
            None => unreachable!("king home is on the e-file"),
        };
        CastleGeometry {
            king_from,
            king_to: shift(king_step),
            rook_from: rook_home(color, kingside),
            rook_to: shift(rook_step),
        }
    }

    /// Squares strictly between king and rook; all must be empty.
    pub(crate) fn between(&self) -> impl Iterator<Item = Square> {
        let rank = self.king_from.rank_index() as i16;
        let (lo, hi) = if self.king_from < self.rook_from {
            (self.king_from.file_index(), self.rook_from.file_index())
        } else {
            (self.rook_from.file_index(), self.king_from.file_index())
        };
        ((lo + 1)..hi).filter_map(move |file| Square::try_from_coords(file as i16, rank).ok())
    }

    /// Squares the king stands on or crosses; none may be attacked.
    pub(crate) fn king_path(&self) -> [Square; 3] {
        [self.king_from, self.rook_to, self.king_to]
    }
}

/// Returns the moves the piece on `from` could make, before removing those
/// that leave its own king attacked.
///
/// Castling is included when the king and rook are unmoved on their home
/// squares and nothing stands between them; the attacked-square conditions
/// are checked by the legality filter. An empty square yields no moves.
pub fn candidate_moves(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = position.board.piece_at(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, from, piece, &mut moves),
        PieceKind::King => {
            reach_moves(position, from, piece, &mut moves);
            castling_moves(position, from, piece, &mut moves);
        }
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            reach_moves(position, from, piece, &mut moves)
        }
    }
    moves
}

/// Destination squares of [`candidate_moves`].
pub fn candidate_squares(position: &Position, from: Square) -> BTreeSet<Square> {
    candidate_moves(position, from).destinations()
}

/// Moves onto every square the piece attacks.
fn reach_moves(position: &Position, from: Square, piece: Piece, moves: &mut MoveList) {
    for to in attack_targets(&position.board, from) {
        let captured = position.board.piece_at(to);
        moves.push(Move::new(from, to, piece, captured, MoveFlag::Normal));
    }
}

fn pawn_moves(position: &Position, from: Square, pawn: Piece, moves: &mut MoveList) {
    let board = &position.board;
    let dir = pawn.color.pawn_direction();

    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
        push_pawn_move(from, one, pawn, None, moves);

        let on_start = from.rank_index() == pawn.color.pawn_rank();
        if !pawn.has_moved && on_start {
            if let Some(two) = one.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
                moves.push(Move::new(from, two, pawn, None, MoveFlag::DoublePush));
            }
        }
    }

    for to in attack_targets(board, from) {
        if let Some(victim) = board.piece_at(to) {
            push_pawn_move(from, to, pawn, Some(victim), moves);
        }
    }

    if let Some(m) = en_passant_capture(position, from, pawn) {
        moves.push(m);
    }
}

/// Pushes a pawn move, expanding it into the four promotions when it
/// reaches the last rank.
fn push_pawn_move(
    from: Square,
    to: Square,
    pawn: Piece,
    captured: Option<Piece>,
    moves: &mut MoveList,
) {
    if to.rank_index() == pawn.color.promotion_rank() {
        for flag in PieceKind::PROMOTIONS
            .into_iter()
            .filter_map(MoveFlag::promote_to)
        {
            moves.push(Move::new(from, to, pawn, captured, flag));
        }
    } else {
        moves.push(Move::new(from, to, pawn, captured, MoveFlag::Normal));
    }
}

/// En passant is open only on the ply right after an enemy pawn's double
/// step landed beside this pawn.
fn en_passant_capture(position: &Position, from: Square, pawn: Piece) -> Option<Move> {
    let last = position.last_move.filter(|m| m.is_double_push())?;
    let passed = last.to();
    let beside = passed.rank_index() == from.rank_index()
        && passed.file_index().abs_diff(from.file_index()) == 1;
    if !beside || last.piece().color == pawn.color {
        return None;
    }

    let victim = position
        .board
        .piece_at(passed)
        .filter(|p| p.kind == PieceKind::Pawn && p.color != pawn.color)?;
    let to = passed
        .offset(0, pawn.color.pawn_direction())
        .filter(|&sq| position.board.is_empty(sq))?;
    Some(Move::new(from, to, pawn, Some(victim), MoveFlag::EnPassant))
}

fn castling_moves(position: &Position, from: Square, king: Piece, moves: &mut MoveList) {
    for kingside in [true, false] {
        let geometry = CastleGeometry::new(king.color, kingside);
        if from != geometry.king_from || !position.castle_pieces_ready(king.color, kingside) {
            continue;
        }
        if geometry.between().all(|sq| position.board.is_empty(sq)) {
            let flag = if kingside {
                MoveFlag::CastleKingside
            } else {
                MoveFlag::CastleQueenside
            };
            moves.push(Move::new(from, geometry.king_to, king, None, flag));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn squares(names: &[&str]) -> BTreeSet<Square> {
        names.iter().map(|n| sq(n)).collect()
    }

    #[test]
    fn startpos_pawn_and_knight() {
        let pos = Position::startpos();
        assert_eq!(candidate_squares(&pos, sq("e2")), squares(&["e3", "e4"]));
        assert_eq!(candidate_squares(&pos, sq("b1")), squares(&["a3", "c3"]));
        assert!(candidate_moves(&pos, sq("a1")).is_empty());
        assert!(candidate_moves(&pos, sq("e4")).is_empty());
    }

    #[test]
    fn double_step_needs_unmoved_pawn_and_clear_path() {
        let mut board = Board::standard();
        board.place(sq("d3"), Piece::new(PieceKind::Knight, Color::Black));
        board.place(sq("f4"), Piece::new(PieceKind::Knight, Color::Black));
        let moved = Piece::new(PieceKind::Pawn, Color::White).moved();
        board.place(sq("c2"), moved);
        let pos = Position::from_board(board, Color::White);

        // blocked in front
        assert!(!candidate_squares(&pos, sq("d2")).contains(&sq("d4")));
        // destination blocked
        assert_eq!(candidate_squares(&pos, sq("f2")), squares(&["f3"]));
        // already moved
        assert_eq!(candidate_squares(&pos, sq("c2")), squares(&["c3", "d3"]));
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let pos = Position::from_fen("4k3/8/8/3p1P2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(candidate_squares(&pos, sq("e4")), squares(&["d5", "e5"]));
    }

    #[test]
    fn black_pawns_move_down() {
        let pos = Position::startpos();
        assert_eq!(candidate_squares(&pos, sq("c7")), squares(&["c6", "c5"]));
    }

    #[test]
    fn promotion_expands_to_four_kinds() {
        let pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = candidate_moves(&pos, sq("a7"));
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.promotion().is_some()));
        let captures = moves.iter().filter(|m| m.is_capture()).count();
        assert_eq!(captures, 4);
    }

    #[test]
    fn en_passant_needs_fresh_double_step() {
        let fresh =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        let ep: Vec<Move> = candidate_moves(&fresh, sq("f5"))
            .into_iter()
            .filter(|m| m.is_en_passant())
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to(), sq("e6"));
        assert_eq!(ep[0].captured().map(|p| p.kind), Some(PieceKind::Pawn));

        let stale =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq - 0 3")
                .unwrap();
        assert!(!candidate_moves(&stale, sq("f5"))
            .iter()
            .any(|m| m.is_en_passant()));
    }

    #[test]
    fn castling_candidates_need_empty_between() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
        let castles: Vec<Move> = candidate_moves(&pos, Square::E1)
            .into_iter()
            .filter(|m| m.is_castle())
            .collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to(), Square::G1);
        assert_eq!(castles[0].flag(), MoveFlag::CastleKingside);
    }

    #[test]
    fn castle_geometry() {
        let g = CastleGeometry::new(Color::Black, false);
        assert_eq!(g.king_from, Square::E8);
        assert_eq!(g.king_to, Square::C8);
        assert_eq!(g.rook_from, Square::A8);
        assert_eq!(g.rook_to, Square::D8);
        assert_eq!(
            g.between().collect::<Vec<_>>(),
            vec![Square::B8, Square::C8, Square::D8]
        );
        assert_eq!(g.king_path(), [Square::E8, Square::D8, Square::C8]);

        let g = CastleGeometry::new(Color::White, true);
        assert_eq!(g.between().collect::<Vec<_>>(), vec![Square::F1, Square::G1]);
        assert_eq!(g.king_path(), [Square::E1, Square::F1, Square::G1]);
    }
}
