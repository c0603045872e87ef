//! Legality filter and move application.

use super::attacks::{is_king_attacked, is_square_attacked};
use super::pieces::{candidate_moves, CastleGeometry};
use super::MoveList;
use crate::Position;
use chessboard_core::{Color, Move, MoveFlag, PieceKind, Square};

/// Returns the legal moves of the piece on `from`.
///
/// Only the side to move has legal moves; an empty square or an enemy piece
/// yields an empty list. Each candidate is played on a scratch copy and
/// dropped if the mover's king is attacked afterwards. Castling is also
/// dropped when any square the king stands on or crosses is attacked.
pub fn legal_moves_from(position: &Position, from: Square) -> MoveList {
    let us = position.side_to_move;
    if !position.board.is_occupied_by_color(from, us) {
        return MoveList::new();
    }

    let mut moves = candidate_moves(position, from);
    moves.retain(|m| {
        if m.is_castle() {
            let geometry = CastleGeometry::new(us, m.flag() == MoveFlag::CastleKingside);
            let path_attacked = geometry
                .king_path()
                .into_iter()
                .any(|sq| is_square_attacked(&position.board, sq, us.opposite()));
            if path_attacked {
                return false;
            }
        }
        let next = make_move(position, *m);
        !is_king_attacked(&next.board, us)
    });
    moves
}

/// Returns every legal move of the side to move.
pub fn legal_moves(position: &Position) -> MoveList {
    let origins: Vec<Square> = position
        .board
        .pieces_of(position.side_to_move)
        .map(|(sq, _)| sq)
        .collect();

    let mut moves = MoveList::new();
    for from in origins {
        moves.extend(legal_moves_from(position, from));
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    position
        .board
        .pieces_of(position.side_to_move)
        .any(|(sq, _)| !legal_moves_from(position, sq).is_empty())
}

/// Plays a move on a copy of the position and returns the copy.
///
/// The move is trusted: it should come from [`legal_moves_from`] or
/// [`candidate_moves`] for this position. The moved piece (and the castling
/// rook) are marked as moved, an en passant victim is taken off the square
/// behind the destination, and promotions swap the pawn's kind.
pub fn make_move(position: &Position, m: Move) -> Position {
    let mut next = position.clone();
    let mover = m.piece();
    let board = &mut next.board;

    board.remove(m.from());
    if m.is_en_passant() {
        if let Some(victim) = m.to().offset(0, -mover.color.pawn_direction()) {
            board.remove(victim);
        }
    }

    let landed = match m.promotion() {
        Some(kind) => mover.promoted(kind),
        None => mover,
    };
    board.place(m.to(), landed.moved());

    if m.is_castle() {
        let geometry = CastleGeometry::new(mover.color, m.flag() == MoveFlag::CastleKingside);
        if let Some(rook) = board.remove(geometry.rook_from) {
            board.place(geometry.rook_to, rook.moved());
        }
    }

    if mover.kind == PieceKind::Pawn || m.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if mover.color == Color::Black {
        next.fullmove_number += 1;
    }

    next.side_to_move = mover.color.opposite();
    next.last_move = Some(m);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessboard_core::Piece;
    use std::collections::BTreeSet;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn find(moves: &MoveList, from: &str, to: &str) -> Move {
        *moves
            .iter()
            .find(|m| m.from() == sq(from) && m.to() == sq(to))
            .unwrap_or_else(|| panic!("no move {}{}", from, to))
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let pos = Position::startpos();
        assert_eq!(legal_moves(&pos).len(), 20);
        assert!(has_legal_move(&pos));
    }

    #[test]
    fn opponent_pieces_have_no_moves() {
        let pos = Position::startpos();
        assert!(legal_moves_from(&pos, sq("e7")).is_empty());
        assert!(legal_moves_from(&pos, sq("e4")).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_leave_line() {
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(legal_moves_from(&pos, sq("e2")).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let pos = Position::from_fen("3r2k1/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let targets: BTreeSet<Square> = legal_moves_from(&pos, Square::E1).destinations();
        let expected: BTreeSet<Square> = ["e2", "f1", "f2"].iter().map(|n| sq(n)).collect();
        assert_eq!(targets, expected);
    }

    #[test]
    fn check_must_be_answered() {
        // rook on e8 checks; only the bishop can block on e3 or the king can step aside
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/3B4/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&pos);
        assert!(moves
            .iter()
            .all(|m| m.piece().kind == PieceKind::King || m.to() == sq("e3")));
        assert!(moves.iter().any(|m| m.to() == sq("e3")));
    }

    #[test]
    fn no_castling_through_attack() {
        let pos = Position::from_fen("r3k2r/pppp1ppp/8/4r3/8/8/PPPP1PPP/R3K2R w KQkq - 0 1")
            .unwrap();
        assert!(!legal_moves(&pos).iter().any(|m| m.is_castle()));

        // f1 attacked by bishop on c4
        let pos = Position::from_fen("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1").unwrap();
        assert!(!legal_moves(&pos).iter().any(|m| m.is_castle()));
    }

    #[test]
    fn no_castling_out_of_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/r3K2R w K - 0 1").unwrap();
        assert!(!legal_moves(&pos).iter().any(|m| m.is_castle()));
    }

    #[test]
    fn queenside_castle_allows_attacked_b_file() {
        // b1 is attacked but the king never crosses it
        let pos = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(legal_moves(&pos)
            .iter()
            .any(|m| m.flag() == MoveFlag::CastleQueenside));
    }

    #[test]
    fn make_move_double_push() {
        let pos = Position::startpos();
        let m = find(&legal_moves(&pos), "e2", "e4");
        let next = make_move(&pos, m);

        assert_eq!(next.side_to_move, Color::Black);
        assert!(next.board.is_empty(sq("e2")));
        assert!(next.board.piece_at(sq("e4")).unwrap().has_moved);
        assert_eq!(next.en_passant_square(), Some(sq("e3")));
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.fullmove_number, 1);
    }

    #[test]
    fn make_move_castles_rook() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 3 1").unwrap();
        let moves = legal_moves(&pos);
        let next = make_move(&pos, find(&moves, "e1", "c1"));

        assert_eq!(
            next.board.piece_at(sq("d1")),
            Some(Piece::new(PieceKind::Rook, Color::White).moved())
        );
        assert!(next.board.is_empty(Square::A1));
        assert!(next.board.piece_at(Square::C1).unwrap().has_moved);
        assert_eq!(next.halfmove_clock, 4);
        assert!(next.castling_rights().is_empty());
    }

    #[test]
    fn make_move_en_passant_removes_victim() {
        let pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        let m = find(&legal_moves(&pos), "f5", "e6");
        assert!(m.is_en_passant());

        let next = make_move(&pos, m);
        assert!(next.board.is_empty(sq("e5")));
        assert!(next.board.is_empty(sq("f5")));
        assert_eq!(
            next.board.piece_at(sq("e6")).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn make_move_promotes() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let m = *legal_moves(&pos)
            .iter()
            .find(|m| m.promotion() == Some(PieceKind::Knight))
            .unwrap();
        let next = make_move(&pos, m);
        assert_eq!(
            next.board.piece_at(sq("a8")).map(|p| p.kind),
            Some(PieceKind::Knight)
        );
    }

    #[test]
    fn en_passant_that_exposes_king_is_illegal() {
        // capturing e.p. would clear the fifth rank between the rook and the king
        let pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
        assert!(!legal_moves_from(&pos, sq("e5"))
            .iter()
            .any(|m| m.is_en_passant()));
    }
}
