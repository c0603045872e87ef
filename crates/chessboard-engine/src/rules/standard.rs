//! Standard chess rules implementation.

use super::RuleSet;
use crate::movegen::{self, is_king_attacked};
use crate::{MoveList, Position};
use chessboard_core::{Color, Move, PieceKind, Square};

/// Standard chess rules (FIDE).
///
/// Covers piece movement, castling, en passant, promotion, and the checks
/// needed to detect checkmate, stalemate and dead positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn generate_moves(&self, position: &Position) -> MoveList {
        movegen::legal_moves(position)
    }

    fn legal_moves_from(&self, position: &Position, from: Square) -> MoveList {
        movegen::legal_moves_from(position, from)
    }

    fn make_move(&self, position: &Position, m: Move) -> Position {
        movegen::make_move(position, m)
    }

    fn is_check(&self, position: &Position) -> bool {
        is_king_attacked(&position.board, position.side_to_move)
    }

    fn has_legal_move(&self, position: &Position) -> bool {
        movegen::has_legal_move(position)
    }

    /// K vs K, K+N vs K, K+B vs K, and any number of bishops all standing on
    /// squares of one colour.
    fn is_insufficient_material(&self, position: &Position) -> bool {
        let mut minors = [0usize; 2];
        let mut bishop_shades = [false; 2];

        for (sq, piece) in position.board.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => minors[piece.color.index()] += 1,
                PieceKind::Bishop => {
                    minors[piece.color.index()] += 1;
                    bishop_shades[usize::from(sq.is_dark())] = true;
                }
            }
        }

        let white = minors[Color::White.index()];
        let black = minors[Color::Black.index()];
        if white + black <= 1 {
            return true;
        }

        // only bishops left, all on one shade
        let bishops = position.board.count(PieceKind::Bishop, Color::White)
            + position.board.count(PieceKind::Bishop, Color::Black);
        bishops == white + black && !(bishop_shades[0] && bishop_shades[1])
    }
}
