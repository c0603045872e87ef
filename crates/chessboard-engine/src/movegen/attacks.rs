//! Attack reach for every piece kind.
//!
//! Reach is the set of squares a piece could capture on: pawns attack
//! diagonally forward only, kings attack their neighbours only (castling
//! never captures), and sliders stop at the first occupied square. Squares
//! held by the attacker's own side are never included.

use crate::Board;
use chessboard_core::{Color, PieceKind, Square};

/// (file, rank) steps of a knight.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// (file, rank) steps of a king.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Returns the squares attacked by the piece on `from` (empty if `from` is
/// empty).
pub fn attack_targets(board: &Board, from: Square) -> Vec<Square> {
    let mut targets = Vec::new();
    visit_attacks(board, from, &mut |sq| {
        targets.push(sq);
        false
    });
    targets
}

/// Returns true if the piece on `from` attacks `target`.
pub fn attacks_square(board: &Board, from: Square, target: Square) -> bool {
    visit_attacks(board, from, &mut |sq| sq == target)
}

/// Returns true if any piece of `by` attacks `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, _)| attacks_square(board, from, sq))
}

/// Returns true if the king of `color` is attacked. A side without a king is
/// never in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

/// Feeds each attacked square to `visit`, stopping as soon as it returns
/// true. Returns whether it stopped early.
fn visit_attacks<F>(board: &Board, from: Square, visit: &mut F) -> bool
where
    F: FnMut(Square) -> bool,
{
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => {
            let dir = color.pawn_direction();
            visit_leaps(board, from, color, &[(-1, dir), (1, dir)], visit)
        }
        PieceKind::Knight => visit_leaps(board, from, color, &KNIGHT_OFFSETS, visit),
        PieceKind::King => visit_leaps(board, from, color, &KING_OFFSETS, visit),
        PieceKind::Bishop => visit_rays(board, from, color, &DIAGONALS, visit),
        PieceKind::Rook => visit_rays(board, from, color, &ORTHOGONALS, visit),
        PieceKind::Queen => {
            visit_rays(board, from, color, &DIAGONALS, visit)
                || visit_rays(board, from, color, &ORTHOGONALS, visit)
        }
    }
}

fn visit_leaps<F>(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    visit: &mut F,
) -> bool
where
    F: FnMut(Square) -> bool,
{
    for &(df, dr) in offsets {
        if let Some(sq) = from.offset(df, dr) {
            if !board.is_occupied_by_color(sq, color) && visit(sq) {
                return true;
            }
        }
    }
    false
}

fn visit_rays<F>(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    visit: &mut F,
) -> bool
where
    F: FnMut(Square) -> bool,
{
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(sq) = current.offset(df, dr) {
            match board.piece_at(sq) {
                None => {
                    if visit(sq) {
                        return true;
                    }
                    current = sq;
                }
                Some(blocker) => {
                    if blocker.color != color && visit(sq) {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}
