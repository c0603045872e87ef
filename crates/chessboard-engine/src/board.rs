//! Mailbox board: 64 cells, each holding at most one piece.

use chessboard_core::{Color, Piece, PieceKind, Square};
use std::fmt;

/// Piece kinds on the back rank, a-file to h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces.
///
/// The board does not enforce chess rules. `place` overwrites whatever was
/// on the square, so keeping one piece per square (and one king per side)
/// is up to the caller.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Creates the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Restores the starting layout in place.
    pub fn reset(&mut self) {
        self.cells = [None; 64];
        for color in Color::BOTH {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as i8;
                if let Some(sq) = Square::A1.offset(file, color.back_rank() as i8) {
                    self.place(sq, Piece::new(*kind, color));
                }
                if let Some(sq) = Square::A1.offset(file, color.pawn_rank() as i8) {
                    self.place(sq, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    /// Puts a piece on a square, replacing any occupant.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.cells[sq.index() as usize] = Some(piece);
    }

    /// Takes the piece off a square.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    #[inline]
    pub fn is_occupied_by_color(&self, sq: Square, color: Color) -> bool {
        matches!(self.piece_at(sq), Some(p) if p.color == color)
    }

    /// Iterates over occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Number of pieces of a kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.kind == kind).count()
    }

    /// Square of the given side's king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Renders rank 8 at the top, with file letters and rank digits on the edges.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in (0..8i8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8i8 {
                let c = Square::A1
                    .offset(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, "{} ", c)?;
            }
            writeln!(f, "{}", rank + 1)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        write!(f, "{}", self)
    }
}
