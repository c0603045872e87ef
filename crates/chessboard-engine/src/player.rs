//! Per-side piece inventory.

use crate::Board;
use chessboard_core::{Color, Move, Piece, Square};
use std::collections::BTreeSet;

/// One side of the game: where its pieces stand and which ones it has lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    color: Color,
    army: BTreeSet<Square>,
    lost: Vec<Piece>,
}

impl Player {
    /// Builds the inventory of `color` from the pieces on `board`.
    pub fn from_board(color: Color, board: &Board) -> Self {
        Player {
            color,
            army: board.pieces_of(color).map(|(sq, _)| sq).collect(),
            lost: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Squares currently holding this side's pieces.
    pub fn army(&self) -> &BTreeSet<Square> {
        &self.army
    }

    /// Pieces captured from this side, oldest first.
    pub fn lost(&self) -> &[Piece] {
        &self.lost
    }

    /// Number of pieces still on the board.
    pub fn piece_count(&self) -> usize {
        self.army.len()
    }

    /// Follows a move played by this side: the mover and, when castling,
    /// the rook change squares.
    pub(crate) fn record_own_move(&mut self, m: Move, rook_shift: Option<(Square, Square)>) {
        self.army.remove(&m.from());
        self.army.insert(m.to());
        if let Some((rook_from, rook_to)) = rook_shift {
            self.army.remove(&rook_from);
            self.army.insert(rook_to);
        }
    }

    /// Removes the piece taken from `sq`.
    pub(crate) fn record_loss(&mut self, sq: Square, piece: Piece) {
        self.army.remove(&sq);
        self.lost.push(piece);
    }
}
