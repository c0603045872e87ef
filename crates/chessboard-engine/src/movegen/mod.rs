//! Move generation.
//!
//! Moves are produced in two stages. [`candidate_moves`] lists what a piece
//! could do from its movement pattern alone; [`legal_moves_from`] drops the
//! candidates that would leave the mover's own king attacked.

mod attacks;
mod legal;
mod pieces;
pub mod perft;

use chessboard_core::{Move, Square};
use std::collections::BTreeSet;

pub use attacks::{attack_targets, attacks_square, is_king_attacked, is_square_attacked};
pub use legal::{has_legal_move, legal_moves, legal_moves_from, make_move};
pub use pieces::{candidate_moves, candidate_squares};

pub(crate) use pieces::CastleGeometry;

/// A list of moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }

    /// Returns true if the exact move is in the list.
    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    /// The set of destination squares. Promotions to different pieces
    /// collapse into one square.
    pub fn destinations(&self) -> BTreeSet<Square> {
        self.moves.iter().map(|m| m.to()).collect()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl Extend<Move> for MoveList {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        self.moves.extend(iter);
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessboard_core::{Color, MoveFlag, Piece, PieceKind};

    fn pawn_push(from: Square, to: Square) -> Move {
        Move::new(
            from,
            to,
            Piece::new(PieceKind::Pawn, Color::White),
            None,
            MoveFlag::Normal,
        )
    }

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn movelist_push_and_index() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = pawn_push(sq("e2"), sq("e3"));
        let m2 = pawn_push(sq("d2"), sq("d3"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(&m2));
    }

    #[test]
    fn movelist_default_is_empty() {
        let mut list = MoveList::default();
        assert!(list.is_empty());
        list.push(pawn_push(sq("e2"), sq("e3")));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn movelist_retain() {
        let mut list: MoveList = [
            pawn_push(sq("e2"), sq("e3")),
            pawn_push(sq("e3"), sq("e4")),
            pawn_push(sq("d2"), sq("d3")),
        ]
        .into_iter()
        .collect();

        list.retain(|m| m.from().file_index() == 4);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn destinations_collapse_promotions() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let list: MoveList = PieceKind::PROMOTIONS
            .into_iter()
            .filter_map(MoveFlag::promote_to)
            .map(|flag| Move::new(sq("a7"), sq("a8"), pawn, None, flag))
            .collect();

        assert_eq!(list.len(), 4);
        assert_eq!(list.destinations().into_iter().collect::<Vec<_>>(), vec![sq("a8")]);
    }
}
