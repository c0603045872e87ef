//! Rule set abstraction and game status.
//!
//! [`Game`](crate::Game) never calls the move generator directly; every rule
//! query goes through a [`RuleSet`], with [`StandardChess`] as the one
//! implementation.

mod standard;

pub use standard::StandardChess;

use crate::{MoveList, Position};
use chessboard_core::{Color, Move, Square};
use std::fmt;

/// Status of a game after the last applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Play continues and the side to move is not in check.
    InProgress,
    /// The given side is in check but has a way out.
    Check(Color),
    /// The given side is in check with no legal move.
    Checkmate(Color),
    /// The side to move is not in check and has no legal move.
    Stalemate,
    /// Drawn by rule.
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true for checkmate, stalemate and draws.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate(_) | GameStatus::Stalemate | GameStatus::Draw(_)
        )
    }

    /// The side that won, if the game ended in checkmate.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(mated) => Some(mated.opposite()),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check(color) => write!(f, "{} is in check", color),
            GameStatus::Checkmate(color) => {
                write!(f, "checkmate, {} wins", color.opposite())
            }
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// Neither side can force checkmate.
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::InsufficientMaterial => "insufficient material",
        };
        f.write_str(text)
    }
}

/// Trait for implementing chess variants.
///
/// # Example
///
/// ```
/// use chessboard_engine::rules::RuleSet;
/// use chessboard_engine::StandardChess;
///
/// let position = StandardChess.initial_position();
/// let moves = StandardChess.generate_moves(&position);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the initial position for this variant.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the side to move.
    fn generate_moves(&self, position: &Position) -> MoveList;

    /// Generates the legal moves of the piece on `from`.
    fn legal_moves_from(&self, position: &Position, from: Square) -> MoveList;

    /// Returns true if the move is legal in the position.
    fn is_legal(&self, position: &Position, m: Move) -> bool {
        self.legal_moves_from(position, m.from()).contains(&m)
    }

    /// Makes a move on the position, returning the new position.
    ///
    /// The move is not checked; use [`is_legal`](RuleSet::is_legal) or
    /// [`try_make_move`](RuleSet::try_make_move) for untrusted input.
    fn make_move(&self, position: &Position, m: Move) -> Position;

    /// Attempts to make a move, returning `None` if illegal.
    fn try_make_move(&self, position: &Position, m: Move) -> Option<Position> {
        if self.is_legal(position, m) {
            Some(self.make_move(position, m))
        } else {
            None
        }
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Returns true if the side to move has at least one legal move.
    fn has_legal_move(&self, position: &Position) -> bool {
        !self.generate_moves(position).is_empty()
    }

    /// Returns true if neither side has sufficient material to checkmate.
    fn is_insufficient_material(&self, position: &Position) -> bool;
}
