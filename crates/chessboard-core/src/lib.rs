//! Core types for the chessboard engine.
//!
//! This crate provides the value types shared by the engine and its
//! consumers:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] records and [`UciMove`] coordinate requests
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{CastlingRights, Fen, FenError};
pub use mov::{Move, MoveFlag, UciMove};
pub use piece::{Piece, PieceKind};
pub use square::{File, InvalidSquare, Rank, Square};
