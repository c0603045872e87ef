//! Chess rules and game-state engine.
//!
//! This crate provides:
//! - [`Board`] - 64 cells of optional pieces
//! - [`Position`] - board plus side to move, previous ply and move counters
//! - [`movegen`] - candidate moves per piece, the legality filter and perft
//! - [`Game`] - the state machine: legal move queries, move application,
//!   players' inventories, history and status
//! - [`RuleSet`] - trait the game drives its rule queries through
//! - [`GameSettings`] - draw rules and promotion default, loaded from TOML
//!
//! # Example
//!
//! ```
//! use chessboard_core::{Color, Square};
//! use chessboard_engine::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! assert_eq!(game.legal_moves(e2).len(), 2);
//!
//! for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.apply_uci(uci).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate(Color::White));
//! ```

mod board;
mod game;
pub mod movegen;
mod player;
mod position;
pub mod rules;
mod settings;
mod zobrist;

pub use board::Board;
pub use game::{Game, GameError};
pub use movegen::{
    candidate_moves, candidate_squares, is_king_attacked, is_square_attacked, legal_moves,
    legal_moves_from, make_move, MoveList,
};
pub use player::Player;
pub use position::Position;
pub use rules::{DrawReason, GameStatus, RuleSet, StandardChess};
pub use settings::{GameSettings, SettingsError};
pub use zobrist::{ZobristKeys, ZOBRIST};
