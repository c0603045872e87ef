//! Game state machine.
//!
//! [`Game`] owns the current position, both players' inventories, the move
//! history and the status. [`Game::apply_move`] is the only way to advance
//! it; every other method is a query.

use crate::movegen::CastleGeometry;
use crate::rules::{DrawReason, GameStatus, RuleSet, StandardChess};
use crate::{Board, GameSettings, MoveList, Player, Position};
use chessboard_core::{
    Color, FenError, InvalidSquare, Move, MoveFlag, PieceKind, Square, UciMove,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not among the legal moves of the position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// The text is not a UCI move.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
    #[error(transparent)]
    InvalidSquare(#[from] InvalidSquare),
    #[error(transparent)]
    InvalidFen(#[from] FenError),
    /// The position cannot occur in a game.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// A chess game in progress or finished.
///
/// Cloning a `Game` gives an independent copy; lookahead and "what if"
/// queries should play on a clone.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    start_position: Position,
    history: Vec<Move>,
    players: [Player; 2],
    /// Zobrist keys of every position reached, starting position included.
    repetitions: Vec<u64>,
    status: GameStatus,
    settings: GameSettings,
    rules: StandardChess,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard starting position with default
    /// settings.
    pub fn new() -> Self {
        Self::with_settings(GameSettings::default())
    }

    /// Creates a new game from the standard starting position.
    pub fn with_settings(settings: GameSettings) -> Self {
        let rules = StandardChess;
        Self::build(rules.initial_position(), settings)
    }

    /// Creates a game from a custom position with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPosition`] unless each side has exactly
    /// one king and the side that just moved is not left in check.
    pub fn from_position(position: Position) -> Result<Self, GameError> {
        Self::from_position_with_settings(position, GameSettings::default())
    }

    /// Creates a game from a custom position.
    pub fn from_position_with_settings(
        position: Position,
        settings: GameSettings,
    ) -> Result<Self, GameError> {
        validate_position(&position)?;
        Ok(Self::build(position, settings))
    }

    /// Creates a game from a FEN string with default settings.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Self::from_fen_with_settings(fen, GameSettings::default())
    }

    /// Creates a game from a FEN string.
    pub fn from_fen_with_settings(fen: &str, settings: GameSettings) -> Result<Self, GameError> {
        let position = Position::from_fen(fen)?;
        Self::from_position_with_settings(position, settings)
    }

    fn build(position: Position, settings: GameSettings) -> Self {
        let players = [
            Player::from_board(Color::White, &position.board),
            Player::from_board(Color::Black, &position.board),
        ];
        let mut game = Game {
            repetitions: vec![position.zobrist_hash()],
            start_position: position.clone(),
            position,
            history: Vec::new(),
            players,
            status: GameStatus::InProgress,
            settings,
            rules: StandardChess,
        };
        game.status = game.compute_status();
        game
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the position the game started from.
    pub fn start_position(&self) -> &Position {
        &self.start_position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.position.side_to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The inventory of one side.
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.rules.is_check(&self.position)
    }

    /// Returns true once the game has reached checkmate, stalemate or a
    /// draw.
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal moves of the piece on `from`. Empty for an empty square, an
    /// enemy piece, or a finished game.
    pub fn legal_moves(&self, from: Square) -> MoveList {
        if self.is_game_over() {
            return MoveList::new();
        }
        self.rules.legal_moves_from(&self.position, from)
    }

    /// [`Game::legal_moves`] addressed by raw grid coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSquare`] if either coordinate is outside
    /// 0..8.
    pub fn legal_moves_at(&self, file: i16, rank: i16) -> Result<MoveList, GameError> {
        let from = Square::try_from_coords(file, rank)?;
        Ok(self.legal_moves(from))
    }

    /// Every legal move of the side to move.
    pub fn all_legal_moves(&self) -> MoveList {
        if self.is_game_over() {
            return MoveList::new();
        }
        self.rules.generate_moves(&self.position)
    }

    /// Applies a move.
    ///
    /// The move must equal one of [`Game::legal_moves`] for its origin
    /// square. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] once the game has ended and
    /// [`GameError::IllegalMove`] for a move that is not legal here.
    pub fn apply_move(&mut self, m: Move) -> Result<(), GameError> {
        if self.is_game_over() {
            trace!(mv = %m, status = %self.status, "move rejected, game over");
            return Err(GameError::GameOver);
        }
        if !self.rules.is_legal(&self.position, m) {
            trace!(mv = %m, "move rejected, not legal");
            return Err(GameError::IllegalMove(m.to_uci()));
        }

        self.commit(m);
        Ok(())
    }

    /// Applies a move given in UCI notation ("e2e4", "e7e8q").
    ///
    /// A move to the last rank without a promotion letter promotes to
    /// [`GameSettings::default_promotion`].
    pub fn apply_uci(&mut self, text: &str) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        let request =
            UciMove::parse(text).ok_or_else(|| GameError::InvalidNotation(text.to_string()))?;
        let m = self.resolve(request)?;
        self.apply_move(m)
    }

    /// Finds the legal move a UCI request stands for.
    pub fn resolve(&self, request: UciMove) -> Result<Move, GameError> {
        let legal = self.legal_moves(request.from);
        let found = legal.iter().find(|m| {
            let mut wanted = request;
            if m.promotion().is_some() && wanted.promotion.is_none() {
                wanted.promotion = Some(self.settings.default_promotion);
            }
            wanted.matches(m)
        });
        found
            .copied()
            .ok_or_else(|| GameError::IllegalMove(request.to_string()))
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Starts over from the standard starting position, keeping the
    /// settings.
    pub fn reset(&mut self) {
        debug!("game reset");
        *self = Self::with_settings(self.settings);
    }

    /// Number of times the current position has occurred.
    pub fn repetition_count(&self) -> usize {
        let Some(current) = self.repetitions.last() else {
            return 0;
        };
        self.repetitions.iter().filter(|&key| key == current).count()
    }

    fn commit(&mut self, m: Move) {
        let mover = m.piece().color;
        let rook_shift = match m.flag() {
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside => {
                let geometry = CastleGeometry::new(mover, m.flag() == MoveFlag::CastleKingside);
                Some((geometry.rook_from, geometry.rook_to))
            }
            _ => None,
        };
        self.players[mover.index()].record_own_move(m, rook_shift);

        if let Some(captured) = m.captured() {
            let victim_square = if m.is_en_passant() {
                m.to().offset(0, -mover.pawn_direction())
            } else {
                Some(m.to())
            };
            if let Some(sq) = victim_square {
                self.players[mover.opposite().index()].record_loss(sq, captured);
            }
        }

        self.position = self.rules.make_move(&self.position, m);
        self.history.push(m);
        self.repetitions.push(self.position.zobrist_hash());

        let previous = self.status;
        self.status = self.compute_status();
        debug!(mv = %m, ply = self.history.len(), status = %self.status, "move applied");
        if previous != self.status {
            debug!(from = %previous, to = %self.status, "status changed");
        }
    }

    fn compute_status(&self) -> GameStatus {
        let side = self.position.side_to_move;
        let in_check = self.rules.is_check(&self.position);
        if !self.rules.has_legal_move(&self.position) {
            return if in_check {
                GameStatus::Checkmate(side)
            } else {
                GameStatus::Stalemate
            };
        }
        if let Some(reason) = self.draw_reason() {
            return GameStatus::Draw(reason);
        }
        if in_check {
            GameStatus::Check(side)
        } else {
            GameStatus::InProgress
        }
    }

    fn draw_reason(&self) -> Option<DrawReason> {
        if self.settings.fifty_move_rule && self.position.halfmove_clock >= 100 {
            return Some(DrawReason::FiftyMoveRule);
        }
        if self.settings.threefold_repetition && self.repetition_count() >= 3 {
            return Some(DrawReason::ThreefoldRepetition);
        }
        if self.settings.insufficient_material
            && self.rules.is_insufficient_material(&self.position)
        {
            return Some(DrawReason::InsufficientMaterial);
        }
        None
    }
}

/// Each side has one king, no pawn stands on the first or last rank, and the
/// side that just moved is not in check.
fn validate_position(position: &Position) -> Result<(), GameError> {
    for color in Color::BOTH {
        let kings = position.board.count(PieceKind::King, color);
        if kings != 1 {
            return Err(GameError::InvalidPosition(format!(
                "{} has {} kings",
                color, kings
            )));
        }
    }
    let stranded = position
        .board
        .pieces()
        .find(|(sq, piece)| piece.kind == PieceKind::Pawn && matches!(sq.rank_index(), 0 | 7));
    if let Some((sq, piece)) = stranded {
        return Err(GameError::InvalidPosition(format!(
            "{} pawn on {}",
            piece.color, sq
        )));
    }
    let waiting = position.side_to_move.opposite();
    if crate::movegen::is_king_attacked(&position.board, waiting) {
        return Err(GameError::InvalidPosition(format!(
            "{} is in check but it is {}'s turn",
            waiting, position.side_to_move
        )));
    }
    Ok(())
}
