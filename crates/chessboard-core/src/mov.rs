//! Move records.

use crate::{Piece, PieceKind, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Pawn double step from its starting rank.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the promotion flag for a kind, or `None` for kinds a pawn
    /// cannot become.
    #[inline]
    pub const fn promote_to(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Knight => Some(MoveFlag::PromoteKnight),
            PieceKind::Bishop => Some(MoveFlag::PromoteBishop),
            PieceKind::Rook => Some(MoveFlag::PromoteRook),
            PieceKind::Queen => Some(MoveFlag::PromoteQueen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Returns the promotion kind if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// One ply.
///
/// `piece` is the moving piece as it stood before the move (so its
/// `has_moved` flag is the pre-move value) and `captured` is the piece it
/// removes, if any. For en passant the captured pawn is not on `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    flag: MoveFlag,
}

impl Move {
    /// Creates a new move record.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        flag: MoveFlag,
    ) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            flag,
        }
    }

    /// Source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The moving piece.
    #[inline]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// The piece this move captures.
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag, MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flag.is_castling()
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.flag, MoveFlag::DoublePush)
    }

    /// Kind the pawn turns into, for promotions.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.flag.promotion_piece()
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        UciMove::from(self).to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// Coordinate form of a move ("e2e4", "e7e8q").
///
/// It names squares only; the engine resolves it against the legal moves of
/// a position to get the full [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl UciMove {
    /// Parses UCI notation. Returns `None` for malformed text or a
    /// promotion letter naming a pawn or king.
    pub fn parse(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.chars().nth(4) {
            Some(c) => {
                let kind = PieceKind::from_char(c)?;
                MoveFlag::promote_to(kind)?;
                Some(kind)
            }
            None => None,
        };
        Some(UciMove {
            from,
            to,
            promotion,
        })
    }

    /// Returns true if `m` goes between the same squares with the same
    /// promotion.
    pub fn matches(&self, m: &Move) -> bool {
        self.from == m.from() && self.to == m.to() && self.promotion == m.promotion()
    }
}

impl From<Move> for UciMove {
    fn from(m: Move) -> Self {
        UciMove {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}
