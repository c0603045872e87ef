//! Board coordinates.

use std::fmt;
use thiserror::Error;

/// Coordinates outside the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid square: file {file}, rank {rank} (both must be in 0..=7)")]
pub struct InvalidSquare {
    pub file: i16,
    pub rank: i16,
}

/// A file (column), a to h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Accepts upper and lower case letters.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            Self::from_index((c as u8).wrapping_sub(b'a'))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Lowercase letter.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row), 1 to 8. `R1` is White's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_digit() {
            Self::from_index((c as u8 - b'0').wrapping_sub(1))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the board, indexed 0-63.
///
/// Little-endian rank-file mapping: a1 = 0, b1 = 1, ..., h1 = 7, a2 = 8,
/// ..., h8 = 63. A `Square` is always on the board; out-of-range coordinates
/// are rejected when one is built.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from zero-based file and rank coordinates.
    pub fn try_from_coords(file: i16, rank: i16) -> Result<Self, InvalidSquare> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Ok(Square((rank * 8 + file) as u8))
        } else {
            Err(InvalidSquare { file, rank })
        }
    }

    /// Parses a square from its name, e.g. "e4" or "D4".
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Iterates over all 64 squares from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Zero-based file coordinate.
    #[inline]
    pub const fn file_index(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank coordinate.
    #[inline]
    pub const fn rank_index(self) -> u8 {
        self.0 / 8
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.file_index()) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(self.rank_index()) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the square shifted by the given file and rank deltas, or
    /// `None` if that falls off the board.
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file_index() as i8 + file_delta;
        let rank = self.rank_index() as i8 + rank_delta;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Square((rank * 8 + file) as u8))
        }
    }

    /// Returns true for dark squares (a1 is dark).
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.file_index() + self.rank_index()) % 2 == 0
    }

    /// Returns the algebraic name of this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 28);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(
            Square::from_algebraic("e4"),
            Some(Square::new(File::E, Rank::R4))
        );
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn uppercase_names_map_to_coordinates() {
        let d4 = Square::from_algebraic("D4").unwrap();
        assert_eq!(d4.file_index(), 3);
        assert_eq!(d4.rank_index(), 3);
        assert_eq!(Square::from_algebraic("H1"), Some(Square::H1));
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic(), "a1");
        assert_eq!(Square::H8.to_algebraic(), "h8");
        assert_eq!(Square::new(File::E, Rank::R4).to_algebraic(), "e4");
    }

    #[test]
    fn coords_out_of_range() {
        assert_eq!(
            Square::try_from_coords(8, 0),
            Err(InvalidSquare { file: 8, rank: 0 })
        );
        assert_eq!(
            Square::try_from_coords(0, -1),
            Err(InvalidSquare { file: 0, rank: -1 })
        );
        assert_eq!(Square::try_from_coords(7, 7), Ok(Square::H8));
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::E1.offset(1, 1), Square::from_algebraic("f2"));
    }

    #[test]
    fn square_colors() {
        assert!(Square::A1.is_dark());
        assert!(!Square::H1.is_dark());
        assert!(Square::H8.is_dark());
    }

    proptest! {
        #[test]
        fn coords_roundtrip(file in 0i16..8, rank in 0i16..8) {
            let sq = Square::try_from_coords(file, rank).unwrap();
            prop_assert_eq!(sq.file_index() as i16, file);
            prop_assert_eq!(sq.rank_index() as i16, rank);
            prop_assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
        }
    }
}
