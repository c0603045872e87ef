//! Zobrist keys for recognising repeated positions.
//!
//! A position key is the XOR of random numbers for:
//! - each piece on each square (6 kinds x 2 colors x 64 squares)
//! - Black to move
//! - each castling right (4 values)
//! - the en passant file (8 values)

use chessboard_core::{Color, PieceKind, Square};

/// Zobrist key table.
pub struct ZobristKeys {
    /// Keys for pieces: [kind][color][square]
    pub pieces: [[[u64; 64]; 2]; 6],
    /// XORed in when Black is to move.
    pub black_to_move: u64,
    /// Keys for castling rights in KQkq order.
    pub castling: [u64; 4],
    /// Keys for the en passant file.
    pub en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Fills the table from a fixed-seed xorshift64 stream, so keys are the
    /// same on every run.
    pub const fn new() -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut kind = 0;
        while kind < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[kind][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            kind += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub const fn piece_key(&self, kind: PieceKind, color: Color, square: Square) -> u64 {
        self.pieces[kind.index()][color.index()][square.index() as usize]
    }

    /// Key for a castling right (0-3, KQkq order).
    #[inline]
    pub const fn castling_key(&self, right: usize) -> u64 {
        self.castling[right]
    }

    /// Key for an en passant file (0-7).
    #[inline]
    pub const fn en_passant_key(&self, file: usize) -> u64 {
        self.en_passant[file]
    }
}

/// Global key table, built at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
