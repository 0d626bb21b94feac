//! Player identification.
//!
//! ## Piece
//!
//! Go is strictly two-player: each side is identified by the color of its
//! stones. `Piece` doubles as the stone stored on a board cell and as the
//! player whose turn it is.

use serde::{Deserialize, Serialize};

/// Stone color, and by extension the player owning those stones.
///
/// Black always moves first and is the owner of a persisted session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Black,
    White,
}

impl Piece {
    /// The opposing color.
    ///
    /// ```
    /// use go_clash::core::Piece;
    ///
    /// assert_eq!(Piece::Black.other(), Piece::White);
    /// assert_eq!(Piece::Black.other().other(), Piece::Black);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Piece::Black => Piece::White,
            Piece::White => Piece::Black,
        }
    }

    /// Single-character symbol used in board diagrams.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Piece::Black => '#',
            Piece::White => 'O',
        }
    }

    /// Parse a board diagram symbol.
    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' | 'X' | 'x' | 'B' | 'b' => Some(Piece::Black),
            'O' | 'o' | '0' | 'W' | 'w' => Some(Piece::White),
            _ => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Piece::Black => write!(f, "Black"),
            Piece::White => write!(f, "White"),
        }
    }
}
