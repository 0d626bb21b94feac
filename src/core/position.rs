//! Board coordinates.
//!
//! A `Position` is a `(row, column)` pair where rows are numbered from 1
//! and columns are lettered from `A`. Whether a position is on the board
//! depends on the board size, so range checks take the size explicitly.
//!
//! ## Text Form
//!
//! Positions print and parse as `<column><row>`:
//!
//! ```
//! use go_clash::core::Position;
//!
//! let pos: Position = "C3".parse().unwrap();
//! assert_eq!(pos, Position::new(3, 'C'));
//! assert_eq!(pos.to_string(), "C3");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::str::FromStr;
use thiserror::Error;

/// An intersection on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row number, 1-based.
    pub row: u8,
    /// Column letter, starting at `A`.
    pub col: char,
}

/// Failure to parse a position from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid position: {input:?}")]
pub struct ParsePositionError {
    input: String,
}

impl Position {
    /// Create a position without range checking.
    #[must_use]
    pub const fn new(row: u8, col: char) -> Self {
        Self { row, col }
    }

    /// Create a position from 0-based row and column indices.
    ///
    /// Returns `None` when the column index is past `Z`.
    #[must_use]
    pub fn from_indices(row: usize, col: usize) -> Option<Self> {
        let row = u8::try_from(row + 1).ok()?;
        let col = u8::try_from(col).ok().filter(|c| *c < 26)?;
        Some(Self::new(row, char::from(b'A' + col)))
    }

    /// 0-based column index, or `None` for a non-letter column.
    #[must_use]
    pub fn col_index(self) -> Option<usize> {
        self.col
            .is_ascii_uppercase()
            .then(|| (self.col as u8 - b'A') as usize)
    }

    /// Check whether this position lies on a `size` x `size` board.
    #[must_use]
    pub fn is_within(self, size: u8) -> bool {
        let col_ok = self.col_index().is_some_and(|c| c < size as usize);
        (1..=size).contains(&self.row) && col_ok
    }

    /// The (up to four) orthogonally adjacent positions that lie on the board.
    #[must_use]
    pub fn neighbors(self, size: u8) -> SmallVec<[Position; 4]> {
        let mut out = SmallVec::new();
        let (Some(row), Some(col)) = ((self.row as usize).checked_sub(1), self.col_index()) else {
            return out;
        };
        let candidates = [
            (row.checked_sub(1), Some(col)),
            (Some(row + 1), Some(col)),
            (Some(row), col.checked_sub(1)),
            (Some(row), Some(col + 1)),
        ];
        for (r, c) in candidates {
            if let (Some(r), Some(c)) = (r, c) {
                if let Some(pos) = Position::from_indices(r, c) {
                    if pos.is_within(size) {
                        out.push(pos);
                    }
                }
            }
        }
        out
    }

    /// Iterate over every position of a `size` x `size` board, row by row.
    pub fn all(size: u8) -> impl Iterator<Item = Position> {
        let size = size as usize;
        (0..size).flat_map(move |r| (0..size).filter_map(move |c| Position::from_indices(r, c)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError { input: s.to_string() };
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let col = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(err)?
            .to_ascii_uppercase();
        let row: u8 = chars.as_str().parse().map_err(|_| err())?;
        if row == 0 {
            return Err(err());
        }
        Ok(Position::new(row, col))
    }
}

// Positions are map keys on the board, so they serialize as their text form
// to stay valid keys in self-describing formats.
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
