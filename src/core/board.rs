//! The Go board: an immutable grid of intersections.
//!
//! `Board` is a persistent map from `Position` to `Piece`, backed by
//! `im::HashMap` so that every rule transition can produce a new board
//! while sharing structure with the previous one. Absent keys are empty
//! intersections.
//!
//! ## Diagrams
//!
//! Boards print as one line per row, top row (highest number) first,
//! using `.` for empty, `#` for black and `O` for white. The same format
//! parses back, which keeps test setups readable:
//!
//! ```
//! use go_clash::core::{Board, Piece, Position};
//!
//! let board: Board = "\
//!     .O.
//!     O#O
//!     ...".parse().unwrap();
//!
//! assert_eq!(board.size(), 3);
//! assert_eq!(board.get(Position::new(2, 'B')), Some(Piece::Black));
//! assert_eq!(board.get(Position::new(1, 'B')), None);
//! ```

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::player::Piece;
use super::position::Position;

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: u8 = 2;

/// Largest supported board side (columns are lettered `A..=Z`).
pub const MAX_BOARD_SIZE: u8 = 26;

/// A board whose cells are out of range or otherwise malformed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Board side outside the supported range.
    #[error("unsupported board size {0}")]
    UnsupportedSize(usize),

    /// A stone sits outside the board.
    #[error("stone at {position} lies outside a {size}x{size} board")]
    OutOfRange { position: Position, size: u8 },

    /// Rows of a diagram have different lengths.
    #[error("diagram row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    /// Unknown diagram symbol.
    #[error("unknown cell symbol {0:?}")]
    UnknownSymbol(char),
}

/// Immutable square Go board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: u8,
    cells: ImHashMap<Position, Piece>,
}

/// Unchecked wire shape of a board; validated into `Board`.
#[derive(Deserialize)]
struct RawBoard {
    size: u8,
    cells: ImHashMap<Position, Piece>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&raw.size) {
            return Err(BoardError::UnsupportedSize(raw.size as usize));
        }
        if let Some(position) = raw.cells.keys().find(|p| !p.is_within(raw.size)) {
            return Err(BoardError::OutOfRange {
                position: *position,
                size: raw.size,
            });
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl Board {
    /// Create an empty `size` x `size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    #[must_use]
    pub fn new(size: u8) -> Self {
        assert!(size >= MIN_BOARD_SIZE, "Board must be at least 2x2");
        assert!(size <= MAX_BOARD_SIZE, "At most 26 columns supported");

        Self {
            size,
            cells: ImHashMap::new(),
        }
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Check whether a position lies on this board.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    /// Stone at a position, `None` if empty or off the board.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells.get(&pos).copied()
    }

    /// Check whether an on-board position is empty.
    #[must_use]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.contains(pos) && !self.cells.contains_key(&pos)
    }

    /// A new board with `piece` placed at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the board; callers validate first.
    #[must_use]
    pub fn with(&self, pos: Position, piece: Piece) -> Self {
        assert!(self.contains(pos), "Position {pos} is off the board");
        Self {
            size: self.size,
            cells: self.cells.update(pos, piece),
        }
    }

    /// A new board with the intersection at `pos` emptied.
    #[must_use]
    pub fn without(&self, pos: Position) -> Self {
        Self {
            size: self.size,
            cells: self.cells.without(&pos),
        }
    }

    /// Iterate over occupied intersections.
    pub fn stones(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().map(|(p, c)| (*p, *c))
    }

    /// Number of stones of one color on the board.
    #[must_use]
    pub fn count(&self, piece: Piece) -> usize {
        self.cells.values().filter(|c| **c == piece).count()
    }

    /// Number of stones on the board.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.cells.len()
    }

    /// Check whether no stone has been placed.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.cells.is_empty()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (1..=self.size).rev() {
            for col in 0..self.size as usize {
                let cell = Position::from_indices(row as usize - 1, col)
                    .and_then(|p| self.get(p))
                    .map_or('.', Piece::symbol);
                write!(f, "{cell}")?;
            }
            if row > 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = rows.len();
        if !(MIN_BOARD_SIZE as usize..=MAX_BOARD_SIZE as usize).contains(&size) {
            return Err(BoardError::UnsupportedSize(size));
        }

        let mut board = Board::new(size as u8);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::RaggedRow {
                    row: i,
                    found: row.len(),
                    expected: size,
                });
            }
            // First diagram line is the top row.
            let row_index = size - 1 - i;
            for (col, symbol) in row.iter().enumerate() {
                if *symbol == '.' || *symbol == '+' {
                    continue;
                }
                let piece = Piece::from_symbol(*symbol).ok_or(BoardError::UnknownSymbol(*symbol))?;
                if let Some(pos) = Position::from_indices(row_index, col) {
                    board = board.with(pos, piece);
                }
            }
        }
        Ok(board)
    }
}
