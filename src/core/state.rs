//! Game state: one immutable snapshot of a Go session.
//!
//! ## Game
//!
//! Observable information shared by both players:
//! - The board
//! - Whose turn it is
//! - Whether the game is over
//! - Running capture counts (stones each side has taken so far)
//! - Whether the last action was a pass, and the last stone played
//!
//! A `Game` is never mutated once published. Rule transitions in
//! `crate::rules` build a new snapshot; cloning is O(1) because the board
//! is a persistent map.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::player::Piece;
use super::position::Position;

/// Immutable snapshot of a game in progress (or finished).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) turn: Piece,
    pub(crate) is_finished: bool,
    /// Stones captured by white.
    pub(crate) white_score: u32,
    /// Stones captured by black.
    pub(crate) black_score: u32,
    pub(crate) last_was_pass: bool,
    pub(crate) last_move: Option<Position>,
}

impl Game {
    /// Create a fresh game on an empty `size` x `size` board, black to move.
    ///
    /// # Panics
    ///
    /// Panics on an unsupported board size (see `Board::new`).
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self::with_board(Board::new(size), Piece::Black)
    }

    /// Create a game from an arbitrary position.
    ///
    /// Capture counts start at zero. Useful for setting up problems and
    /// for tests; the board is trusted to contain no dead groups.
    #[must_use]
    pub fn with_board(board: Board, turn: Piece) -> Self {
        Self {
            board,
            turn,
            is_finished: false,
            white_score: 0,
            black_score: 0,
            last_was_pass: false,
            last_move: None,
        }
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move next.
    #[must_use]
    pub fn turn(&self) -> Piece {
        self.turn
    }

    /// Whether the game has ended (resignation or two passes).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Stones captured by white so far.
    #[must_use]
    pub fn white_score(&self) -> u32 {
        self.white_score
    }

    /// Stones captured by black so far.
    #[must_use]
    pub fn black_score(&self) -> u32 {
        self.black_score
    }

    /// Stones captured so far by `piece`.
    #[must_use]
    pub fn captures(&self, piece: Piece) -> u32 {
        match piece {
            Piece::Black => self.black_score,
            Piece::White => self.white_score,
        }
    }

    /// Whether the previous action was a pass.
    #[must_use]
    pub fn last_was_pass(&self) -> bool {
        self.last_was_pass
    }

    /// The most recently placed stone, if the last action was a play.
    #[must_use]
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }
}
