//! Rule violations that are errors rather than silent no-ops.

use thiserror::Error;

use crate::core::Position;

/// Errors raised by the rules engine.
///
/// Occupied-cell and suicide plays are not errors: they leave the game
/// unchanged. Only malformed input is reported.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Coordinate outside the board.
    #[error("invalid position {position} on a {size}x{size} board")]
    InvalidPosition {
        /// The rejected position.
        position: Position,
        /// Board side length.
        size: u8,
    },
}
