//! Session errors.

use thiserror::Error;

use crate::rules::RulesError;
use crate::storage::StorageError;

/// Errors returned by `Clash` operations.
///
/// None of these leave the local state half-updated: a failed operation
/// returns the error and the caller keeps its current `Clash`.
#[derive(Debug, Error)]
pub enum ClashError {
    /// Operation needs a running session.
    #[error("game hasn't started yet")]
    NotStarted,

    /// The other player is to move.
    #[error("it's not your turn")]
    NotYourTurn,

    /// Only black, who created the session, may delete it.
    #[error("only the owner may delete the game")]
    NotOwner,

    /// `join` on a name with no record.
    #[error("game {0} does not exist")]
    GameNotFound(String),

    /// Operation needs a finished game.
    #[error("game is not finished yet")]
    GameNotFinished,

    /// Off-board coordinate.
    #[error(transparent)]
    InvalidPosition(#[from] RulesError),

    /// The persisted record vanished mid-session.
    #[error("game {0} was deleted")]
    RecordDeleted(String),

    /// `refresh` found the same board as the local copy.
    #[error("no changes were made to the game")]
    NoChange,

    /// Backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ClashError {
    /// Caller misuse or an expected game-flow violation.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ClashError::NotStarted
                | ClashError::NotYourTurn
                | ClashError::NotOwner
                | ClashError::GameNotFound(_)
                | ClashError::GameNotFinished
        )
    }
}
