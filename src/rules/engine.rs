//! Rules engine trait and the standard Go rules.
//!
//! Every transition takes a `Game` by reference and returns a new one.
//! Rejected moves (occupied cell, suicide, game already over) return an
//! unchanged copy; callers detect them by comparing `last_move` or the
//! board, never through an error.

use tracing::debug;

use super::error::RulesError;
use super::groups::{self, count_liberties};
use super::scoring::{self, GameResult, Score};
use crate::core::{Game, Position, RulesConfig};

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `play`: return `Err` only for off-board positions
/// - `pass`/`resign`: no-ops on a finished game
/// - `score`: may be called at any time, not only after the game ends
pub trait RulesEngine {
    /// Get the rules configuration.
    fn config(&self) -> &RulesConfig;

    /// Check whether `pos` is on the board and empty. Ignores suicide.
    fn can_play(&self, game: &Game, pos: Position) -> bool;

    /// Place a stone for the player to move.
    fn play(&self, game: &Game, pos: Position) -> Result<Game, RulesError>;

    /// Pass the turn. Two consecutive passes end the game.
    fn pass(&self, game: &Game) -> Game;

    /// The player to move gives up.
    fn resign(&self, game: &Game) -> Game;

    /// Final score of the position.
    fn score(&self, game: &Game) -> Score;

    // === Convenience Methods ===

    /// A fresh game at the configured board size.
    fn new_game(&self) -> Game {
        Game::new(self.config().board_size)
    }

    /// Winner by score.
    fn winner(&self, game: &Game) -> GameResult {
        self.score(game).result()
    }
}

/// Standard Go rules: captures, no suicide, area scoring with komi.
#[derive(Clone, Debug, Default)]
pub struct GoRules {
    config: RulesConfig,
}

impl GoRules {
    /// Create a rules engine with the given configuration.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }
}

impl RulesEngine for GoRules {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn can_play(&self, game: &Game, pos: Position) -> bool {
        game.board().is_empty_at(pos)
    }

    fn play(&self, game: &Game, pos: Position) -> Result<Game, RulesError> {
        if game.is_finished() {
            debug!(%pos, "play ignored: game is finished");
            return Ok(game.clone());
        }

        let size = game.board().size();
        if !pos.is_within(size) {
            return Err(RulesError::InvalidPosition { position: pos, size });
        }

        if !self.can_play(game, pos) {
            debug!(%pos, "play ignored: position is occupied");
            return Ok(game.clone());
        }

        let me = game.turn();
        let placed = game.board().with(pos, me);

        let is_suicide = count_liberties(&placed, pos) == 0;
        let captures = pos
            .neighbors(size)
            .into_iter()
            .any(|n| placed.get(n) == Some(me.other()) && count_liberties(&placed, n) == 0);

        if is_suicide && !captures {
            debug!(%pos, player = %me, "play ignored: suicide");
            return Ok(game.clone());
        }

        let sweep = groups::clean(&placed, Some(pos));
        if sweep.removed(me.other()) > 0 {
            debug!(%pos, player = %me, captured = sweep.removed(me.other()), "stones captured");
        }

        Ok(Game {
            board: sweep.board,
            turn: me.other(),
            is_finished: false,
            white_score: game.white_score() + sweep.black_removed,
            black_score: game.black_score() + sweep.white_removed,
            last_was_pass: false,
            last_move: Some(pos),
        })
    }

    fn pass(&self, game: &Game) -> Game {
        if game.is_finished() {
            return game.clone();
        }

        let ends_game = game.last_was_pass();
        if ends_game {
            debug!(player = %game.turn(), "second consecutive pass ends the game");
        }

        Game {
            turn: game.turn().other(),
            is_finished: ends_game,
            last_was_pass: true,
            last_move: None,
            ..game.clone()
        }
    }

    fn resign(&self, game: &Game) -> Game {
        if game.is_finished() {
            return game.clone();
        }

        debug!(player = %game.turn(), "player resigned");
        Game {
            turn: game.turn().other(),
            is_finished: true,
            last_was_pass: false,
            ..game.clone()
        }
    }

    fn score(&self, game: &Game) -> Score {
        scoring::score(game, self.config.komi.for_size(game.board().size()))
    }
}
