//! The `Clash` state machine.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::error::ClashError;
use crate::core::{Game, Piece, Position, SessionConfig};
use crate::rules::{GameResult, GoRules, RulesEngine, Score};
use crate::storage::{SharedStorage, Storage, StorageError};

/// Everything a session needs besides its own state: the shared store,
/// the agreed rules, and polling timing.
pub struct ClashContext {
    storage: SharedStorage,
    rules: GoRules,
    config: SessionConfig,
}

impl ClashContext {
    /// Create a new context.
    #[must_use]
    pub fn new(storage: SharedStorage, rules: GoRules, config: SessionConfig) -> Self {
        Self {
            storage,
            rules,
            config,
        }
    }

    /// Backing store.
    #[must_use]
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Rules engine.
    #[must_use]
    pub fn rules(&self) -> &GoRules {
        &self.rules
    }

    /// Polling timing.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl std::fmt::Debug for ClashContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClashContext")
            .field("rules", &self.rules)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A session bound to a persisted game.
#[derive(Clone, Debug)]
pub struct RunningClash {
    context: Arc<ClashContext>,
    id: String,
    me: Piece,
    game: Game,
}

impl RunningClash {
    /// Persisted record key.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Local player's color.
    #[must_use]
    pub fn me(&self) -> Piece {
        self.me
    }

    /// Current game snapshot.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Whether the local player owns (and may delete) the record.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.me == Piece::Black
    }

    fn with_game(&self, game: Game) -> Clash {
        Clash::Running(RunningClash {
            context: Arc::clone(&self.context),
            id: self.id.clone(),
            me: self.me,
            game,
        })
    }

    /// Store `game` unless it equals the current snapshot, then wrap it.
    fn commit(&self, game: Game) -> Result<Clash, ClashError> {
        if game == self.game {
            debug!(id = %self.id, "move rejected by rules, nothing to persist");
            return Ok(self.with_game(game));
        }
        self.context
            .storage()
            .update(&self.id, &game)
            .map_err(|e| self.deleted_or(e))?;
        Ok(self.with_game(game))
    }

    fn deleted_or(&self, err: StorageError) -> ClashError {
        match err {
            StorageError::NotFound { .. } => ClashError::RecordDeleted(self.id.clone()),
            other => ClashError::Storage(other),
        }
    }
}

/// Session state: not yet bound to a game, or running as one color.
///
/// Every operation returns a new `Clash`; the caller replaces its current
/// value with the result. Failed operations leave the caller's value as it
/// was.
#[derive(Clone, Debug)]
pub enum Clash {
    /// No game bound yet.
    Unjoined(Arc<ClashContext>),
    /// Playing `me` in the game stored under `id`.
    Running(RunningClash),
}

impl Clash {
    /// An unjoined session over the given context.
    #[must_use]
    pub fn new(context: Arc<ClashContext>) -> Self {
        Clash::Unjoined(context)
    }

    /// Shared context.
    #[must_use]
    pub fn context(&self) -> &Arc<ClashContext> {
        match self {
            Clash::Unjoined(context) => context,
            Clash::Running(run) => &run.context,
        }
    }

    /// The running session, if any.
    #[must_use]
    pub fn as_running(&self) -> Option<&RunningClash> {
        match self {
            Clash::Running(run) => Some(run),
            Clash::Unjoined(_) => None,
        }
    }

    /// The running session, or `NotStarted`.
    pub fn running(&self) -> Result<&RunningClash, ClashError> {
        self.as_running().ok_or(ClashError::NotStarted)
    }

    /// Check whether a game is bound.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.as_running().is_some()
    }

    /// Current game snapshot.
    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        self.as_running().map(RunningClash::game)
    }

    /// Local player's color.
    #[must_use]
    pub fn me(&self) -> Option<Piece> {
        self.as_running().map(RunningClash::me)
    }

    /// Persisted record key.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.as_running().map(RunningClash::id)
    }

    /// Check whether the local player is to move in an unfinished game.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.as_running()
            .is_some_and(|run| !run.game.is_finished() && run.game.turn() == run.me)
    }

    /// Check whether a finished game can be replaced by a fresh board.
    #[must_use]
    pub fn can_new_board(&self) -> bool {
        self.game().is_some_and(Game::is_finished)
    }

    /// Check whether nothing can happen locally until the other side acts.
    #[must_use]
    pub fn awaits_other_side(&self) -> bool {
        self.as_running()
            .is_some_and(|run| !run.game.is_finished() && run.game.turn() != run.me)
    }

    fn my_turn(&self) -> Result<&RunningClash, ClashError> {
        let run = self.running()?;
        if run.game.turn() != run.me {
            return Err(ClashError::NotYourTurn);
        }
        Ok(run)
    }

    // === Session Lifecycle ===

    /// Create a new game record under `name` and play it as black.
    #[instrument(skip(self))]
    pub fn start(&self, name: &str) -> Result<Clash, ClashError> {
        let context = self.context();
        let game = context.rules().new_game();
        context.storage().create(&name.to_string(), &game)?;
        info!(id = name, "started game as black");

        Ok(Clash::Running(RunningClash {
            context: Arc::clone(context),
            id: name.to_string(),
            me: Piece::Black,
            game,
        }))
    }

    /// Join the existing game `name` as white.
    #[instrument(skip(self))]
    pub fn join(&self, name: &str) -> Result<Clash, ClashError> {
        let context = self.context();
        let id = name.to_string();
        let game = context
            .storage()
            .read(&id)?
            .ok_or_else(|| ClashError::GameNotFound(id.clone()))?;
        info!(id = name, "joined game as white");

        Ok(Clash::Running(RunningClash {
            context: Arc::clone(context),
            id,
            me: Piece::White,
            game,
        }))
    }

    /// Delete the persisted record. Only black may do this.
    ///
    /// Returns the unjoined session to adopt afterwards.
    #[instrument(skip(self))]
    pub fn delete_if_owner(&self) -> Result<Clash, ClashError> {
        let run = self.running()?;
        if !run.is_owner() {
            return Err(ClashError::NotOwner);
        }
        run.context.storage().delete(&run.id)?;
        info!(id = %run.id, "deleted game");
        Ok(Clash::Unjoined(Arc::clone(&run.context)))
    }

    // === Moves ===

    /// Place a stone. Occupied and suicide plays succeed without changes.
    #[instrument(skip(self))]
    pub fn play(&self, pos: Position) -> Result<Clash, ClashError> {
        let run = self.my_turn()?;
        let game = run.context.rules().play(&run.game, pos)?;
        run.commit(game)
    }

    /// Pass the turn.
    #[instrument(skip(self))]
    pub fn pass(&self) -> Result<Clash, ClashError> {
        let run = self.my_turn()?;
        let game = run.context.rules().pass(&run.game);
        run.commit(game)
    }

    /// Resign the game.
    #[instrument(skip(self))]
    pub fn resign(&self) -> Result<Clash, ClashError> {
        let run = self.my_turn()?;
        let game = run.context.rules().resign(&run.game);
        run.commit(game)
    }

    /// Replace a finished game with a fresh board under the same id.
    #[instrument(skip(self))]
    pub fn new_board(&self) -> Result<Clash, ClashError> {
        let run = self.running()?;
        if !run.game.is_finished() {
            return Err(ClashError::GameNotFinished);
        }
        let game = run.context.rules().new_game();
        run.commit(game)
    }

    // === Scoring ===

    /// Score of the current position.
    pub fn score(&self) -> Result<Score, ClashError> {
        let run = self.running()?;
        Ok(run.context.rules().score(&run.game))
    }

    /// Outcome of a finished game.
    pub fn winner(&self) -> Result<GameResult, ClashError> {
        let run = self.running()?;
        if !run.game.is_finished() {
            return Err(ClashError::GameNotFinished);
        }
        Ok(run.context.rules().winner(&run.game))
    }

    // === Synchronization ===

    /// Re-read the persisted game after the configured minimum delay.
    ///
    /// Fails with `RecordDeleted` if the record is gone and with `NoChange`
    /// if the stored snapshot equals the local one.
    pub async fn refresh(&self) -> Result<Clash, ClashError> {
        let run = self.running()?;
        let delay = run.context.config().slow_read_delay();
        let fresh = run
            .context
            .storage()
            .slow_read(&run.id, delay)
            .await?
            .ok_or_else(|| ClashError::RecordDeleted(run.id.clone()))?;

        if fresh == run.game {
            return Err(ClashError::NoChange);
        }
        debug!(id = %run.id, turn = %fresh.turn(), "refreshed game");
        Ok(run.with_game(fresh))
    }
}
