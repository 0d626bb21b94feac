//! Session driver: current `Clash`, background waiting, projections.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::clash::{Clash, ClashContext, ClashError};
use crate::core::{Board, Game, Piece, Position};
use crate::rules::{GameResult, Score};

/// State shared between the session and its polling task.
struct Shared {
    clash: Mutex<Clash>,
    error: Mutex<Option<ClashError>>,
}

impl Shared {
    fn clash(&self) -> Clash {
        lock(&self.clash).clone()
    }

    fn replace(&self, clash: Clash) {
        *lock(&self.clash) = clash;
    }

    fn surface(&self, err: ClashError) {
        *lock(&self.error) = Some(err);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owner of the "current" `Clash` for one local player.
///
/// Operations adopt the `Clash` they produce. After an action that hands
/// the turn to the other side, a background task polls the store until
/// it is the local player's turn again (or the game is over), adopting
/// each fresher snapshot it reads.
///
/// At most one polling task runs per session. Starting a new wait, calling
/// `cancel_waiting`/`exit`, or dropping the session aborts the previous
/// one. Must be used from within a Tokio runtime.
pub struct Session {
    shared: Arc<Shared>,
    waiting: Mutex<Option<JoinHandle<()>>>,
}

impl Session {
    /// Create an unjoined session.
    #[must_use]
    pub fn new(context: Arc<ClashContext>) -> Self {
        Self {
            shared: Arc::new(Shared {
                clash: Mutex::new(Clash::new(context)),
                error: Mutex::new(None),
            }),
            waiting: Mutex::new(None),
        }
    }

    /// Snapshot of the current `Clash`.
    #[must_use]
    pub fn clash(&self) -> Clash {
        self.shared.clash()
    }

    // === Player Actions ===

    /// Start a new game as black.
    #[instrument(skip(self))]
    pub fn start(&self, name: &str) -> Result<(), ClashError> {
        self.cancel_waiting();
        let next = self.clash().start(name)?;
        self.shared.replace(next);
        Ok(())
    }

    /// Join an existing game as white, then wait for black's move.
    #[instrument(skip(self))]
    pub fn join(&self, name: &str) -> Result<(), ClashError> {
        self.cancel_waiting();
        let next = self.clash().join(name)?;
        self.shared.replace(next);
        self.wait_for_other_side();
        Ok(())
    }

    /// Play a stone, then wait for the reply.
    #[instrument(skip(self))]
    pub fn play(&self, pos: Position) -> Result<(), ClashError> {
        let result = self.clash().play(pos).map(|next| self.shared.replace(next));
        self.wait_for_other_side();
        result
    }

    /// Pass, then wait for the reply.
    #[instrument(skip(self))]
    pub fn pass(&self) -> Result<(), ClashError> {
        let result = self.clash().pass().map(|next| self.shared.replace(next));
        self.wait_for_other_side();
        result
    }

    /// Resign the current game.
    #[instrument(skip(self))]
    pub fn resign(&self) -> Result<(), ClashError> {
        let result = self.clash().resign().map(|next| self.shared.replace(next));
        self.wait_for_other_side();
        result
    }

    /// Start a fresh board after a finished game.
    #[instrument(skip(self))]
    pub fn new_board(&self) -> Result<(), ClashError> {
        let next = self.clash().new_board()?;
        self.shared.replace(next);
        self.wait_for_other_side();
        Ok(())
    }

    /// Re-read the game on demand. An unchanged record is not an error here.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), ClashError> {
        match self.clash().refresh().await {
            Ok(next) => {
                self.shared.replace(next);
                Ok(())
            }
            Err(ClashError::NoChange) => Ok(()),
            Err(err @ ClashError::RecordDeleted(_)) => {
                self.reset();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Leave the session: stop waiting, delete the record if we own it,
    /// and return to unjoined.
    #[instrument(skip(self))]
    pub fn exit(&self) -> Result<(), ClashError> {
        self.cancel_waiting();
        let clash = self.clash();
        let result = match clash.delete_if_owner() {
            Ok(_) | Err(ClashError::NotOwner | ClashError::NotStarted) => Ok(()),
            Err(err) => Err(err),
        };
        self.reset();
        result
    }

    /// Abort the background wait, if any.
    pub fn cancel_waiting(&self) {
        if let Some(handle) = lock(&self.waiting).take() {
            if !handle.is_finished() {
                debug!("cancelling wait for other side");
            }
            handle.abort();
        }
    }

    /// Take the last error reported by the background task.
    pub fn take_error(&self) -> Option<ClashError> {
        lock(&self.shared.error).take()
    }

    fn reset(&self) {
        let context = Arc::clone(self.clash().context());
        self.shared.replace(Clash::new(context));
    }

    fn wait_for_other_side(&self) {
        if !self.clash().awaits_other_side() {
            return;
        }
        self.cancel_waiting();

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(poll_until_turn(shared));
        *lock(&self.waiting) = Some(handle);
    }

    // === Projections ===

    /// Whether a background wait is in progress.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        lock(&self.waiting).as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether a game is bound.
    #[must_use]
    pub fn has_clash(&self) -> bool {
        self.clash().is_running()
    }

    /// Current game snapshot.
    #[must_use]
    pub fn game(&self) -> Option<Game> {
        self.clash().game().cloned()
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> Option<Board> {
        self.clash().game().map(|g| g.board().clone())
    }

    /// Player to move.
    #[must_use]
    pub fn turn(&self) -> Option<Piece> {
        self.clash().game().map(Game::turn)
    }

    /// Local player's color.
    #[must_use]
    pub fn me(&self) -> Option<Piece> {
        self.clash().me()
    }

    /// Last stone placed.
    #[must_use]
    pub fn last_move(&self) -> Option<Position> {
        self.clash().game().and_then(Game::last_move)
    }

    /// Stones captured by `piece` (0 when no game is bound).
    #[must_use]
    pub fn captures(&self, piece: Piece) -> u32 {
        self.clash().game().map_or(0, |g| g.captures(piece))
    }

    /// Whether the bound game is over.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.clash().game().is_some_and(Game::is_finished)
    }

    /// Whether a fresh board may be started.
    #[must_use]
    pub fn can_new_board(&self) -> bool {
        self.clash().can_new_board()
    }

    /// Score of the current position.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        self.clash().score().ok()
    }

    /// Outcome of a finished game.
    #[must_use]
    pub fn winner(&self) -> Option<GameResult> {
        self.clash().winner().ok()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_waiting();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("clash", &self.clash())
            .field("waiting", &self.is_waiting())
            .finish()
    }
}

/// Poll until the local player can act again.
///
/// Suspends only in the poll interval sleep and the slow read, so an abort
/// stops it before any further store access.
async fn poll_until_turn(shared: Arc<Shared>) {
    let interval = shared.clash().context().config().poll_interval();
    info!(?interval, "waiting for other side");

    loop {
        tokio::time::sleep(interval).await;

        match shared.clash().refresh().await {
            Ok(next) => shared.replace(next),
            Err(ClashError::NoChange) => debug!("no changes yet"),
            Err(err @ ClashError::RecordDeleted(_)) => {
                warn!(%err, "game vanished while waiting");
                let context = Arc::clone(shared.clash().context());
                shared.replace(Clash::new(context));
                shared.surface(err);
            }
            Err(err) => {
                warn!(%err, "refresh failed");
                shared.surface(err);
            }
        }

        if !shared.clash().awaits_other_side() {
            break;
        }
    }
    debug!("done waiting");
}
