//! # go-clash
//!
//! Go rules engine and two-player turn synchronization over a shared
//! key-value store.
//!
//! ## Design Principles
//!
//! 1. **Immutable Snapshots**: `Board` and `Game` are values. Every rule
//!    transition returns a new snapshot; boards share structure via `im`.
//!
//! 2. **Explicit Session State**: `Clash` is either unjoined or running as
//!    one color. Operations return the next `Clash` instead of mutating.
//!
//! 3. **Store-Agnostic**: Sessions talk to a `Storage` trait. Any keyed
//!    store with create/read/update/delete can carry a game.
//!
//! ## Modules
//!
//! - `core`: Positions, pieces, boards, game snapshots, configuration
//! - `rules`: Moves, captures, passing, resignation, scoring
//! - `storage`: Key-value store trait and in-memory backend
//! - `clash`: Session state machine over a persisted game
//! - `sync`: Polling loop and session driver
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use go_clash::{Clash, ClashContext, Game, GoRules, MemoryStorage, Piece, SessionConfig};
//!
//! let storage: Arc<MemoryStorage<String, Game>> = Arc::new(MemoryStorage::new());
//! let context = Arc::new(ClashContext::new(storage, GoRules::default(), SessionConfig::default()));
//!
//! let black = Clash::new(Arc::clone(&context)).start("g1").unwrap();
//! let white = Clash::new(context).join("g1").unwrap();
//!
//! let black = black.play("E5".parse().unwrap()).unwrap();
//! assert_eq!(black.game().unwrap().turn(), Piece::White);
//! assert!(white.play("E6".parse().unwrap()).is_err()); // stale local copy
//! ```

pub mod core;
pub mod rules;
pub mod storage;
pub mod clash;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    Board, Game, KomiTable, Piece, Position,
    RulesConfig, SessionConfig,
};

pub use crate::rules::{GameResult, GoRules, RulesEngine, RulesError, Score};

pub use crate::storage::{GameStorage, MemoryStorage, SharedStorage, Storage, StorageError};

pub use crate::clash::{Clash, ClashContext, ClashError, RunningClash};

pub use crate::sync::Session;
