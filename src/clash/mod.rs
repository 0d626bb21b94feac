//! Session state machine binding a player to a persisted game.
//!
//! ## States
//!
//! - `Clash::Unjoined`: only a context (store, rules, timing)
//! - `Clash::Running`: bound to a record id, playing one color
//!
//! `start` and `join` move from any state to `Running`; every other
//! operation requires `Running` and yields a new `Running` value (or
//! `Unjoined` after `delete_if_owner`).
//!
//! ## Ownership
//!
//! Whoever starts a game plays black and owns the record. Only the owner
//! may delete it.
//!
//! ## Consistency
//!
//! Writes are unconditional `update`s. Turn order is enforced locally, so
//! two processes playing the same color against one record can overwrite
//! each other; this layer does not attempt distributed consistency.

mod error;
mod machine;

pub use error::ClashError;
pub use machine::{Clash, ClashContext, RunningClash};
