//! Go rules: legal moves, captures, passing, resignation, scoring.
//!
//! `RulesEngine` is the seam the session layer calls through; `GoRules`
//! is the standard implementation. The group and scoring helpers are
//! public so presentation code can inspect positions (e.g. show
//! liberties) without going through a transition.

pub mod engine;
pub mod error;
pub mod groups;
pub mod scoring;

pub use engine::{GoRules, RulesEngine};
pub use error::RulesError;
pub use groups::{clean, count_liberties, group_at, Group, Sweep};
pub use scoring::{score, territory, GameResult, Score, Territory};
