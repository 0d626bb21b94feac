//! Core game types: positions, pieces, boards, game snapshots, configuration.
//!
//! Everything here is a plain value. State transitions live in
//! `crate::rules`; nothing in this module mutates a published value.

pub mod position;
pub mod player;
pub mod board;
pub mod config;
pub mod state;

pub use position::{ParsePositionError, Position};
pub use player::Piece;
pub use board::{Board, BoardError, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use config::{KomiTable, RulesConfig, SessionConfig, DEFAULT_BOARD_SIZE};
pub use state::Game;
