//! Key-value storage abstraction for persisted game records.
//!
//! The session layer only depends on the `Storage` trait. A concrete
//! database plugs in behind it; `MemoryStorage` is the in-process backend
//! used for local play and tests.
//!
//! # Design
//!
//! - `create()` fails if the key already exists
//! - `read()` returns `None` for a missing key
//! - `update()` fails if the key is missing; it is unconditional otherwise
//! - `delete()` removes the key
//! - `slow_read()` waits a minimum delay before reading, to keep polling
//!   clients from hammering the backend

mod memory;

pub use memory::MemoryStorage;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::Game;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// `create` on a key that is already taken.
    #[error("record {key} already exists")]
    AlreadyExists { key: String },

    /// `update`/`delete` on a missing key.
    #[error("record {key} not found")]
    NotFound { key: String },

    /// Encoding or decoding a record failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// The backend itself failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Generic keyed record store.
#[async_trait]
pub trait Storage<K, V>: Send + Sync
where
    K: Send + Sync + 'static,
    V: Send + 'static,
{
    /// Insert a new record. Fails with `AlreadyExists` if `key` is taken.
    fn create(&self, key: &K, value: &V) -> Result<(), StorageError>;

    /// Read a record, `None` if absent.
    fn read(&self, key: &K) -> Result<Option<V>, StorageError>;

    /// Replace an existing record. Fails with `NotFound` if absent.
    fn update(&self, key: &K, value: &V) -> Result<(), StorageError>;

    /// Remove a record.
    fn delete(&self, key: &K) -> Result<(), StorageError>;

    /// Read after waiting at least `delay`.
    async fn slow_read(&self, key: &K, delay: Duration) -> Result<Option<V>, StorageError> {
        tokio::time::sleep(delay).await;
        self.read(key)
    }
}

/// Store of game records keyed by session name.
pub type GameStorage = dyn Storage<String, Game>;

/// Shared handle to a game store.
pub type SharedStorage = Arc<GameStorage>;
