//! In-process storage backend.
//!
//! Records are kept `bincode`-encoded, the way a remote backend would hold
//! them, so every read hands out an independent decoded copy.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Storage, StorageError};

/// In-memory key-value store.
///
/// Clones share the same underlying records, so two clients built from
/// clones of one `MemoryStorage` see each other's writes.
#[derive(Debug)]
pub struct MemoryStorage<K, V> {
    inner: Arc<Inner<K>>,
    _value: std::marker::PhantomData<fn() -> V>,
}

#[derive(Debug)]
struct Inner<K> {
    records: Mutex<FxHashMap<K, Vec<u8>>>,
    reads: AtomicUsize,
}

impl<K, V> MemoryStorage<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                records: Mutex::new(FxHashMap::default()),
                reads: AtomicUsize::new(0),
            }),
            _value: std::marker::PhantomData,
        }
    }

    /// Number of `read` calls served so far (including slow reads).
    pub fn read_count(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Check whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, FxHashMap<K, Vec<u8>>> {
        // A panic while holding the lock cannot leave a half-written record:
        // every mutation is a single map operation.
        self.inner.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Eq + Hash, V> Default for MemoryStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for MemoryStorage<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _value: std::marker::PhantomData,
        }
    }
}

fn encode<V: Serialize>(value: &V) -> Result<Vec<u8>, StorageError> {
    bincode::serialize(value).map_err(|e| StorageError::Codec(e.to_string()))
}

fn decode<V: DeserializeOwned>(bytes: &[u8]) -> Result<V, StorageError> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Codec(e.to_string()))
}

#[async_trait]
impl<K, V> Storage<K, V> for MemoryStorage<K, V>
where
    K: Eq + Hash + Clone + Display + Send + Sync + 'static,
    V: Serialize + DeserializeOwned + Send + 'static,
{
    fn create(&self, key: &K, value: &V) -> Result<(), StorageError> {
        let bytes = encode(value)?;
        let mut records = self.records();
        if records.contains_key(key) {
            return Err(StorageError::AlreadyExists {
                key: key.to_string(),
            });
        }
        records.insert(key.clone(), bytes);
        Ok(())
    }

    fn read(&self, key: &K) -> Result<Option<V>, StorageError> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        let records = self.records();
        records.get(key).map(|bytes| decode(bytes)).transpose()
    }

    fn update(&self, key: &K, value: &V) -> Result<(), StorageError> {
        let bytes = encode(value)?;
        let mut records = self.records();
        match records.get_mut(key) {
            Some(slot) => {
                *slot = bytes;
                Ok(())
            }
            None => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
        }
    }

    fn delete(&self, key: &K) -> Result<(), StorageError> {
        self.records().remove(key);
        Ok(())
    }
}
