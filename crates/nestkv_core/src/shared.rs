//! Thread-safe handle to a single store.

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::stats::StatsSnapshot;
use crate::store::Store;
use parking_lot::RwLock;
use std::sync::Arc;

/// A cloneable, thread-safe handle to one [`Store`].
///
/// The whole store sits behind a single reader-writer lock. Reads share the
/// read lock; every write, delete, and transaction control call takes the
/// write lock. All clones see the same data and the same transaction stack,
/// so a transaction started through one handle is committed or rolled back
/// by whichever handle calls next.
///
/// Use [`with_write`](SharedStore::with_write) to run a multi-step sequence
/// under one lock acquisition.
///
/// # Example
///
/// ```rust
/// use nestkv_core::SharedStore;
///
/// let store = SharedStore::new();
/// let other = store.clone();
///
/// store.with_write(|s| {
///     s.start_transaction();
///     s.set("k", "v");
///     s.commit()
/// })
/// .unwrap();
///
/// assert_eq!(other.get("k").unwrap(), "v");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    /// Creates a handle to a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(Store::new())
    }

    /// Creates a handle to a new store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self::from_store(Store::with_config(config))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// See [`Store::get`].
    pub fn get(&self, key: &str) -> StoreResult<String> {
        self.inner.read().get(key)
    }

    /// See [`Store::contains`].
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    /// See [`Store::set`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.write().set(key, value);
    }

    /// See [`Store::delete`].
    pub fn delete(&self, key: impl Into<String>) {
        self.inner.write().delete(key);
    }

    /// See [`Store::start_transaction`].
    pub fn start_transaction(&self) {
        self.inner.write().start_transaction();
    }

    /// See [`Store::commit`].
    pub fn commit(&self) -> StoreResult<()> {
        self.inner.write().commit()
    }

    /// See [`Store::rollback`].
    pub fn rollback(&self) -> StoreResult<()> {
        self.inner.write().rollback()
    }

    /// See [`Store::depth`].
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.read().depth()
    }

    /// See [`Store::stats`].
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.read().stats()
    }

    /// Runs `f` with shared access to the store.
    pub fn with_read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access to the store.
    ///
    /// No other handle can observe the store until `f` returns.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut self.inner.write())
    }
}
