//! The transactional overlay store.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::overlay::{Entry, Overlay};
use crate::stats::{StatsSnapshot, StoreStats};
use std::collections::HashMap;
use tracing::{debug, trace};

/// In-memory key-value store with nested transactions.
///
/// The store owns a base mapping of committed values and a stack of
/// overlays, one per open transaction, ordered outermost first. Reads
/// resolve a key against the innermost overlay that mentions it and fall
/// back to the base mapping. Writes and deletes go to the innermost overlay,
/// or straight into the base mapping when no transaction is open.
///
/// Transactions nest strictly: [`commit`](Store::commit) and
/// [`rollback`](Store::rollback) always act on the most recently started one.
///
/// # Example
///
/// ```rust
/// use nestkv_core::{Store, StoreError};
///
/// let mut store = Store::new();
/// store.set("k", "v1");
///
/// store.start_transaction();
/// store.set("k", "v2");
/// assert_eq!(store.get("k").unwrap(), "v2");
/// store.rollback().unwrap();
///
/// assert_eq!(store.get("k").unwrap(), "v1");
/// assert_eq!(store.commit(), Err(StoreError::NoActiveTransaction));
/// ```
#[derive(Debug)]
pub struct Store {
    /// Committed state. Never holds tombstones.
    base: HashMap<String, String>,
    /// Open transactions, outermost at index 0.
    overlays: Vec<Overlay>,
    config: StoreConfig,
    stats: StoreStats,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            base: HashMap::with_capacity(config.base_capacity),
            overlays: Vec::new(),
            config,
            stats: StoreStats::new(),
        }
    }

    /// Creates a store whose base mapping is pre-populated with `data`.
    #[must_use]
    pub fn with_data(data: HashMap<String, String>) -> Self {
        Self {
            base: data,
            ..Self::new()
        }
    }

    /// Returns the effective value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no layer holds a value for the key,
    /// or if the innermost layer that mentions it holds a tombstone.
    pub fn get(&self, key: &str) -> StoreResult<String> {
        let found = self.resolve(key).map(str::to_owned);
        self.record(|s| s.record_read(found.is_some()));
        trace!(key, hit = found.is_some(), depth = self.depth(), "get");
        found.ok_or_else(|| StoreError::not_found(key))
    }

    /// Returns true if `key` has an effective value. Does not count as a read.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Sets `key` to `value` in the innermost open scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, depth = self.depth(), "set");
        match self.overlays.last_mut() {
            Some(overlay) => overlay.put(key, value.into()),
            None => {
                self.base.insert(key, value.into());
            }
        }
        self.record(StoreStats::record_write);
    }

    /// Deletes `key` in the innermost open scope.
    ///
    /// Inside a transaction this records a tombstone so that a rollback
    /// restores whatever was visible before. Deleting a key that has no
    /// effective value is not an error.
    pub fn delete(&mut self, key: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, depth = self.depth(), "delete");
        match self.overlays.last_mut() {
            Some(overlay) => overlay.tombstone(key),
            None => {
                self.base.remove(&key);
            }
        }
        self.record(StoreStats::record_delete);
    }

    /// Opens a new, empty transaction nested inside any open ones.
    pub fn start_transaction(&mut self) {
        self.overlays
            .push(Overlay::with_capacity(self.config.overlay_capacity));
        self.record(StoreStats::record_transaction_start);
        debug!(depth = self.depth(), "started transaction");
    }

    /// Commits the innermost transaction into its parent, or into the base
    /// mapping if it is the outermost one.
    ///
    /// Tombstones folded into a parent stay tombstones; tombstones folded
    /// into the base mapping remove the key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] if no transaction is open.
    /// The store is left unchanged.
    pub fn commit(&mut self) -> StoreResult<()> {
        let Some(top) = self.overlays.pop() else {
            return Err(self.reject("commit"));
        };

        let folded = top.len();
        match self.overlays.last_mut() {
            Some(parent) => {
                parent.absorb(top);
                debug!(folded, depth = self.overlays.len(), "committed into parent");
            }
            None => {
                for (key, entry) in top.into_entries() {
                    match entry {
                        Entry::Value(value) => {
                            self.base.insert(key, value);
                        }
                        Entry::Tombstone => {
                            self.base.remove(&key);
                        }
                    }
                }
                debug!(folded, base_len = self.base.len(), "committed into base");
            }
        }

        self.record(StoreStats::record_transaction_commit);
        Ok(())
    }

    /// Discards the innermost transaction and everything written in it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] if no transaction is open.
    pub fn rollback(&mut self) -> StoreResult<()> {
        let Some(top) = self.overlays.pop() else {
            return Err(self.reject("rollback"));
        };

        debug!(
            discarded = top.len(),
            depth = self.depth(),
            "rolled back transaction"
        );
        self.record(StoreStats::record_transaction_rollback);
        Ok(())
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.overlays.len()
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.overlays.is_empty()
    }

    /// Returns the number of committed keys in the base mapping.
    #[must_use]
    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    /// Returns the number of entries (tombstones included) pending in the
    /// innermost transaction, or 0 when none is open.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.overlays.last().map_or(0, Overlay::len)
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns a snapshot of the operation counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn resolve(&self, key: &str) -> Option<&str> {
        for overlay in self.overlays.iter().rev() {
            if let Some(entry) = overlay.lookup(key) {
                return entry.as_value();
            }
        }
        self.base.get(key).map(String::as_str)
    }

    fn reject(&self, op: &'static str) -> StoreError {
        self.record(StoreStats::record_rejected_control_call);
        debug!(op, "rejected: no active transaction");
        StoreError::NoActiveTransaction
    }

    fn record(&self, f: impl FnOnce(&StoreStats)) {
        if self.config.track_stats {
            f(&self.stats);
        }
    }
}
