//! Transaction overlays.
//!
//! An overlay holds the writes of one open transaction. Each entry either
//! shadows the layers beneath it with a new value or hides them with a
//! tombstone.

use std::collections::hash_map;
use std::collections::HashMap;

/// A single overlay entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The key was set to this value within the scope.
    Value(String),
    /// The key was deleted within the scope.
    Tombstone,
}

impl Entry {
    /// Returns the value, or `None` for a tombstone.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Tombstone => None,
        }
    }

    /// Returns true if this entry is a tombstone.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }
}

/// Pending writes of one transaction scope.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    entries: HashMap<String, Entry>,
}

impl Overlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty overlay with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Records a write, replacing any earlier entry for the key.
    pub fn put(&mut self, key: String, value: String) {
        self.entries.insert(key, Entry::Value(value));
    }

    /// Records a delete, replacing any earlier entry for the key.
    pub fn tombstone(&mut self, key: String) {
        self.entries.insert(key, Entry::Tombstone);
    }

    /// Folds a child overlay into this one.
    ///
    /// Every child entry overwrites the entry for the same key here;
    /// tombstones stay tombstones so they keep hiding the layers below.
    pub fn absorb(&mut self, child: Overlay) {
        self.entries.extend(child.entries);
    }

    /// Looks up the entry for a key in this scope only.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Returns the number of entries, tombstones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the overlay holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of tombstones.
    #[must_use]
    pub fn tombstone_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_tombstone()).count()
    }

    /// Consumes the overlay, yielding its entries in arbitrary order.
    pub fn into_entries(self) -> hash_map::IntoIter<String, Entry> {
        self.entries.into_iter()
    }
}
