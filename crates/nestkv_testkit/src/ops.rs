//! Store operations as data.

use nestkv_core::{Store, StoreError};
use std::fmt;

/// One call against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read a key.
    Get {
        /// Key to read.
        key: String,
    },
    /// Write a key.
    Set {
        /// Key to write.
        key: String,
        /// Value to write.
        value: String,
    },
    /// Delete a key.
    Delete {
        /// Key to delete.
        key: String,
    },
    /// Start a transaction.
    Begin,
    /// Commit the innermost transaction.
    Commit,
    /// Roll back the innermost transaction.
    Rollback,
}

impl Operation {
    /// Shorthand for [`Operation::Get`].
    pub fn get(key: impl Into<String>) -> Self {
        Self::Get { key: key.into() }
    }

    /// Shorthand for [`Operation::Set`].
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`Operation::Delete`].
    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get { key } => write!(f, "GET {key}"),
            Self::Set { key, value } => write!(f, "SET {key} {value}"),
            Self::Delete { key } => write!(f, "DELETE {key}"),
            Self::Begin => f.write_str("BEGIN"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
        }
    }
}

/// Observable result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation succeeded with no result.
    Done,
    /// A get returned this value.
    Value(String),
    /// A get found no effective value.
    NotFound,
    /// A commit or rollback was rejected.
    NoActiveTransaction,
}

impl From<StoreError> for Outcome {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::NoActiveTransaction => Self::NoActiveTransaction,
        }
    }
}

/// Applies one operation to a store.
pub fn apply(store: &mut Store, op: &Operation) -> Outcome {
    match op {
        Operation::Get { key } => store.get(key).map_or_else(Outcome::from, Outcome::Value),
        Operation::Set { key, value } => {
            store.set(key.as_str(), value.as_str());
            Outcome::Done
        }
        Operation::Delete { key } => {
            store.delete(key.as_str());
            Outcome::Done
        }
        Operation::Begin => {
            store.start_transaction();
            Outcome::Done
        }
        Operation::Commit => store.commit().map_or_else(Outcome::from, |()| Outcome::Done),
        Operation::Rollback => store
            .rollback()
            .map_or_else(Outcome::from, |()| Outcome::Done),
    }
}

/// Applies a sequence of operations, returning every outcome in order.
pub fn apply_all(store: &mut Store, ops: &[Operation]) -> Vec<Outcome> {
    ops.iter().map(|op| apply(store, op)).collect()
}
