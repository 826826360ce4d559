//! Error types for NestKV core.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// Both kinds are local and recoverable: the store is left exactly as it
/// was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key has no effective value at the current depth.
    #[error("key not found: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// Commit or rollback was requested with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Returns true if this is a `NotFound` error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a `NoActiveTransaction` error.
    #[must_use]
    pub fn is_no_active_transaction(&self) -> bool {
        matches!(self, Self::NoActiveTransaction)
    }
}
