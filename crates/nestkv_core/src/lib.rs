//! # NestKV Core
//!
//! In-memory string key-value store with nested transactions.
//!
//! This crate provides:
//! - [`Store`], the transactional overlay engine
//! - [`SharedStore`], a lock-protected handle for use across threads
//! - Operation counters via [`StatsSnapshot`]
//!
//! All data lives in process memory and is lost when the store is dropped.
//!
//! ## Example
//!
//! ```rust
//! use nestkv_core::Store;
//!
//! let mut store = Store::new();
//! store.set("k", "v1");
//! store.start_transaction();
//! store.set("k", "v2");
//! store.start_transaction();
//! store.delete("k");
//! store.rollback().unwrap();
//! store.commit().unwrap();
//!
//! assert_eq!(store.get("k").unwrap(), "v2");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod overlay;
mod shared;
mod stats;
mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use overlay::{Entry, Overlay};
pub use shared::SharedStore;
pub use stats::StatsSnapshot;
pub use store::Store;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
