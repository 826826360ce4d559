//! # NestKV Testkit
//!
//! Test utilities for NestKV.
//!
//! This crate provides:
//! - Operation types and a driver that applies them to a [`Store`](nestkv_core::Store)
//! - A reference model of the nested transaction semantics
//! - Property-based test generators using proptest
//! - Fixtures for the canonical transaction scenarios
//! - Stress testing utilities for [`SharedStore`](nestkv_core::SharedStore)
//!
//! ## Usage
//!
//! ```rust
//! use nestkv_testkit::prelude::*;
//!
//! for scenario in scenarios::all() {
//!     scenario.run();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod ops;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::ops::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use ops::*;
pub use stress::*;
