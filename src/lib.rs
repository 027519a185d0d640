#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # lazy-result
//!
//! Deferred, memoized results with explicit failure propagation.
//!
//! This library re-exports the core crate and adds chain files: TOML
//! descriptions of `then`/`try_then`/`expect`/`catch` chains that the
//! `lazy-result` binary evaluates.

// Re-export the core crate
pub use lazy_result_core;
pub use lazy_result_core::{Failure, LazyResult, Panic};

pub mod chain;
pub mod config;
pub mod error;

pub use error::{Error, Result};
