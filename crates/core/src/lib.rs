#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # lazy-result-core
//!
//! Deferred, memoized computations with explicit success/failure propagation.
//!
//! This crate provides:
//! - [`LazyResult`], a computation that runs on first access and caches its outcome
//! - [`Failure`], the failure channel separating ordinary errors from [`Panic`]s
//! - [`OutcomeExt`] combinators for Railway-Oriented Programming
//!
//! ```
//! use lazy_result_core::LazyResult;
//!
//! let name: LazyResult<String, String> = LazyResult::of(|| Err("any error".to_string()));
//! let outcome = name
//!     .then(|name| name.to_uppercase())
//!     .expect("uppercase failed")
//!     .then(|name| name.len())
//!     .expect("length failed")
//!     .unwrap();
//!
//! assert_eq!(outcome.map_err(|f| f.message()), Err("Panicked at uppercase failed".to_string()));
//! ```

pub mod error;
pub mod failure;
pub mod lazy;
pub mod panic;
pub mod result;

// Re-export commonly used items
pub use error::ConstructionError;
pub use failure::Failure;
pub use lazy::{LazyResult, Resolver, State, Thunk};
pub use panic::Panic;
pub use result::{Outcome, OutcomeExt};
