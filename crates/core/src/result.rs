//! Outcome type and extension traits for Railway-Oriented Programming.
//!
//! An [`Outcome`] is what a lazy result resolves to. The combinators here let
//! callers observe and discard failures without unwrap/expect/panic.

use std::fmt::Display;

use crate::failure::Failure;
use crate::panic::Panic;

/// The resolved value of a lazy result: a success `X` or a [`Failure<E>`].
///
/// # Examples
///
/// ```
/// use lazy_result_core::{Failure, Outcome, OutcomeExt};
///
/// let outcome: Outcome<i32, String> = Err(Failure::error("boom".to_string()));
/// assert_eq!(outcome.or_else_logged(|| 7), 7);
/// ```
pub type Outcome<X, E> = Result<X, Failure<E>>;

/// Extension trait providing logged fallbacks and inspection for outcomes.
pub trait OutcomeExt<X, E> {
    /// Convert to an Option, logging the failure if present.
    fn ok_logged(self) -> Option<X>;

    /// Get the value or the fallback, logging the failure if present.
    fn or_else_logged<F: FnOnce() -> X>(self, fallback: F) -> X;

    /// Inspect the failure without consuming the outcome.
    fn inspect_failure<F: FnOnce(&Failure<E>)>(self, f: F) -> Self;

    /// Inspect a fatal failure without consuming the outcome.
    fn inspect_panic<F: FnOnce(&Panic)>(self, f: F) -> Self;
}

impl<X, E: Display> OutcomeExt<X, E> for Outcome<X, E> {
    fn ok_logged(self) -> Option<X> {
        match self {
            Ok(value) => Some(value),
            Err(failure) => {
                tracing::error!(panic = failure.is_panic(), "Lazy result failed: {}", failure);
                None
            }
        }
    }

    fn or_else_logged<F: FnOnce() -> X>(self, fallback: F) -> X {
        match self {
            Ok(value) => value,
            Err(failure) => {
                tracing::warn!(
                    panic = failure.is_panic(),
                    "Lazy result failed, using fallback: {}",
                    failure
                );
                fallback()
            }
        }
    }

    fn inspect_failure<F: FnOnce(&Failure<E>)>(self, f: F) -> Self {
        if let Err(ref failure) = self {
            f(failure);
        }
        self
    }

    fn inspect_panic<F: FnOnce(&Panic)>(self, f: F) -> Self {
        if let Err(Failure::Panic(ref panic)) = self {
            f(panic);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_ok_logged_success() {
        let outcome: Outcome<i32, String> = Ok(42);
        assert_eq!(outcome.ok_logged(), Some(42));
    }

    #[test]
    fn test_ok_logged_failure() {
        let outcome: Outcome<i32, String> = Err(Failure::error("test".into()));
        assert_eq!(outcome.ok_logged(), None);
    }

    #[test]
    fn test_or_else_logged_skips_fallback_on_success() {
        let mut called = false;
        let outcome: Outcome<i32, String> = Ok(42);
        let value = outcome.or_else_logged(|| {
            called = true;
            0
        });
        assert_eq!(value, 42);
        assert!(!called);
    }

    #[test]
    fn test_or_else_logged_panic_uses_fallback() {
        let outcome: Outcome<i32, String> = Err(Failure::panic(Panic::new("x")));
        assert_eq!(outcome.or_else_logged(|| 99), 99);
    }

    #[test]
    fn test_inspect_failure() {
        let mut observed = String::new();
        let outcome: Outcome<i32, String> = Err(Failure::error("bad".into()));
        let _ = outcome.inspect_failure(|f| observed = f.message());
        assert_eq!(observed, "bad");
    }

    #[test]
    fn test_inspect_panic_ignores_ordinary_failures() {
        let mut hits = 0;
        let ordinary: Outcome<i32, String> = Err(Failure::error("bad".into()));
        let _ = ordinary.inspect_panic(|_| hits += 1);
        let fatal: Outcome<i32, String> = Err(Failure::panic(Panic::new("bad")));
        let _ = fatal.inspect_panic(|_| hits += 1);
        assert_eq!(hits, 1);
    }
}
