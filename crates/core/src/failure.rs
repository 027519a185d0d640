//! The failure channel of a [`LazyResult`](crate::LazyResult).
//!
//! Ordinary failures and fatal [`Panic`]s travel through the same slot and are
//! told apart by variant, never by inspecting the payload type.

use std::fmt;

use crate::panic::Panic;

/// A failed outcome: either an ordinary failure `E` or a fatal [`Panic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    /// Ordinary, recoverable failure raised or returned by a computation.
    Error(E),
    /// Fatal failure, produced by `expect` or raised directly.
    Panic(Panic),
}

impl<E> Failure<E> {
    /// Wrap an ordinary failure.
    #[must_use]
    pub const fn error(error: E) -> Self {
        Self::Error(error)
    }

    /// Wrap a fatal failure.
    #[must_use]
    pub const fn panic(panic: Panic) -> Self {
        Self::Panic(panic)
    }

    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panic(_))
    }

    #[must_use]
    pub const fn as_panic(&self) -> Option<&Panic> {
        match self {
            Self::Panic(panic) => Some(panic),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub const fn as_error(&self) -> Option<&E> {
        match self {
            Self::Error(error) => Some(error),
            Self::Panic(_) => None,
        }
    }

    /// Consume the failure, returning the ordinary error if there is one.
    #[must_use]
    pub fn into_error(self) -> Option<E> {
        match self {
            Self::Error(error) => Some(error),
            Self::Panic(_) => None,
        }
    }

    /// Map the ordinary failure, leaving panics untouched.
    #[must_use]
    pub fn map_error<F, E2>(self, f: F) -> Failure<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Error(error) => Failure::Error(f(error)),
            Self::Panic(panic) => Failure::Panic(panic),
        }
    }

    /// Human-readable message of the underlying failure.
    #[must_use]
    pub fn message(&self) -> String
    where
        E: fmt::Display,
    {
        self.to_string()
    }
}

impl<E> From<E> for Failure<E> {
    fn from(error: E) -> Self {
        Self::Error(error)
    }
}

impl<E: fmt::Display> fmt::Display for Failure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => fmt::Display::fmt(error, f),
            Self::Panic(panic) => fmt::Display::fmt(panic, f),
        }
    }
}

impl<E> std::error::Error for Failure<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Error(error) => std::error::Error::source(error),
            Self::Panic(panic) => std::error::Error::source(panic),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_message_is_transparent() {
        let failure: Failure<String> = Failure::error("oops".to_string());
        assert_eq!(failure.message(), "oops");

        let failure: Failure<String> = Failure::panic(Panic::new("oops"));
        assert_eq!(failure.message(), "Panicked at oops");
    }

    #[test]
    fn test_variant_accessors() {
        let failure: Failure<&str> = "bad".into();
        assert!(!failure.is_panic());
        assert_eq!(failure.as_error(), Some(&"bad"));
        assert!(failure.as_panic().is_none());
        assert_eq!(failure.into_error(), Some("bad"));

        let failure: Failure<&str> = Failure::panic(Panic::new("x"));
        assert!(failure.is_panic());
        assert!(failure.as_error().is_none());
        assert_eq!(failure.into_error(), None);
    }

    #[test]
    fn test_map_error_keeps_panics() {
        let failure: Failure<&str> = Failure::error("abc");
        assert_eq!(failure.map_error(str::len), Failure::Error(3));

        let failure: Failure<&str> = Failure::panic(Panic::new("p"));
        assert_eq!(failure.map_error(str::len), Failure::Panic(Panic::new("p")));
    }
}
