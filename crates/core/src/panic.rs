//! Fatal failure kind produced by [`LazyResult::expect`](crate::LazyResult::expect).

use std::sync::Arc;

use thiserror::Error;

/// Shared, type-erased cause wrapped by a [`Panic`].
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A failure marking something that was assumed infallible.
///
/// The message is fixed at construction as `"Panicked at " + statement`.
/// A `Panic` is a severity label, not an uncatchable signal: `catch` and
/// `else_unwrap` intercept it like any other failure.
#[derive(Debug, Clone, Error)]
#[error("Panicked at {statement}")]
pub struct Panic {
    statement: String,
    #[source]
    cause: Option<Cause>,
}

impl Panic {
    /// Create a panic for the given expectation statement.
    #[must_use]
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            cause: None,
        }
    }

    /// Attach the failure that broke the expectation.
    #[must_use]
    pub fn with_cause<C>(mut self, cause: C) -> Self
    where
        C: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let cause: Box<dyn std::error::Error + Send + Sync> = cause.into();
        self.cause = Some(Arc::from(cause));
        self
    }

    /// The caller-supplied expectation statement.
    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// The full message, `"Panicked at " + statement`.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The wrapped original failure, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl PartialEq for Panic {
    fn eq(&self, other: &Self) -> bool {
        self.statement == other.statement
    }
}

impl Eq for Panic {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use std::error::Error as _;

    use super::*;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct Fire;

    #[test]
    fn test_message_prefixes_statement() {
        let panic = Panic::new("reading config");
        assert_eq!(panic.message(), "Panicked at reading config");
        assert_eq!(panic.statement(), "reading config");
    }

    #[test]
    fn test_empty_statement() {
        assert_eq!(Panic::new("").to_string(), "Panicked at ");
    }

    #[test]
    fn test_cause_is_exposed_as_source() {
        let panic = Panic::new("step").with_cause(Fire);
        assert_eq!(panic.source().map(ToString::to_string), Some("disk on fire".to_string()));
        assert!(panic.cause().is_some());
        assert!(Panic::new("step").source().is_none());
    }

    #[test]
    fn test_plain_string_cause() {
        let panic = Panic::new("step").with_cause("bare message");
        assert_eq!(panic.source().map(ToString::to_string), Some("bare message".to_string()));
    }

    #[test]
    fn test_equality_ignores_cause() {
        assert_eq!(Panic::new("a").with_cause(Fire), Panic::new("a"));
        assert_ne!(Panic::new("a"), Panic::new("b"));
    }
}
