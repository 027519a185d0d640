//! Construction-time errors.
//!
//! Everything about a [`LazyResult`](crate::LazyResult) is deferred except the
//! check that its computation can be invoked at all.

use thiserror::Error;

/// Error raised eagerly while building a lazy result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The supplied value is not a computation this container can run.
    #[error("Function is expected!")]
    NotInvocable {
        /// Type name of what the caller actually expected to be invocable.
        expected: &'static str,
    },
}

impl ConstructionError {
    /// Create a not-invocable error for the expected computation type.
    #[must_use]
    pub const fn not_invocable(expected: &'static str) -> Self {
        Self::NotInvocable { expected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_invocable_message() {
        let err = ConstructionError::not_invocable("Box<dyn FnOnce()>");
        assert_eq!(err.to_string(), "Function is expected!");
        assert!(matches!(
            err,
            ConstructionError::NotInvocable { expected: "Box<dyn FnOnce()>" }
        ));
    }
}
