//! Builds lazy result chains from chain files and evaluates them.

use lazy_result_core::{Failure, LazyResult, OutcomeExt, Panic};
use serde::Serialize;
use thiserror::Error;

use crate::config::{
    ChainConfig, FallibleTransform, MESSAGE_PLACEHOLDER, Source, StepConfig, Transform,
};
use crate::error::Result;

/// Ordinary failure raised by a chain source or a fallible step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StepFailure {
    message: String,
}

impl StepFailure {
    /// Create a step failure carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A chain of string-producing links.
pub type Chain = LazyResult<String, StepFailure>;

/// What a chain resolved to, in a form fit for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub value: Option<String>,
    pub error: Option<String>,
    pub panic: bool,
}

impl Evaluation {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.value.is_some()
    }

    /// Encode the evaluation as a single-line JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Transform {
    #[must_use]
    pub fn apply(self, value: String) -> String {
        match self {
            Self::Uppercase => value.to_uppercase(),
            Self::Lowercase => value.to_lowercase(),
            Self::Trim => value.trim().to_string(),
            Self::Reverse => value.chars().rev().collect(),
        }
    }
}

impl FallibleTransform {
    /// Apply the transform.
    ///
    /// # Errors
    ///
    /// Returns a [`StepFailure`] when the value does not qualify.
    pub fn apply(self, value: String) -> std::result::Result<String, StepFailure> {
        match self {
            Self::NonEmpty if value.is_empty() => Err(StepFailure::new("empty value")),
            Self::Ascii if !value.is_ascii() => {
                Err(StepFailure::new(format!("non-ascii value: {value}")))
            }
            Self::NonEmpty | Self::Ascii => Ok(value),
        }
    }
}

/// Build the lazy chain a config describes. Nothing is evaluated.
///
/// # Errors
///
/// Returns error if the config's source is invalid.
pub fn build(config: &ChainConfig) -> Result<Chain> {
    let head = match config.source.resolve()? {
        Source::Value(value) => Chain::ok(value),
        Source::Fail(message) => Chain::err(StepFailure::new(message)),
        Source::Panic(statement) => {
            Chain::from_fn(move || Err(Failure::Panic(Panic::new(statement))))
        }
    };
    Ok(config.steps.iter().cloned().fold(head, apply_step))
}

fn apply_step(chain: Chain, step: StepConfig) -> Chain {
    match step {
        StepConfig::Then { transform } => chain.then(move |value| transform.apply(value)),
        StepConfig::TryThen { transform } => chain.try_then(move |value| transform.apply(value)),
        StepConfig::Expect { statement } => chain.expect(statement),
        StepConfig::Catch { template } => {
            chain.catch(move |failure| template.replace(MESSAGE_PLACEHOLDER, &failure.message()))
        }
    }
}

/// Build and evaluate a chain, falling back when the config says so.
///
/// # Errors
///
/// Returns error if the chain cannot be built. Failures of the chain itself
/// are reported in the [`Evaluation`].
pub fn evaluate(config: &ChainConfig) -> Result<Evaluation> {
    let chain = build(config)?;

    if let Some(fallback) = &config.fallback {
        let value = chain.else_unwrap(|| fallback.clone());
        return Ok(Evaluation {
            value: Some(value),
            error: None,
            panic: false,
        });
    }

    let outcome = chain
        .into_result()
        .inspect_panic(|panic| tracing::warn!(statement = panic.statement(), "Chain panicked"))
        .inspect_failure(|failure| tracing::info!("Chain failed: {}", failure));

    Ok(match outcome {
        Ok(value) => Evaluation {
            value: Some(value),
            error: None,
            panic: false,
        },
        Err(failure) => Evaluation {
            value: None,
            error: Some(failure.message()),
            panic: failure.is_panic(),
        },
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use lazy_result_core::State;

    use super::*;
    use crate::config::SourceConfig;

    fn chain_of(source: SourceConfig, steps: Vec<StepConfig>) -> ChainConfig {
        ChainConfig {
            fallback: None,
            source,
            steps,
        }
    }

    fn value(v: &str) -> SourceConfig {
        SourceConfig {
            value: Some(v.into()),
            ..SourceConfig::default()
        }
    }

    fn fail(message: &str) -> SourceConfig {
        SourceConfig {
            fail: Some(message.into()),
            ..SourceConfig::default()
        }
    }

    #[test]
    fn test_build_is_lazy() {
        let chain = build(&chain_of(value("x"), vec![])).unwrap();
        assert_eq!(chain.state(), State::Uncomputed);
    }

    #[test]
    fn test_step_failure_displays_message() {
        let failure = StepFailure::new("empty value");
        assert_eq!(failure.to_string(), "empty value");
        assert_eq!(Failure::error(failure).message(), "empty value");
    }

    #[test]
    fn test_transforms() {
        assert_eq!(Transform::Uppercase.apply("ab".into()), "AB");
        assert_eq!(Transform::Lowercase.apply("AB".into()), "ab");
        assert_eq!(Transform::Trim.apply("  ab ".into()), "ab");
        assert_eq!(Transform::Reverse.apply("abc".into()), "cba");
        assert_eq!(FallibleTransform::NonEmpty.apply(String::new()), Err(StepFailure::new("empty value")));
        assert_eq!(FallibleTransform::Ascii.apply("ok".into()), Ok("ok".to_string()));
        assert!(FallibleTransform::Ascii.apply("é".into()).is_err());
    }

    #[test]
    fn test_evaluate_success() {
        let config = chain_of(
            value("my name"),
            vec![
                StepConfig::Then { transform: Transform::Uppercase },
                StepConfig::Expect { statement: "upper".into() },
            ],
        );
        let evaluation = evaluate(&config).unwrap();
        assert_eq!(evaluation.value.as_deref(), Some("MY NAME"));
        assert!(evaluation.is_success());
    }

    #[test]
    fn test_evaluate_expect_then_catch() {
        let config = chain_of(
            fail("oops"),
            vec![
                StepConfig::Expect { statement: "step1".into() },
                StepConfig::Catch { template: "caught {message}".into() },
            ],
        );
        let evaluation = evaluate(&config).unwrap();
        assert_eq!(evaluation.value.as_deref(), Some("caught Panicked at step1"));
    }

    #[test]
    fn test_evaluate_reports_panic() {
        let config = chain_of(
            value(""),
            vec![
                StepConfig::TryThen { transform: FallibleTransform::NonEmpty },
                StepConfig::Expect { statement: "non-empty name".into() },
                StepConfig::Then { transform: Transform::Uppercase },
                StepConfig::Expect { statement: "later".into() },
            ],
        );
        let evaluation = evaluate(&config).unwrap();
        assert_eq!(
            evaluation,
            Evaluation {
                value: None,
                error: Some("Panicked at non-empty name".into()),
                panic: true,
            }
        );
    }

    #[test]
    fn test_evaluation_to_json() {
        let config = chain_of(
            value("oops"),
            vec![
                StepConfig::TryThen { transform: FallibleTransform::Ascii },
                StepConfig::Then { transform: Transform::Reverse },
            ],
        );
        let json = evaluate(&config).unwrap().to_json().unwrap();
        assert_eq!(json, r#"{"value":"spoo","error":null,"panic":false}"#);

        let failed = Evaluation {
            value: None,
            error: Some("Panicked at step1".into()),
            panic: true,
        };
        assert_eq!(
            failed.to_json().unwrap(),
            r#"{"value":null,"error":"Panicked at step1","panic":true}"#
        );
    }

    #[test]
    fn test_evaluate_with_fallback() {
        let config = chain_of(fail("oops"), vec![]).with_fallback(Some("other".into()));
        let evaluation = evaluate(&config).unwrap();
        assert_eq!(evaluation.value.as_deref(), Some("other"));
    }
}
