//! Chain file loading and validation
//!
//! # Hierarchy
//!
//! A chain is assembled in this order (later overrides earlier):
//! 1. Built-in defaults (no fallback, no steps)
//! 2. The chain file
//! 3. CLI flags (`--fallback`)
//!
//! # Example Chain
//!
//! ```toml
//! fallback = "nobody"
//!
//! [source]
//! value = "my name"
//!
//! [[steps]]
//! op = "then"
//! transform = "uppercase"
//!
//! [[steps]]
//! op = "expect"
//! statement = "create upper-cased string"
//!
//! [[steps]]
//! op = "catch"
//! template = "caught {message}"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Placeholder replaced by the failure message in `catch` templates.
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

// ═══════════════════════════════════════════════════════════════════════════
// CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// Value used through `else_unwrap` when the chain fails.
    #[serde(default)]
    pub fallback: Option<String>,
    pub source: SourceConfig,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// Exactly one of the three fields must be set.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub value: Option<String>,
    pub fail: Option<String>,
    pub panic: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum StepConfig {
    Then {
        transform: Transform,
    },
    TryThen {
        transform: FallibleTransform,
    },
    Expect {
        #[serde(default)]
        statement: String,
    },
    Catch {
        template: String,
    },
}

/// Infallible string mappers usable in `then` steps.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Uppercase,
    Lowercase,
    Trim,
    Reverse,
}

/// Fallible string mappers usable in `try_then` steps.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallibleTransform {
    NonEmpty,
    Ascii,
}

/// The validated head of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Value(String),
    Fail(String),
    Panic(String),
}

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION
// ═══════════════════════════════════════════════════════════════════════════

impl SourceConfig {
    /// Resolve the configured source.
    ///
    /// # Errors
    ///
    /// Returns error unless exactly one of `value`, `fail` or `panic` is set.
    pub fn resolve(&self) -> Result<Source> {
        match (&self.value, &self.fail, &self.panic) {
            (Some(value), None, None) => Ok(Source::Value(value.clone())),
            (None, Some(message), None) => Ok(Source::Fail(message.clone())),
            (None, None, Some(statement)) => Ok(Source::Panic(statement.clone())),
            (None, None, None) => Err(Error::invalid_chain(
                "source needs one of 'value', 'fail' or 'panic'",
            )),
            _ => Err(Error::invalid_chain(
                "source accepts only one of 'value', 'fail' or 'panic'",
            )),
        }
    }
}

impl ChainConfig {
    /// Parse and validate a chain from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or the chain is invalid.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::toml_parse_failed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the chain can be built.
    ///
    /// # Errors
    ///
    /// Returns error if the source is ambiguous or missing.
    pub fn validate(&self) -> Result<()> {
        self.source.resolve().map(|_| ())
    }

    /// Override the fallback, keeping the file's value when `fallback` is `None`.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        if fallback.is_some() {
            self.fallback = fallback;
        }
        self
    }
}

/// Load and validate a chain file.
///
/// # Errors
///
/// Returns error if:
/// - The file cannot be read
/// - The file is malformed TOML
/// - The chain fails validation
pub fn load_chain(path: &Path) -> Result<ChainConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::file_read_failed(path, e.to_string()))?;
    tracing::debug!(path = %path.display(), "Loaded chain file");
    ChainConfig::from_toml_str(&text)
}
