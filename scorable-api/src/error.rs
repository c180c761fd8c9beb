//! Error types for the scoring contract

use std::error::Error as StdError;

use thiserror::Error;

/// Errors `rescore` raises to its caller.
///
/// Both variants carry a human-readable message, translated through the
/// host's `i18n` service when one is available. A third failure mode,
/// an error from `calculate_score`, is deliberately not represented here:
/// it is swallowed, reported through a `rescore_failure` audit event, and
/// surfaced as an `Ok(false)` return so that one broken unit cannot abort
/// a batch rescoring run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RescoreError {
    /// The unit's configuration forbids rescoring (`allows_rescore` is false)
    #[error("{0}")]
    NotSupported(String),

    /// The unit has no persisted score to rescore (never answered)
    #[error("{0}")]
    InvalidState(String),
}

/// Error produced by a unit's `calculate_score`.
///
/// Implementation-defined: units decide what counts as a calculation
/// failure. The contract never inspects the error beyond logging it.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CalculationError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl CalculationError {
    /// Create a calculation error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a calculation error wrapping an underlying error
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
