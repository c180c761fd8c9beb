//! scorable-api - scoring contract for gradable units
//!
//! This crate defines the capability a gradable unit (a problem, quiz, or
//! any machine-graded content component) implements so the host runtime can
//! score it and rescore it after a grading policy or algorithm change. The
//! unit owns its persisted score and its score calculation; the contract
//! owns the rescore orchestration: the ordered checks, the comparison, the
//! conditional persistence, and the grade/audit events, identical across
//! every unit type.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use scorable_api::{CalculationError, Runtime, ScorableUnit, Score};
//! use scorable_api::mock::RecordingRuntime;
//!
//! struct Quiz {
//!     runtime: Arc<RecordingRuntime>,
//!     score: Option<Score>,
//! }
//!
//! impl ScorableUnit for Quiz {
//!     fn usage_key(&self) -> &str {
//!         "quiz-1"
//!     }
//!
//!     fn runtime(&self) -> &dyn Runtime {
//!         self.runtime.as_ref()
//!     }
//!
//!     fn get_score(&self) -> Option<Score> {
//!         self.score
//!     }
//!
//!     fn set_score(&mut self, score: Score) {
//!         self.score = Some(score);
//!     }
//!
//!     fn calculate_score(&self) -> Result<Score, CalculationError> {
//!         Ok(Score { earned: 1.6, total: 2.0 })
//!     }
//! }
//!
//! let runtime = Arc::new(RecordingRuntime::new());
//! let mut quiz = Quiz {
//!     runtime: Arc::clone(&runtime),
//!     score: Some(Score { earned: 0.0, total: 1.0 }),
//! };
//!
//! assert!(quiz.rescore(false).unwrap());
//! assert_eq!(quiz.get_score(), Some(Score { earned: 1.6, total: 2.0 }));
//! // One grade record plus one audit event.
//! assert_eq!(runtime.published().len(), 2);
//! ```

pub mod error;
pub mod event;
pub mod mock;
pub mod runtime;
pub mod score;

pub use error::{CalculationError, RescoreError};
pub use event::{FailureReason, GRADE, GradeRecord, RESCORE_FAILURE, RESCORE_RESULT, ResultKind};
pub use runtime::{I18N_SERVICE, Runtime, Translator};
pub use score::{InvalidScore, Score};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Capability a gradable unit implements to support scoring and rescoring.
///
/// Units supply the accessors and the calculation; the trait supplies the
/// rescore orchestration and the default rescore policy. `rescore` is a
/// plain synchronous call with no suspension points; the contract defines
/// no cross-call atomicity, so a host that rescores the same unit
/// concurrently must serialize access to its persisted score itself.
///
/// # Object Safety
///
/// This trait is object-safe, allowing `Box<dyn ScorableUnit>`.
pub trait ScorableUnit {
    /// Stable opaque identifier for this unit in the host content tree.
    ///
    /// Stamped on every audit event as `usage_key`.
    fn usage_key(&self) -> &str;

    /// Handle to the host runtime this unit lives in.
    fn runtime(&self) -> &dyn Runtime;

    /// The currently persisted score, or `None` if the unit has never been
    /// evaluated (e.g. the learner has not submitted an answer).
    ///
    /// Must not trigger a calculation.
    fn get_score(&self) -> Option<Score>;

    /// Persist `score` as the unit's current score.
    fn set_score(&mut self, score: Score);

    /// Calculate what the score would be from the unit's stored state,
    /// without mutating anything.
    fn calculate_score(&self) -> Result<Score, CalculationError>;

    /// Whether this unit currently supports rescoring.
    ///
    /// Defaults to `true`. Override to return `false` for units that must
    /// not be regraded, e.g. randomized one-shot problems.
    fn allows_rescore(&self) -> bool {
        true
    }

    /// Calculate a new score and persist it.
    ///
    /// With `only_if_higher` set, the new score is persisted only when it
    /// compares strictly greater than the original (lexicographically on
    /// `(earned, total)`, see [`Score`]).
    ///
    /// Returns `Ok(true)` when a new score was persisted and `Ok(false)`
    /// when the score was left untouched. An error from
    /// [`calculate_score`](Self::calculate_score) is not propagated: it is
    /// reported through a `rescore_failure` audit event and folded into
    /// `Ok(false)`, so one broken unit does not abort a batch rescore.
    ///
    /// # Errors
    ///
    /// - [`RescoreError::NotSupported`] when
    ///   [`allows_rescore`](Self::allows_rescore) is `false`.
    /// - [`RescoreError::InvalidState`] when no score has been persisted
    ///   yet.
    ///
    /// Every call publishes exactly one audit event; persisting calls
    /// additionally publish one grade record before it.
    fn rescore(&mut self, only_if_higher: bool) -> Result<bool, RescoreError> {
        if !self.allows_rescore() {
            publish_failure(self, FailureReason::Unsupported);
            warn!(usage_key = %self.usage_key(), "rescore requested on unit that forbids it");
            return Err(RescoreError::NotSupported(runtime::gettext(
                self.runtime(),
                "Problem does not support rescoring",
            )));
        }

        let Some(original_score) = self.get_score() else {
            publish_failure(self, FailureReason::Unanswered);
            warn!(usage_key = %self.usage_key(), "rescore requested on unanswered unit");
            return Err(RescoreError::InvalidState(runtime::gettext(
                self.runtime(),
                "Problem must be answered before it can be rescored.",
            )));
        };

        let new_score = match self.calculate_score() {
            Ok(score) => score,
            Err(err) => {
                publish_failure(self, FailureReason::Calculation);
                warn!(
                    usage_key = %self.usage_key(),
                    error = %err,
                    "score calculation failed; keeping existing score"
                );
                return Ok(false);
            }
        };

        if !only_if_higher || new_score > original_score {
            self.set_score(new_score);
            publish_grade(self, new_score, Some(only_if_higher));
            publish_result(self, ResultKind::ScoreUpdated, original_score, new_score);
            info!(
                usage_key = %self.usage_key(),
                earned = new_score.earned,
                total = new_score.total,
                "score updated"
            );
            Ok(true)
        } else {
            publish_result(self, ResultKind::ScoreNotChanged, original_score, new_score);
            debug!(
                usage_key = %self.usage_key(),
                earned = new_score.earned,
                total = new_score.total,
                "calculated score did not beat original; score not changed"
            );
            Ok(false)
        }
    }
}

/// Publish a grade record for a just-persisted score.
fn publish_grade<U>(unit: &U, score: Score, only_if_higher: Option<bool>)
where
    U: ScorableUnit + ?Sized,
{
    let record = GradeRecord::from_score(score, only_if_higher);
    unit.runtime().publish(GRADE, record.into_payload());
}

/// Publish a scoring audit event with the unit's base context merged in.
fn publish_scoring_event<U>(unit: &U, event_name: &str, payload: Map<String, Value>)
where
    U: ScorableUnit + ?Sized,
{
    let stamped = event::with_unit_context(&payload, unit.usage_key());
    unit.runtime().publish(event_name, stamped);
}

fn publish_failure<U>(unit: &U, reason: FailureReason)
where
    U: ScorableUnit + ?Sized,
{
    publish_scoring_event(unit, RESCORE_FAILURE, event::failure_payload(reason));
}

fn publish_result<U>(unit: &U, kind: ResultKind, original: Score, new: Score)
where
    U: ScorableUnit + ?Sized,
{
    publish_scoring_event(unit, RESCORE_RESULT, event::result_payload(kind, original, new));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingRuntime;
    use std::sync::Arc;

    struct MinimalUnit {
        runtime: Arc<RecordingRuntime>,
        score: Option<Score>,
    }

    impl ScorableUnit for MinimalUnit {
        fn usage_key(&self) -> &str {
            "minimal"
        }

        fn runtime(&self) -> &dyn Runtime {
            self.runtime.as_ref()
        }

        fn get_score(&self) -> Option<Score> {
            self.score
        }

        fn set_score(&mut self, score: Score) {
            self.score = Some(score);
        }

        fn calculate_score(&self) -> Result<Score, CalculationError> {
            Ok(Score { earned: 1.0, total: 1.0 })
        }
    }

    #[test]
    fn test_trait_is_object_safe() {
        // This compiles only if ScorableUnit is object-safe
        fn _takes_boxed_unit(_: Box<dyn ScorableUnit>) {}
    }

    #[test]
    fn test_allows_rescore_defaults_to_true() {
        let unit = MinimalUnit {
            runtime: Arc::new(RecordingRuntime::new()),
            score: None,
        };
        assert!(unit.allows_rescore());
    }

    #[test]
    fn test_rescore_through_trait_object() {
        let runtime = Arc::new(RecordingRuntime::new());
        let mut unit: Box<dyn ScorableUnit> = Box::new(MinimalUnit {
            runtime: Arc::clone(&runtime),
            score: Some(Score { earned: 0.0, total: 1.0 }),
        });

        assert_eq!(unit.rescore(false), Ok(true));
        assert_eq!(unit.get_score(), Some(Score { earned: 1.0, total: 1.0 }));
    }
}
