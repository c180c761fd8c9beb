//! Score value type
//!
//! A [`Score`] is the pair of points a learner earned and the maximum they
//! could have earned. Scores are plain values: the contract never stores
//! them, it only moves them between a unit's accessors and the host's
//! event sink.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Points earned and maximum achievable points for a gradable unit.
///
/// # Ordering
///
/// `Score` compares lexicographically: `earned` first, then `total`. This is
/// the comparison `rescore(only_if_higher = true)` uses, and it is
/// deliberately not a percentage comparison. A score of `(1.0, 3.0)` is
/// greater than `(1.0, 2.0)` even though its ratio is lower, and
/// `(0.5, 10.0)` is less than `(1.0, 4.0)` even though its scale is larger.
/// Downstream consumers depend on these semantics.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score {
    /// Points actually awarded. Non-negative.
    pub earned: f64,
    /// Maximum achievable points. Positive.
    pub total: f64,
}

/// A score whose fields fall outside the valid range.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid score: earned {earned}, total {total}")]
pub struct InvalidScore {
    /// The rejected `earned` value
    pub earned: f64,
    /// The rejected `total` value
    pub total: f64,
}

impl Score {
    /// Create a score, rejecting values outside the valid range.
    ///
    /// `earned` must be finite and non-negative; `total` must be finite and
    /// positive. Units that validate elsewhere may construct the struct
    /// directly instead.
    pub fn new(earned: f64, total: f64) -> Result<Self, InvalidScore> {
        if earned.is_finite() && total.is_finite() && earned >= 0.0 && total > 0.0 {
            Ok(Self { earned, total })
        } else {
            Err(InvalidScore { earned, total })
        }
    }

    /// Fraction of available points earned.
    ///
    /// Convenience for hosts; the rescore decision never looks at it.
    pub fn ratio(&self) -> f64 {
        self.earned / self.total
    }

    /// The `{earned, total}` JSON object used in audit event payloads.
    pub fn to_json(&self) -> Value {
        json!({
            "earned": self.earned,
            "total": self.total,
        })
    }

}
