//! Event names and payload shapes
//!
//! Field names and tag strings here are consumed by downstream gradebook
//! and analytics systems and must not change. The payload builders produce
//! fresh `serde_json` maps; caller-owned data is never mutated, and when a
//! caller-supplied payload is merged with the unit's base context the
//! caller's keys win.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::score::Score;

/// Event name for grade records consumed by the host's gradebook.
pub const GRADE: &str = "grade";

/// Event name for audit records on rescore failure paths.
pub const RESCORE_FAILURE: &str = "rescore_failure";

/// Event name for audit records on rescore decision paths.
pub const RESCORE_RESULT: &str = "rescore_result";

/// Why a rescore attempt failed, as recorded in `rescore_failure` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// The unit's configuration forbids rescoring
    #[serde(rename = "unsupported")]
    Unsupported,
    /// No persisted score exists to rescore
    #[serde(rename = "unanswered")]
    Unanswered,
    /// The unit's score calculation returned an error
    #[serde(rename = "calculation error")]
    Calculation,
}

impl FailureReason {
    /// The tag string written into the `failure` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsupported => "unsupported",
            Self::Unanswered => "unanswered",
            Self::Calculation => "calculation error",
        }
    }
}

/// Outcome of a completed rescore decision, as recorded in
/// `rescore_result` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    /// A new score was persisted
    #[serde(rename = "score updated")]
    ScoreUpdated,
    /// The calculated score did not beat the original; nothing persisted
    #[serde(rename = "score not changed")]
    ScoreNotChanged,
}

impl ResultKind {
    /// The tag string written into the `result` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScoreUpdated => "score updated",
            Self::ScoreNotChanged => "score not changed",
        }
    }
}

/// Grade record published to the host gradebook.
///
/// Serializes to `{value, max_value}` with `only_if_higher` included only
/// when set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Points earned
    pub value: f64,
    /// Maximum achievable points
    pub max_value: f64,
    /// The `only_if_higher` flag the triggering rescore was invoked with,
    /// when it was invoked with one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_if_higher: Option<bool>,
}

impl GradeRecord {
    /// Build a grade record from a persisted score.
    pub fn from_score(score: Score, only_if_higher: Option<bool>) -> Self {
        Self {
            value: score.earned,
            max_value: score.total,
            only_if_higher,
        }
    }

    /// The record as an event payload map.
    pub fn into_payload(self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("value".to_string(), json!(self.value));
        payload.insert("max_value".to_string(), json!(self.max_value));
        if let Some(flag) = self.only_if_higher {
            payload.insert("only_if_higher".to_string(), json!(flag));
        }
        payload
    }
}

/// Payload for a `rescore_failure` audit event, before unit context is
/// merged in.
pub fn failure_payload(reason: FailureReason) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("failure".to_string(), json!(reason.as_str()));
    payload
}

/// Payload for a `rescore_result` audit event, before unit context is
/// merged in.
pub fn result_payload(kind: ResultKind, original: Score, new: Score) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("result".to_string(), json!(kind.as_str()));
    payload.insert("original_score".to_string(), original.to_json());
    payload.insert("new_score".to_string(), new.to_json());
    payload
}

/// Merge a unit's base event context underneath a payload.
///
/// Returns a new map; `payload` is left untouched. Base context currently
/// consists of the unit's `usage_key`. Keys already present in `payload`
/// take precedence over base context.
pub fn with_unit_context(payload: &Map<String, Value>, usage_key: &str) -> Map<String, Value> {
    let mut merged = Map::new();
    merged.insert("usage_key".to_string(), json!(usage_key));
    for (key, value) in payload {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
