//! Shared value and result types.
//!
//! Extracted payloads are kept as loosely-typed JSON maps because the
//! upstream model is not schema-enforced: keys may be missing, extra
//! keys may appear, and values arrive as strings or null with the
//! occasional nested object for grid rows. The accessors here fold all
//! of that into total, non-panicking reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One extracted section payload: field name to extracted value.
///
/// Absent or not-applicable values are `null`, never silently omitted,
/// though that is best-effort on the model's side.
pub type FieldMap = serde_json::Map<String, Value>;

/// Renders a JSON value the way a reviewer reads it: strings verbatim,
/// `null` as empty, everything else via its JSON rendering.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text of a field, treating a missing key the same as `null`.
#[must_use]
pub fn field_text(map: &FieldMap, key: &str) -> String {
    map.get(key).map(value_text).unwrap_or_default()
}

/// Borrowed string value of a field, when it is a non-null string.
#[must_use]
pub fn field_str<'a>(map: &'a FieldMap, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// The `subject` row of a grid-section payload.
#[must_use]
pub fn grid_subject(map: &FieldMap) -> Option<&FieldMap> {
    map.get("subject").and_then(Value::as_object)
}

/// The `comparables` rows of a grid-section payload, in document order.
/// Non-object entries are dropped rather than surfaced.
#[must_use]
pub fn grid_comparables(map: &FieldMap) -> Vec<&FieldMap> {
    map.get("comparables")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

/// Outcome of one reconciliation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    Passed,
    Failed,
    /// Informational finding, neither pass nor fail
    Info,
    /// The check could not run, e.g. a source document was missing
    Skipped,
    /// The check does not apply to this report type
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl CheckStatus {
    /// True only for findings a reviewer must act on.
    #[inline]
    #[must_use = "failure status drives report escalation"]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Info => "Info",
            Self::Skipped => "Skipped",
            Self::NotApplicable => "N/A",
        };
        write!(f, "{label}")
    }
}

/// Atomic unit of reconciliation output. Immutable once created;
/// workflows append these to an ordered result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn new(
        check: impl Into<String>,
        status: CheckStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check: check.into(),
            status,
            message: message.into(),
        }
    }

    pub fn passed(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Passed, message)
    }

    pub fn failed(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Failed, message)
    }

    pub fn info(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Info, message)
    }

    pub fn skipped(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Skipped, message)
    }

    pub fn not_applicable(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::NotApplicable, message)
    }
}

/// One field-level comparison between two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub field: String,
    pub value_a: Value,
    pub value_b: Value,
    #[serde(rename = "match")]
    pub matched: bool,
    /// Two-column line diff of the compared values; present only on
    /// mismatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Lifecycle of one workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    Pending,
    Extracting,
    Validating,
    Complete,
    Failed,
}

impl ReviewState {
    /// Legal successor states. Failure is reachable from any live
    /// state; completed runs never move again.
    #[must_use]
    pub const fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Extracting)
                | (Self::Extracting, Self::Validating)
                | (Self::Extracting, Self::Failed)
                | (Self::Validating, Self::Complete)
                | (Self::Validating, Self::Failed)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Extracting => "extracting",
            Self::Validating => "validating",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_map() -> FieldMap {
        let value = json!({
            "Borrower": "John Doe",
            "FHA": null,
            "R.E. Taxes $": 4200,
        });
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn field_text_folds_null_and_missing_to_empty() {
        let map = sample_map();
        assert_eq!(field_text(&map, "Borrower"), "John Doe");
        assert_eq!(field_text(&map, "FHA"), "");
        assert_eq!(field_text(&map, "No Such Field"), "");
        assert_eq!(field_text(&map, "R.E. Taxes $"), "4200");
    }

    #[test]
    fn field_str_only_returns_real_strings() {
        let map = sample_map();
        assert_eq!(field_str(&map, "Borrower"), Some("John Doe"));
        assert_eq!(field_str(&map, "FHA"), None);
        assert_eq!(field_str(&map, "R.E. Taxes $"), None);
    }

    #[test]
    fn grid_accessors_keep_document_order() {
        let value = json!({
            "subject": { "Address": "123 Main St" },
            "comparables": [
                { "Address": "456 Oak Ave" },
                "not a row",
                { "Address": "789 Pine Ln" },
            ],
            "Indicated Value by Sales Comparison Approach": "550,000",
        });
        let map = value.as_object().cloned().unwrap();
        let subject = grid_subject(&map).unwrap();
        assert_eq!(field_text(subject, "Address"), "123 Main St");
        let comps = grid_comparables(&map);
        assert_eq!(comps.len(), 2);
        assert_eq!(field_text(comps[0], "Address"), "456 Oak Ave");
        assert_eq!(field_text(comps[1], "Address"), "789 Pine Ln");
    }

    #[test]
    fn check_status_serializes_like_its_label() {
        for status in [
            CheckStatus::Passed,
            CheckStatus::Failed,
            CheckStatus::Info,
            CheckStatus::Skipped,
            CheckStatus::NotApplicable,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn comparison_row_omits_absent_diff() {
        let row = ComparisonRow {
            field: "Borrower".into(),
            value_a: json!("John Doe"),
            value_b: json!("John Doe"),
            matched: true,
            diff: None,
        };
        let rendered = serde_json::to_string(&row).unwrap();
        assert!(rendered.contains("\"match\":true"));
        assert!(!rendered.contains("diff"));
    }

    #[test]
    fn review_state_machine_rejects_shortcuts() {
        assert!(ReviewState::Pending.can_transition(ReviewState::Extracting));
        assert!(ReviewState::Extracting.can_transition(ReviewState::Validating));
        assert!(ReviewState::Validating.can_transition(ReviewState::Complete));
        assert!(!ReviewState::Pending.can_transition(ReviewState::Complete));
        assert!(!ReviewState::Complete.can_transition(ReviewState::Failed));
        assert!(ReviewState::Failed.is_terminal());
    }
}
