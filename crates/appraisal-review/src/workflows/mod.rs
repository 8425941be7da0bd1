//! Review workflow orchestration.
//!
//! Each workflow fans extraction calls out over one
//! [`DocumentExtractor`], folds the payloads through the comparison
//! engine and rule checks, and returns an ordered list of named
//! checks. Check failures are ordinary results; only extraction
//! failures abort a workflow.

pub mod audit;
pub mod d1004;
pub mod escalation;
pub mod revision;

use std::path::Path;

use appraisal_core::extract::DocumentExtractor;
use appraisal_core::section::Section;
use appraisal_core::types::{CheckResult, CheckStatus, FieldMap, ReviewState};
use tracing::info;

use crate::error::WorkflowError;

pub use audit::{audit_revision, AuditOutcome};
pub use d1004::{d1004_review, D1004Outcome};
pub use escalation::{escalation_review, EscalationOutcome};
pub use revision::{rejection_reason, revision_gap_check, RevisionOutcome};

/// Instruction run against an engagement letter to pull fee details.
pub(crate) const FEE_INSTRUCTION: &str =
    "Extract the 'Appraisal Fee' or 'Total Fee' from this document.";

/// Frames a reviewer's free-text question for analysis across a
/// revised report and the prior version of the same report.
#[must_use]
pub fn comparison_query(query: &str) -> String {
    format!(
        "User Query: '''{query}'''\n\nAnalyze all provided documents (a revised appraisal report and an old one) to answer the user's query. The first file is the revised report, and the second is the old one."
    )
}

/// Like [`comparison_query`] but hands the model pre-extracted JSON to
/// cross-reference instead of leaving it to re-read everything.
#[must_use]
pub fn contextual_query(query: &str, context: &serde_json::Value) -> String {
    format!(
        "User Query: '''{query}'''\n\nUse the following pre-processed JSON data as the primary source for your analysis and to cross-reference information. Context Data: {context}"
    )
}

/// Lifecycle tracker for one workflow run. Transitions are logged so
/// an operator can follow a long extraction from the outside.
#[derive(Debug)]
pub struct Progress {
    workflow: &'static str,
    state: ReviewState,
}

impl Progress {
    #[must_use]
    pub fn start(workflow: &'static str) -> Self {
        info!("{workflow} workflow: {}", ReviewState::Pending);
        Self {
            workflow,
            state: ReviewState::Pending,
        }
    }

    /// Moves to `next`, which must be a legal successor state.
    pub fn advance(&mut self, next: ReviewState) {
        debug_assert!(
            self.state.can_transition(next),
            "illegal workflow transition {} -> {next}",
            self.state,
        );
        self.state = next;
        info!("{} workflow: {next}", self.workflow);
    }

    pub fn fail(&mut self) {
        self.advance(ReviewState::Failed);
    }

    #[must_use]
    pub fn state(&self) -> ReviewState {
        self.state
    }
}

/// One labeled extraction. The label names the document-and-section
/// pair in the workflow error when the call fails.
pub(crate) async fn extract_labeled(
    extractor: &dyn DocumentExtractor,
    label: &str,
    document: &Path,
    section: Section,
) -> Result<FieldMap, WorkflowError> {
    extractor
        .extract_one(document, section)
        .await
        .map_err(|err| WorkflowError::extraction(label, err))
}

/// Folds one model finding string into a check. Findings follow the
/// `Passed:`/`Failed:`/`N/A:` convention; anything else is kept as an
/// informational note rather than guessed at.
#[must_use]
pub fn check_from_finding(check: impl Into<String>, finding: &str) -> CheckResult {
    let trimmed = finding.trim();
    let lower = trimmed.to_ascii_lowercase();
    let parsed = if lower.starts_with("passed:") {
        Some((CheckStatus::Passed, &trimmed["passed:".len()..]))
    } else if lower.starts_with("failed:") {
        Some((CheckStatus::Failed, &trimmed["failed:".len()..]))
    } else if lower.starts_with("n/a:") {
        Some((CheckStatus::NotApplicable, &trimmed["n/a:".len()..]))
    } else {
        None
    };
    match parsed {
        Some((status, message)) => CheckResult::new(check, status, message.trim()),
        None => CheckResult::info(check, trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_prefixes_map_to_statuses() {
        let check = check_from_finding("Bracketing", "Passed: All features are bracketed.");
        assert_eq!(check.status, CheckStatus::Passed);
        assert_eq!(check.message, "All features are bracketed.");

        let check = check_from_finding("Concessions", "FAILED: Concession adjustment is positive.");
        assert_eq!(check.status, CheckStatus::Failed);
        assert_eq!(check.message, "Concession adjustment is positive.");

        let check = check_from_finding("FHA", "N/A: Not an FHA assignment.");
        assert_eq!(check.status, CheckStatus::NotApplicable);
        assert_eq!(check.message, "Not an FHA assignment.");
    }

    #[test]
    fn unprefixed_findings_become_informational() {
        let check = check_from_finding("Summary", "Adjustments look reasonable overall.");
        assert_eq!(check.status, CheckStatus::Info);
        assert_eq!(check.message, "Adjustments look reasonable overall.");
    }

    #[test]
    fn progress_walks_the_lifecycle() {
        let mut progress = Progress::start("audit");
        assert_eq!(progress.state(), ReviewState::Pending);
        progress.advance(ReviewState::Extracting);
        progress.advance(ReviewState::Validating);
        progress.advance(ReviewState::Complete);
        assert!(progress.state().is_terminal());
    }

    #[test]
    fn queries_embed_the_reviewer_question() {
        let framed = comparison_query("Did the GLA change?");
        assert!(framed.starts_with("User Query: '''Did the GLA change?'''"));
        assert!(framed.contains("The first file is the revised report"));

        let framed = contextual_query("Check the fee.", &serde_json::json!({"fee": "$550"}));
        assert!(framed.contains("Context Data: {\"fee\":\"$550\"}"));
    }
}
