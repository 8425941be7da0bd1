//! Revision-gap detection for resubmitted reports.
//!
//! Rejected orders come back with the rejection reason buried in the
//! order-form HTML. When the marker is present, the workflow asks the
//! model one targeted question: was this specific reason addressed in
//! the revised report?

use std::path::Path;

use appraisal_core::extract::DocumentExtractor;
use appraisal_core::section::Section;
use appraisal_core::types::{field_text, CheckResult, CheckStatus, FieldMap, ReviewState};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::WorkflowError;
use crate::workflows::Progress;

// Order-form exports are inconsistent about the marker: some wrap the
// label in <strong> or <b> with the colon inside, some leave a bare
// colon. The reason text runs to the next tag boundary.
static REJECTION_REASON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)report\s+rejection\s+reason\s*:?\s*(?:</(?:strong|b)>)?\s*:?\s*([^<]+)")
        .expect("Invalid rejection reason regex")
});

/// Pulls the rejection reason out of an order-form HTML blob, if the
/// order carries one.
#[must_use]
pub fn rejection_reason(html: &str) -> Option<String> {
    REJECTION_REASON.captures(html).and_then(|caps| {
        let reason = caps[1].trim();
        if reason.is_empty() {
            None
        } else {
            Some(reason.to_string())
        }
    })
}

/// Result of one revision-gap check: the reason that was followed up
/// on (when one was found) and the verdict checks.
#[derive(Debug, Serialize)]
pub struct RevisionOutcome {
    pub reason: Option<String>,
    pub checks: Vec<CheckResult>,
}

/// Checks whether the revised report addresses the rejection reason
/// embedded in the order form.
///
/// Without a detectable reason there is nothing to verify, so the
/// outcome carries one skipped check instead of an error.
pub async fn revision_gap_check(
    extractor: &dyn DocumentExtractor,
    revised_document: &Path,
    order_form_html: Option<&str>,
) -> Result<RevisionOutcome, WorkflowError> {
    const CHECK: &str = "Rejection Reason Follow-Up";

    let mut progress = Progress::start("revision_gap");
    progress.advance(ReviewState::Extracting);

    let reason = order_form_html.and_then(rejection_reason);
    let Some(reason) = reason else {
        progress.advance(ReviewState::Validating);
        let message = match order_form_html {
            None => "No order form was provided; nothing to follow up.",
            Some(_) => "No rejection reason found in the order form.",
        };
        progress.advance(ReviewState::Complete);
        return Ok(RevisionOutcome {
            reason: None,
            checks: vec![CheckResult::skipped(CHECK, message)],
        });
    };

    let documents = [revised_document.to_path_buf()];
    let verdict = match extractor
        .extract(&documents, Section::RevisionCheck, Some(&reason))
        .await
    {
        Ok(map) => map,
        Err(err) => {
            progress.fail();
            return Err(WorkflowError::extraction("revision_check", err));
        }
    };

    progress.advance(ReviewState::Validating);
    let checks = fold_verdict(&verdict);
    progress.advance(ReviewState::Complete);

    Ok(RevisionOutcome {
        reason: Some(reason),
        checks,
    })
}

/// Folds the model's `status`/`summary`/`details` verdict into checks.
/// An unknown status stays informational rather than guessing at
/// pass/fail.
fn fold_verdict(verdict: &FieldMap) -> Vec<CheckResult> {
    const CHECK: &str = "Rejection Reason Follow-Up";

    let status_text = field_text(verdict, "status");
    let status_text = status_text.trim();
    let summary = field_text(verdict, "summary");
    let summary = summary.trim();

    let status = match status_text.to_lowercase().as_str() {
        "corrected" => CheckStatus::Passed,
        "partially corrected" | "not corrected" => CheckStatus::Failed,
        _ => CheckStatus::Info,
    };
    let message = match (status_text.is_empty(), summary.is_empty()) {
        (false, false) => format!("{status_text}: {summary}"),
        (false, true) => status_text.to_string(),
        (true, false) => summary.to_string(),
        (true, true) => "The model returned no verdict for the rejection reason.".to_string(),
    };

    let mut checks = vec![CheckResult::new(CHECK, status, message)];
    let details = field_text(verdict, "details");
    let details = details.trim();
    if !details.is_empty() {
        checks.push(CheckResult::info("Rejection Reason Details", details));
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_reason_behind_a_strong_wrapped_label() {
        let html = "<p><strong>Report Rejection Reason:</strong> The subject GLA does not match public record.</p>";
        assert_eq!(
            rejection_reason(html).as_deref(),
            Some("The subject GLA does not match public record.")
        );
    }

    #[test]
    fn finds_reason_when_the_colon_sits_outside_the_bold_tag() {
        let html = "<b>Report Rejection Reason</b>: Comp 3 is over a mile away.<br/>";
        assert_eq!(
            rejection_reason(html).as_deref(),
            Some("Comp 3 is over a mile away.")
        );
    }

    #[test]
    fn finds_reason_after_a_bare_colon() {
        let html = "Status: Rejected\nREPORT REJECTION REASON: Missing flood map panel.<div>";
        assert_eq!(
            rejection_reason(html).as_deref(),
            Some("Missing flood map panel.")
        );
    }

    #[test]
    fn whitespace_only_reason_counts_as_absent() {
        let html = "<strong>Report Rejection Reason:</strong> \t<br>";
        assert_eq!(rejection_reason(html), None);
        assert_eq!(rejection_reason("<p>No marker here.</p>"), None);
    }

    #[test]
    fn corrected_verdict_passes_and_keeps_the_details() {
        let verdict = json!({
            "status": "Corrected",
            "summary": "The GLA was updated on page 2.",
            "details": "The Improvements section now reads 1,850 sq. ft., matching public record.",
        });
        let checks = fold_verdict(verdict.as_object().unwrap());
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].status, CheckStatus::Passed);
        assert_eq!(
            checks[0].message,
            "Corrected: The GLA was updated on page 2."
        );
        assert_eq!(checks[1].check, "Rejection Reason Details");
        assert_eq!(checks[1].status, CheckStatus::Info);
    }

    #[test]
    fn uncorrected_verdicts_fail() {
        for status in ["Not Corrected", "partially corrected"] {
            let verdict = json!({ "status": status, "summary": "Still wrong." });
            let checks = fold_verdict(verdict.as_object().unwrap());
            assert_eq!(checks.len(), 1);
            assert_eq!(checks[0].status, CheckStatus::Failed);
        }
    }

    #[test]
    fn unknown_verdicts_stay_informational() {
        let verdict = json!({ "status": "Inconclusive" });
        let checks = fold_verdict(verdict.as_object().unwrap());
        assert_eq!(checks[0].status, CheckStatus::Info);
        assert_eq!(checks[0].message, "Inconclusive");
    }
}
