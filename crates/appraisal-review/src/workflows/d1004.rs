//! 1004D completion/update review.
//!
//! A 1004D restates identity and value fields from the original
//! assignment, so the review is mostly transcription checking: every
//! restated field must equal its counterpart in the original report.
//! The form then branches on which of its two purposes is checked,
//! and the matching follow-up question must carry a valid answer.

use std::path::Path;

use appraisal_core::extract::DocumentExtractor;
use appraisal_core::section::Section;
use appraisal_core::types::{field_text, CheckResult, FieldMap, ReviewState};
use serde::Serialize;

use crate::error::WorkflowError;
use crate::workflows::{extract_labeled, Progress};

const UPDATE_CHECKBOX: &str = "SUMMARY APPRAISAL UPDATE REPORT (checkbox)";
const COMPLETION_CHECKBOX: &str = "CERTIFICATION OF COMPLETION (checkbox)";
const MARKET_DECLINE_QUESTION: &str = "HAS THE MARKET VALUE OF THE SUBJECT PROPERTY DECLINED SINCE THE EFFECTIVE DATE OF THE PRIOR APPRAISAL? (Yes/No)";
const IMPROVEMENTS_QUESTION: &str = "HAVE THE IMPROVEMENTS BEEN COMPLETED IN ACCORDANCE WITH THE REQUIREMENTS AND CONDITIONS STATED IN THE ORIGINAL APPRAISAL REPORT? (Yes/No)";
const IMPACT_FIELD: &str = "If No, describe the impact on the opinion of market value";

/// Result of one 1004D review. The check list is always complete; a
/// badly answered question is a failed check, never an error.
#[derive(Debug, Serialize)]
pub struct D1004Outcome {
    pub checks: Vec<CheckResult>,
}

/// Reviews a 1004D form against the original appraisal it updates.
pub async fn d1004_review(
    extractor: &dyn DocumentExtractor,
    original: &Path,
    form: &Path,
) -> Result<D1004Outcome, WorkflowError> {
    let mut progress = Progress::start("1004d");
    progress.advance(ReviewState::Extracting);

    let sections = tokio::try_join!(
        extract_labeled(extractor, "original_subject", original, Section::Subject),
        extract_labeled(extractor, "original_contract", original, Section::Contract),
        extract_labeled(
            extractor,
            "original_reconciliation",
            original,
            Section::Reconciliation
        ),
        extract_labeled(
            extractor,
            "original_certification",
            original,
            Section::Certification
        ),
        extract_labeled(extractor, "d1004_form", form, Section::D1004),
    );
    let (subject, contract, reconciliation, certification, d1004) = match sections {
        Ok(sections) => sections,
        Err(err) => {
            progress.fail();
            return Err(err);
        }
    };

    progress.advance(ReviewState::Validating);

    let mut checks = field_pair_checks(&d1004, &subject, &contract, &reconciliation, &certification);
    checks.push(report_type_check(&d1004));
    checks.push(market_decline_check(&d1004));
    checks.push(improvements_check(&d1004));

    progress.advance(ReviewState::Complete);
    Ok(D1004Outcome { checks })
}

/// Trim-and-lowercase string equality. Deliberately not numeric or
/// date aware: a restated value should be a transcription, and any
/// reformatting is worth a reviewer's glance.
fn restated_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn field_pair_checks(
    d1004: &FieldMap,
    subject: &FieldMap,
    contract: &FieldMap,
    reconciliation: &FieldMap,
    certification: &FieldMap,
) -> Vec<CheckResult> {
    let pairs: [(&str, &str, &FieldMap, &str); 12] = [
        ("Property Address", "Property Address", subject, "Property Address"),
        ("City", "City", subject, "City"),
        ("State", "State", subject, "State"),
        ("Zip Code", "Zip Code", subject, "Zip Code"),
        ("County", "County", subject, "County"),
        ("Borrower", "Borrower", subject, "Borrower"),
        ("Contract Price", "Contract Price $", contract, "Contract Price $"),
        ("Contract Date", "Date of Contract", contract, "Date of Contract"),
        (
            "Effective Date",
            "Effective Date of Original Appraisal",
            reconciliation,
            "Effective Date of Value",
        ),
        (
            "Appraised Value",
            "Original Appraised Value $",
            reconciliation,
            "Opinion of Market Value $",
        ),
        ("Original Appraiser", "Original Appraiser", certification, "Name"),
        ("Original Lender", "Original Lender/Client", subject, "Lender/Client"),
    ];

    pairs
        .into_iter()
        .map(|(check, form_key, source, source_key)| {
            let form_value = field_text(d1004, form_key);
            let form_value = form_value.trim();
            let original_value = field_text(source, source_key);
            let original_value = original_value.trim();
            if restated_eq(form_value, original_value) {
                CheckResult::passed(check, format!("Matches the original report ('{form_value}')."))
            } else {
                CheckResult::failed(
                    check,
                    format!(
                        "1004D shows '{form_value}' but the original report shows '{original_value}'."
                    ),
                )
            }
        })
        .collect()
}

fn checkbox_yes(map: &FieldMap, key: &str) -> bool {
    field_text(map, key).trim().eq_ignore_ascii_case("yes")
}

fn report_type_check(d1004: &FieldMap) -> CheckResult {
    const CHECK: &str = "Report Type Check";
    let update = checkbox_yes(d1004, UPDATE_CHECKBOX);
    let completion = checkbox_yes(d1004, COMPLETION_CHECKBOX);
    match (update, completion) {
        (true, false) => {
            CheckResult::passed(CHECK, "Form is marked as a Summary Appraisal Update Report.")
        }
        (false, true) => {
            CheckResult::passed(CHECK, "Form is marked as a Certification of Completion.")
        }
        (true, true) => CheckResult::failed(
            CHECK,
            "Both report types are checked; exactly one of 'Summary Appraisal Update Report' or 'Certification of Completion' must be selected.",
        ),
        (false, false) => CheckResult::failed(
            CHECK,
            "Neither report type is checked; exactly one of 'Summary Appraisal Update Report' or 'Certification of Completion' must be selected.",
        ),
    }
}

fn market_decline_check(d1004: &FieldMap) -> CheckResult {
    const CHECK: &str = "Market Decline Question";
    if !checkbox_yes(d1004, UPDATE_CHECKBOX) {
        return CheckResult::skipped(
            CHECK,
            "Not a Summary Appraisal Update; the market-decline question is not required.",
        );
    }
    let answer = field_text(d1004, MARKET_DECLINE_QUESTION);
    let answer = answer.trim();
    match answer.to_lowercase().as_str() {
        "yes" | "no" => CheckResult::passed(CHECK, format!("Question is answered ('{answer}').")),
        "" => CheckResult::failed(CHECK, "The market-decline question is unanswered."),
        _ => CheckResult::failed(
            CHECK,
            format!("Expected 'Yes' or 'No' but the form shows '{answer}'."),
        ),
    }
}

fn improvements_check(d1004: &FieldMap) -> CheckResult {
    const CHECK: &str = "Improvements Completed Question";
    if !checkbox_yes(d1004, COMPLETION_CHECKBOX) {
        return CheckResult::skipped(
            CHECK,
            "Not a Certification of Completion; the improvements question is not required.",
        );
    }
    let answer = field_text(d1004, IMPROVEMENTS_QUESTION);
    let answer = answer.trim();
    match answer.to_lowercase().as_str() {
        "yes" => CheckResult::passed(CHECK, "Improvements are completed as required ('Yes')."),
        "no" => {
            let impact = field_text(d1004, IMPACT_FIELD);
            let impact = impact.trim();
            if impact.is_empty() {
                CheckResult::failed(
                    CHECK,
                    "Improvements are marked incomplete but the impact on the opinion of market value is not described.",
                )
            } else {
                CheckResult::passed(
                    CHECK,
                    format!("Improvements are incomplete; impact is described: {impact}"),
                )
            }
        }
        "" => CheckResult::failed(CHECK, "The improvements-completed question is unanswered."),
        _ => CheckResult::failed(
            CHECK,
            format!("Expected 'Yes' or 'No' but the form shows '{answer}'."),
        ),
    }
}
