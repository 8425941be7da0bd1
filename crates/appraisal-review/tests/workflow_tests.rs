//! End-to-end workflow tests over a canned extractor stub.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use appraisal_core::{CheckStatus, DocumentExtractor, ExtractError, FieldMap, Section};
use appraisal_review::{audit_revision, d1004_review, escalation_review, revision_gap_check};
use async_trait::async_trait;
use serde_json::json;

/// Answers extractions from a (file stem, section) table and records
/// every call it sees.
struct StubExtractor {
    responses: HashMap<(String, &'static str), FieldMap>,
    fail_on: Option<(String, &'static str)>,
    calls: Mutex<Vec<(String, &'static str, Option<String>)>>,
}

impl StubExtractor {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with(mut self, stem: &str, section: Section, payload: serde_json::Value) -> Self {
        let map = payload.as_object().cloned().unwrap_or_default();
        self.responses.insert((stem.to_string(), section.key()), map);
        self
    }

    fn failing_on(mut self, stem: &str, section: Section) -> Self {
        self.fail_on = Some((stem.to_string(), section.key()));
        self
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn overrides_for(&self, section: Section) -> Vec<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, key, _)| *key == section.key())
            .map(|(_, _, instruction)| instruction.clone())
            .collect()
    }
}

#[async_trait]
impl DocumentExtractor for StubExtractor {
    async fn extract(
        &self,
        documents: &[PathBuf],
        section: Section,
        instruction_override: Option<&str>,
    ) -> appraisal_core::Result<FieldMap> {
        let stem = documents
            .first()
            .and_then(|document| document.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push((
            stem.clone(),
            section.key(),
            instruction_override.map(str::to_owned),
        ));
        if let Some((fail_stem, fail_section)) = &self.fail_on {
            if *fail_stem == stem && *fail_section == section.key() {
                return Err(ExtractError::Message("timeout".to_string()));
            }
        }
        Ok(self
            .responses
            .get(&(stem, section.key()))
            .cloned()
            .unwrap_or_default())
    }
}

fn map(value: serde_json::Value) -> FieldMap {
    value.as_object().cloned().unwrap()
}

fn subject_fields() -> serde_json::Value {
    json!({
        "Borrower": "John Doe",
        "Property Address": "500 Elm St",
        "City": "Austin",
        "State": "TX",
        "Zip Code": "78701",
        "County": "Travis",
        "Lender/Client": "Visio Lending LLC",
        "Address (Lender/Client)": "1905 Kramer Ln, Austin, TX",
        "FHA": null,
        "Assignment Type": "Refinance Transaction",
    })
}

fn base_info_fields() -> serde_json::Value {
    json!({
        "APPRAISAL FORM TYPE (1004/1025/1004D/1073)": "1004",
        "Additional Form (1007/216/Rental/STR)": null,
    })
}

fn audit_stub() -> StubExtractor {
    let reconciliation = json!({ "Opinion of Market Value $": "$455,000" });
    let certification = json!({ "Name": "Jane Appraiser" });
    StubExtractor::new()
        .with("revised", Section::Subject, subject_fields())
        .with("revised", Section::Reconciliation, reconciliation.clone())
        .with("revised", Section::Certification, certification.clone())
        .with("revised", Section::BaseInfo, base_info_fields())
        .with("old", Section::Subject, subject_fields())
        .with("old", Section::Reconciliation, reconciliation)
        .with("old", Section::Certification, certification)
        .with("old", Section::BaseInfo, base_info_fields())
}

fn order_form() -> FieldMap {
    map(json!({
        "Borrower (and Co-Borrower)": "John Doe",
        "Property Address": "500 Elm St, Austin, TX 78701",
        "Client/Lender Name": "Visio Lending, LLC",
        "Lender Address": "1905 Kramer Ln, Austin, TX",
        "Assigned to Vendor(s)": "Jane Q. Appraiser",
        "FHA Case Number": "Not Found",
        "Appraisal Type": "1004",
        "Transaction Type": "Refinance",
    }))
}

#[tokio::test]
async fn audit_cross_checks_all_sources() {
    let stub = audit_stub();
    let order = order_form();
    let outcome = audit_revision(
        &stub,
        Path::new("revised.pdf"),
        Path::new("old.pdf"),
        Some(&order),
        None,
    )
    .await
    .unwrap();

    assert!(!outcome.value_changed);
    assert_eq!(outcome.revised_value, "$455,000");
    // Value, eight consistency checks, fee, adjustment analysis.
    assert_eq!(outcome.checks.len(), 11);
    for check in &outcome.checks {
        assert!(
            !check.status.is_failure(),
            "{}: {}",
            check.check,
            check.message
        );
    }

    let borrower = outcome
        .checks
        .iter()
        .find(|c| c.check == "Borrower")
        .unwrap();
    assert_eq!(
        borrower.message,
        "Consistent across the revised report, old report, and order form ('John Doe')."
    );

    // Eight section reads plus the adjustment-analysis pass.
    assert_eq!(stub.call_count(), 9);
}

#[tokio::test]
async fn audit_fails_before_checks_when_an_extraction_fails() {
    let stub = audit_stub().failing_on("old", Section::Subject);
    let err = audit_revision(
        &stub,
        Path::new("revised.pdf"),
        Path::new("old.pdf"),
        None,
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Error extracting 'old_subject': timeout");
}

#[tokio::test]
async fn audit_reports_engagement_letter_fee_details() {
    let stub = audit_stub().with(
        "engagement",
        Section::ReportDetails,
        json!({ "Appraisal Fee": "$550" }),
    );
    let outcome = audit_revision(
        &stub,
        Path::new("revised.pdf"),
        Path::new("old.pdf"),
        None,
        Some(Path::new("engagement.pdf")),
    )
    .await
    .unwrap();

    let fee = outcome
        .checks
        .iter()
        .find(|c| c.check == "Engagement Letter Fee")
        .unwrap();
    assert_eq!(fee.status, CheckStatus::Info);
    assert!(fee.message.contains("$550"));

    let overrides = stub.overrides_for(Section::ReportDetails);
    assert_eq!(overrides.len(), 1);
    assert_eq!(
        overrides[0].as_deref(),
        Some("Extract the 'Appraisal Fee' or 'Total Fee' from this document.")
    );
}

fn d1004_stub() -> StubExtractor {
    StubExtractor::new()
        .with("original", Section::Subject, subject_fields())
        .with(
            "original",
            Section::Contract,
            json!({ "Contract Price $": "$450,000", "Date of Contract": "03/15/2025" }),
        )
        .with(
            "original",
            Section::Reconciliation,
            json!({ "Effective Date of Value": "04/01/2025", "Opinion of Market Value $": "$455,000" }),
        )
        .with(
            "original",
            Section::Certification,
            json!({ "Name": "Jane Appraiser" }),
        )
}

fn update_form() -> serde_json::Value {
    json!({
        "Property Address": "500 Elm St",
        "City": "Austin",
        "State": "TX",
        "Zip Code": "78701",
        "County": "Travis",
        "Borrower": "John Doe",
        "Contract Price $": "$450,000",
        "Date of Contract": "03/15/2025",
        "Effective Date of Original Appraisal": "04/01/2025",
        "Original Appraised Value $": "$455,000",
        "Original Appraiser": "Jane Appraiser",
        "Original Lender/Client": "Visio Lending LLC",
        "SUMMARY APPRAISAL UPDATE REPORT (checkbox)": "Yes",
        "CERTIFICATION OF COMPLETION (checkbox)": "No",
    })
}

#[tokio::test]
async fn d1004_review_flags_the_unanswered_decline_question() {
    let stub = d1004_stub().with("update", Section::D1004, update_form());
    let outcome = d1004_review(&stub, Path::new("original.pdf"), Path::new("update.pdf"))
        .await
        .unwrap();

    // Twelve restated fields, report type, two follow-up questions.
    assert_eq!(outcome.checks.len(), 15);
    assert!(outcome.checks[..12]
        .iter()
        .all(|c| c.status == CheckStatus::Passed));

    let by_name = |name: &str| outcome.checks.iter().find(|c| c.check == name).unwrap();
    assert_eq!(by_name("Report Type Check").status, CheckStatus::Passed);
    assert_eq!(
        by_name("Market Decline Question").status,
        CheckStatus::Failed
    );
    assert_eq!(
        by_name("Improvements Completed Question").status,
        CheckStatus::Skipped
    );
}

fn escalation_stub() -> StubExtractor {
    StubExtractor::new()
        .with("report", Section::Subject, subject_fields())
        .with("report", Section::Improvements, json!({ "Type": "Detached" }))
        .with(
            "report",
            Section::Certification,
            json!({ "Name": "Jane Appraiser" }),
        )
        .with(
            "report",
            Section::AppraisalId,
            json!({ "This Report is one of the following types:": "1004 Uniform Residential Appraisal Report" }),
        )
        .with("report", Section::BaseInfo, base_info_fields())
        .with(
            "report",
            Section::Reconciliation,
            json!({ "Opinion of Market Value $": "$455,000" }),
        )
        .with("report", Section::Site, json!({ "Zoning Compliance": "Legal" }))
        .with(
            "report",
            Section::Neighborhood,
            json!({ "Neighborhood Description": "A quiet established area." }),
        )
        .with(
            "report",
            Section::Contract,
            json!({ "Contract Price $": "$450,000" }),
        )
        .with(
            "report",
            Section::EscalationCheck,
            json!({
                "Verify Assignment Type matches between Order Form and Report.":
                    "Passed: Both sources show a refinance.",
            }),
        )
}

#[tokio::test]
async fn escalation_review_compares_the_profile_and_folds_findings() {
    let stub = escalation_stub();
    let order = map(json!({
        "Borrower (and Co-Borrower)": "John Doe",
        "Transaction Type": "Refinance",
    }));
    let outcome = escalation_review(&stub, Path::new("report.pdf"), &order, None, None)
        .await
        .unwrap();

    // The report profile always carries its thirteen keys; both order
    // fields fold into the same key set.
    assert_eq!(outcome.comparison.len(), 13);
    let borrower = outcome
        .comparison
        .iter()
        .find(|r| r.field == "Borrower (and Co-Borrower)")
        .unwrap();
    assert!(borrower.matched);

    assert_eq!(outcome.findings[0].status, CheckStatus::Passed);
    assert!(outcome
        .findings
        .iter()
        .any(|f| f.check == "Neighborhood description language"));
    assert!(outcome
        .findings
        .iter()
        .any(|f| f.check == "Comparable prior sale details"));

    let overrides = stub.overrides_for(Section::EscalationCheck);
    assert_eq!(overrides.len(), 1);
    let context = overrides[0].as_deref().unwrap();
    assert!(context.contains("\"order_form_data\""));
    assert!(context.contains("\"sale_history\""));
}

#[tokio::test]
async fn revision_gap_skips_cleanly_without_a_reason() {
    let stub = StubExtractor::new();
    let outcome = revision_gap_check(
        &stub,
        Path::new("revised.pdf"),
        Some("<p>No rejection here.</p>"),
    )
    .await
    .unwrap();
    assert_eq!(outcome.reason, None);
    assert_eq!(outcome.checks.len(), 1);
    assert_eq!(outcome.checks[0].status, CheckStatus::Skipped);
    assert_eq!(
        outcome.checks[0].message,
        "No rejection reason found in the order form."
    );
    assert_eq!(stub.call_count(), 0);

    let outcome = revision_gap_check(&stub, Path::new("revised.pdf"), None)
        .await
        .unwrap();
    assert_eq!(
        outcome.checks[0].message,
        "No order form was provided; nothing to follow up."
    );
}

#[tokio::test]
async fn revision_gap_follows_up_the_embedded_reason() {
    let stub = StubExtractor::new().with(
        "revised",
        Section::RevisionCheck,
        json!({
            "status": "Corrected",
            "summary": "Comp 3 was replaced with a closer sale.",
            "details": "The new comparable on page 4 is 0.3 miles from the subject.",
        }),
    );
    let html = "<strong>Report Rejection Reason:</strong> Comp 3 is over a mile away.</p>";
    let outcome = revision_gap_check(&stub, Path::new("revised.pdf"), Some(html))
        .await
        .unwrap();

    assert_eq!(outcome.reason.as_deref(), Some("Comp 3 is over a mile away."));
    assert_eq!(outcome.checks[0].status, CheckStatus::Passed);
    assert_eq!(
        outcome.checks[0].message,
        "Corrected: Comp 3 was replaced with a closer sale."
    );
    assert_eq!(outcome.checks[1].check, "Rejection Reason Details");

    let overrides = stub.overrides_for(Section::RevisionCheck);
    assert_eq!(
        overrides[0].as_deref(),
        Some("Comp 3 is over a mile away.")
    );
}
