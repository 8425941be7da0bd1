//! Markdown rendering of workflow outcomes.
//!
//! Reviewers read these as-is, so the renderers favor summary tables
//! up front with the noisy material (value diffs, model details)
//! pushed below them.

use std::fmt::Write;

use appraisal_core::types::{value_text, CheckResult, CheckStatus, ComparisonRow};

use crate::workflows::{AuditOutcome, D1004Outcome, EscalationOutcome, RevisionOutcome};

fn status_label(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Passed => "Passed",
        CheckStatus::Failed => "Failed",
        CheckStatus::Info => "Info",
        CheckStatus::Skipped => "Skipped",
        CheckStatus::NotApplicable => "N/A",
    }
}

fn push_generated_line(report: &mut String) {
    let _ = writeln!(
        report,
        "Generated: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

fn push_checks(report: &mut String, title: &str, checks: &[CheckResult]) {
    let _ = writeln!(report, "## {title}\n");

    let failed = checks.iter().filter(|c| c.status.is_failure()).count();
    let _ = writeln!(report, "**{failed} of {} checks failed.**\n", checks.len());

    report.push_str("| Check | Status | Message |\n");
    report.push_str("|-------|--------|---------|\n");
    for check in checks {
        let _ = writeln!(
            report,
            "| {} | {} | {} |",
            check.check,
            status_label(check.status),
            check.message
        );
    }
    report.push('\n');
}

fn push_comparison(report: &mut String, rows: &[ComparisonRow], label_a: &str, label_b: &str) {
    let _ = writeln!(report, "| Field | {label_a} | {label_b} | Match |");
    report.push_str("|-------|---|---|-------|\n");
    for row in rows {
        let _ = writeln!(
            report,
            "| {} | {} | {} | {} |",
            row.field,
            value_text(&row.value_a),
            value_text(&row.value_b),
            if row.matched { "Yes" } else { "No" }
        );
    }
    report.push('\n');

    let mismatches: Vec<&ComparisonRow> = rows.iter().filter(|r| !r.matched).collect();
    if !mismatches.is_empty() {
        report.push_str("### Mismatches\n\n");
        for row in mismatches {
            let _ = writeln!(report, "**{}**\n", row.field);
            if let Some(diff) = &row.diff {
                let _ = writeln!(report, "```\n{diff}\n```\n");
            }
        }
    }
}

/// Renders a revised-vs-old audit outcome.
#[must_use]
pub fn audit_report(outcome: &AuditOutcome) -> String {
    let mut report = String::new();
    report.push_str("# Revision Audit Report\n\n");
    push_generated_line(&mut report);

    if outcome.value_changed {
        let _ = writeln!(
            report,
            "Opinion of market value changed from '{}' to '{}'.\n",
            outcome.old_value, outcome.revised_value
        );
    } else {
        let _ = writeln!(
            report,
            "Opinion of market value is unchanged ('{}').\n",
            outcome.revised_value
        );
    }

    push_checks(&mut report, "Checks", &outcome.checks);
    report
}

/// Renders a 1004D review outcome.
#[must_use]
pub fn d1004_report(outcome: &D1004Outcome) -> String {
    let mut report = String::new();
    report.push_str("# 1004D Review Report\n\n");
    push_generated_line(&mut report);
    push_checks(&mut report, "Checks", &outcome.checks);
    report
}

/// Renders an escalation review outcome: the order-form comparison
/// first, the finding list after.
#[must_use]
pub fn escalation_report(outcome: &EscalationOutcome) -> String {
    let mut report = String::new();
    report.push_str("# Escalation Review Report\n\n");
    push_generated_line(&mut report);

    report.push_str("## Order Form vs. Appraisal Report\n\n");
    push_comparison(
        &mut report,
        &outcome.comparison,
        "Order Form",
        "Appraisal Report",
    );
    push_checks(&mut report, "Findings", &outcome.findings);
    report
}

/// Renders a revision-gap outcome.
#[must_use]
pub fn revision_report(outcome: &RevisionOutcome) -> String {
    let mut report = String::new();
    report.push_str("# Revision Gap Report\n\n");
    push_generated_line(&mut report);

    match &outcome.reason {
        Some(reason) => {
            let _ = writeln!(report, "Rejection reason under review:\n\n> {reason}\n");
        }
        None => report.push_str("No rejection reason was found in the order form.\n\n"),
    }

    push_checks(&mut report, "Checks", &outcome.checks);
    report
}

/// Renders a standalone two-map comparison.
#[must_use]
pub fn comparison_report(rows: &[ComparisonRow], label_a: &str, label_b: &str) -> String {
    let mut report = String::new();
    report.push_str("# Field Comparison Report\n\n");
    push_generated_line(&mut report);
    push_comparison(&mut report, rows, label_a, label_b);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compare_field_maps;
    use appraisal_core::types::FieldMap;
    use serde_json::json;

    fn map(value: serde_json::Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn audit_report_summarizes_value_movement_and_checks() {
        let outcome = AuditOutcome {
            value_changed: true,
            revised_value: "$455,000".to_string(),
            old_value: "$450,000".to_string(),
            checks: vec![
                CheckResult::passed("Borrower", "Consistent."),
                CheckResult::failed("Property Address", "Mismatch."),
            ],
        };
        let report = audit_report(&outcome);
        assert!(report.starts_with("# Revision Audit Report"));
        assert!(report.contains("Generated:"));
        assert!(report.contains("changed from '$450,000' to '$455,000'"));
        assert!(report.contains("**1 of 2 checks failed.**"));
        assert!(report.contains("| Property Address | Failed | Mismatch. |"));
    }

    #[test]
    fn comparison_report_carries_diff_blocks_for_mismatches() {
        let a = map(json!({ "Borrower": "John Doe" }));
        let b = map(json!({ "Borrower": "Jane Doe" }));
        let rows = compare_field_maps(&a, &b, "Order Form", "Report");
        let report = comparison_report(&rows, "Order Form", "Report");
        assert!(report.contains("| Field | Order Form | Report | Match |"));
        assert!(report.contains("| Borrower | John Doe | Jane Doe | No |"));
        assert!(report.contains("### Mismatches"));
        assert!(report.contains("```"));
    }

    #[test]
    fn revision_report_quotes_the_reason() {
        let outcome = RevisionOutcome {
            reason: Some("Comp 3 is over a mile away.".to_string()),
            checks: vec![CheckResult::failed(
                "Rejection Reason Follow-Up",
                "Not Corrected: Comp 3 is unchanged.",
            )],
        };
        let report = revision_report(&outcome);
        assert!(report.contains("> Comp 3 is over a mile away."));
        assert!(report.contains("**1 of 1 checks failed.**"));
    }
}
