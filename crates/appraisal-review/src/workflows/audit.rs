//! Revised-vs-old full audit.
//!
//! Extracts the reconciliation, subject, certification, and header
//! sections from both versions of a report in one concurrent round,
//! then runs the consistency checks a reviewer walks through by hand:
//! did the value move, and do the identity fields still agree with
//! each other and with the client's order form.

use std::fmt::Write;
use std::path::Path;

use appraisal_core::extract::DocumentExtractor;
use appraisal_core::normalize::normalize;
use appraisal_core::section::Section;
use appraisal_core::types::{field_text, CheckResult, FieldMap, ReviewState};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::WorkflowError;
use crate::matcher::{values_match, MatchStrategy};
use crate::profile::{
    base_form_text, derive_appraisal_type, field_or_na, full_address, simplify_transaction_type,
    ADDITIONAL_FORM_FIELD,
};
use crate::validate::FHA_PLACEHOLDERS;
use crate::workflows::{check_from_finding, extract_labeled, Progress, FEE_INSTRUCTION};

/// Result of one revised-vs-old audit.
#[derive(Debug, Serialize)]
pub struct AuditOutcome {
    /// Whether the opinion of market value moved between versions.
    pub value_changed: bool,
    pub revised_value: String,
    pub old_value: String,
    pub checks: Vec<CheckResult>,
}

/// One report version's extracted sections, as the checks read them.
struct VersionSections<'a> {
    subject: &'a FieldMap,
    certification: &'a FieldMap,
    base_info: &'a FieldMap,
}

/// The per-source values one consistency check compares. `order` is
/// absent when no order form was supplied.
struct CheckSource {
    check: &'static str,
    revised: String,
    old: String,
    order: Option<String>,
    /// Name fields tolerate token-level differences on the order-form
    /// leg; everything else must agree exactly.
    name_match: bool,
}

impl CheckSource {
    fn into_check(self) -> CheckResult {
        if normalize(&self.revised) != normalize(&self.old) {
            let mut message = format!(
                "Revised report shows '{}' but the old report shows '{}'.",
                self.revised, self.old
            );
            if let Some(order) = &self.order {
                let _ = write!(message, " The order form shows '{order}'.");
            }
            return CheckResult::failed(self.check, message);
        }
        match &self.order {
            Some(order) => {
                let agrees = if self.name_match {
                    values_match(MatchStrategy::NameSubset, order, &self.revised)
                } else {
                    normalize(order) == normalize(&self.revised)
                };
                if agrees {
                    CheckResult::passed(
                        self.check,
                        format!(
                            "Consistent across the revised report, old report, and order form ('{}').",
                            self.revised
                        ),
                    )
                } else {
                    CheckResult::failed(
                        self.check,
                        format!(
                            "Both reports show '{}' but the order form shows '{order}'.",
                            self.revised
                        ),
                    )
                }
            }
            None => CheckResult::passed(
                self.check,
                format!(
                    "Revised and old reports agree ('{}'); no order form provided for cross-checking.",
                    self.revised
                ),
            ),
        }
    }
}

/// Audits a revised report against the old version it replaces.
///
/// All eight section extractions must succeed before any check runs;
/// a partial audit would read as a clean one. The order form and
/// engagement letter are optional and degrade with a note instead.
pub async fn audit_revision(
    extractor: &dyn DocumentExtractor,
    revised: &Path,
    old: &Path,
    order_form: Option<&FieldMap>,
    engagement_letter: Option<&Path>,
) -> Result<AuditOutcome, WorkflowError> {
    let mut progress = Progress::start("audit");
    progress.advance(ReviewState::Extracting);

    let sections = tokio::try_join!(
        extract_labeled(
            extractor,
            "revised_reconciliation",
            revised,
            Section::Reconciliation
        ),
        extract_labeled(extractor, "revised_subject", revised, Section::Subject),
        extract_labeled(
            extractor,
            "revised_certification",
            revised,
            Section::Certification
        ),
        extract_labeled(extractor, "revised_base_info", revised, Section::BaseInfo),
        extract_labeled(extractor, "old_reconciliation", old, Section::Reconciliation),
        extract_labeled(extractor, "old_subject", old, Section::Subject),
        extract_labeled(extractor, "old_certification", old, Section::Certification),
        extract_labeled(extractor, "old_base_info", old, Section::BaseInfo),
    );
    let (
        revised_reconciliation,
        revised_subject,
        revised_certification,
        revised_base_info,
        old_reconciliation,
        old_subject,
        old_certification,
        old_base_info,
    ) = match sections {
        Ok(sections) => sections,
        Err(err) => {
            progress.fail();
            return Err(err);
        }
    };

    progress.advance(ReviewState::Validating);

    let revised_value = field_or_na(&revised_reconciliation, "Opinion of Market Value $");
    let old_value = field_or_na(&old_reconciliation, "Opinion of Market Value $");
    let value_changed = normalize(&revised_value) != normalize(&old_value);

    let mut checks = Vec::new();
    if value_changed {
        checks.push(CheckResult::info(
            "Opinion of Market Value",
            format!("Opinion of market value changed from '{old_value}' to '{revised_value}'."),
        ));
    } else {
        checks.push(CheckResult::passed(
            "Opinion of Market Value",
            format!("Opinion of market value is unchanged ('{revised_value}')."),
        ));
    }

    let revised_sections = VersionSections {
        subject: &revised_subject,
        certification: &revised_certification,
        base_info: &revised_base_info,
    };
    let old_sections = VersionSections {
        subject: &old_subject,
        certification: &old_certification,
        base_info: &old_base_info,
    };
    for source in check_sources(&revised_sections, &old_sections, order_form) {
        checks.push(source.into_check());
    }

    checks.push(engagement_fee_check(extractor, engagement_letter).await);
    adjustment_checks(extractor, revised, &mut checks).await;

    progress.advance(ReviewState::Complete);
    Ok(AuditOutcome {
        value_changed,
        revised_value,
        old_value,
        checks,
    })
}

/// Case numbers come back as a grab-bag of placeholders on
/// conventional work; fold them all to empty so absence agrees with
/// absence.
fn fold_fha(text: &str) -> String {
    let trimmed = text.trim();
    if FHA_PLACEHOLDERS.contains(&trimmed) || trimmed == "Not Found" {
        String::new()
    } else {
        trimmed.to_string()
    }
}

fn check_sources(
    revised: &VersionSections<'_>,
    old: &VersionSections<'_>,
    order_form: Option<&FieldMap>,
) -> Vec<CheckSource> {
    let order = |key: &str| order_form.map(|form| field_or_na(form, key));
    let appraisal_type = |base_info: &FieldMap| {
        derive_appraisal_type(
            base_form_text(base_info).as_deref(),
            &field_text(base_info, ADDITIONAL_FORM_FIELD),
        )
    };

    vec![
        CheckSource {
            check: "Borrower",
            revised: field_or_na(revised.subject, "Borrower"),
            old: field_or_na(old.subject, "Borrower"),
            order: order("Borrower (and Co-Borrower)"),
            name_match: true,
        },
        CheckSource {
            check: "Property Address",
            revised: full_address(revised.subject),
            old: full_address(old.subject),
            order: order("Property Address"),
            name_match: false,
        },
        CheckSource {
            check: "Lender Name",
            revised: field_or_na(revised.subject, "Lender/Client"),
            old: field_or_na(old.subject, "Lender/Client"),
            order: order("Client/Lender Name"),
            name_match: false,
        },
        CheckSource {
            check: "Lender Address",
            revised: field_or_na(revised.subject, "Address (Lender/Client)"),
            old: field_or_na(old.subject, "Address (Lender/Client)"),
            order: order("Lender Address"),
            name_match: false,
        },
        CheckSource {
            check: "Appraiser Name",
            revised: field_or_na(revised.certification, "Name"),
            old: field_or_na(old.certification, "Name"),
            order: order("Assigned to Vendor(s)"),
            name_match: true,
        },
        CheckSource {
            check: "FHA Case Number",
            revised: fold_fha(&field_text(revised.subject, "FHA")),
            old: fold_fha(&field_text(old.subject, "FHA")),
            order: order_form.map(|form| fold_fha(&field_text(form, "FHA Case Number"))),
            name_match: false,
        },
        CheckSource {
            check: "Appraisal Type",
            revised: appraisal_type(revised.base_info),
            old: appraisal_type(old.base_info),
            order: order("Appraisal Type"),
            name_match: false,
        },
        CheckSource {
            check: "Transaction Type",
            revised: simplify_transaction_type(&field_or_na(revised.subject, "Assignment Type")),
            old: simplify_transaction_type(&field_or_na(old.subject, "Assignment Type")),
            order: order("Transaction Type"),
            name_match: false,
        },
    ]
}

async fn engagement_fee_check(
    extractor: &dyn DocumentExtractor,
    engagement_letter: Option<&Path>,
) -> CheckResult {
    const CHECK: &str = "Engagement Letter Fee";
    let Some(path) = engagement_letter else {
        return CheckResult::skipped(CHECK, "No engagement letter provided.");
    };
    let documents = [path.to_path_buf()];
    match extractor
        .extract(&documents, Section::ReportDetails, Some(FEE_INSTRUCTION))
        .await
    {
        Ok(map) => {
            let rendered = serde_json::to_string(&Value::Object(map)).unwrap_or_default();
            CheckResult::info(CHECK, format!("Extracted fee details: {rendered}"))
        }
        Err(err) => {
            warn!("Engagement letter extraction failed: {err}");
            CheckResult::skipped(CHECK, format!("Engagement letter could not be read: {err}"))
        }
    }
}

/// Appends the model's sales-grid adjustment review of the revised
/// report. These detailed validations degrade to a note instead of
/// failing the audit.
async fn adjustment_checks(
    extractor: &dyn DocumentExtractor,
    revised: &Path,
    checks: &mut Vec<CheckResult>,
) {
    const CHECK: &str = "Adjustment Analysis";
    let payload = match extractor
        .extract_one(revised, Section::SalesGridAdjustment)
        .await
    {
        Ok(map) => map,
        Err(err) => {
            warn!("Adjustment analysis extraction failed: {err}");
            checks.push(CheckResult::skipped(
                CHECK,
                format!("Detailed adjustment validations unavailable: {err}"),
            ));
            return;
        }
    };
    let Some(analysis) = payload.get("adjustment_analysis").and_then(Value::as_object) else {
        checks.push(CheckResult::skipped(
            CHECK,
            "The model returned no adjustment analysis.",
        ));
        return;
    };
    if let Some(summary) = analysis.get("summary").and_then(Value::as_str) {
        if !summary.trim().is_empty() {
            checks.push(CheckResult::info(CHECK, summary.trim()));
        }
    }
    if let Some(details) = analysis.get("details").and_then(Value::as_array) {
        for detail in details {
            if let Some(text) = detail.as_str() {
                checks.push(check_from_finding(CHECK, text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appraisal_core::types::CheckStatus;
    use serde_json::json;

    fn map(value: serde_json::Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    fn subject() -> FieldMap {
        map(json!({
            "Borrower": "John Doe",
            "Property Address": "500 Elm St",
            "City": "Austin",
            "State": "TX",
            "Zip Code": "78701",
            "Lender/Client": "Visio Lending LLC",
            "Address (Lender/Client)": "1905 Kramer Ln, Austin, TX",
            "FHA": null,
            "Assignment Type": "Refinance Transaction",
        }))
    }

    fn certification() -> FieldMap {
        map(json!({ "Name": "Jane Q. Appraiser" }))
    }

    fn base_info() -> FieldMap {
        map(json!({
            "APPRAISAL FORM TYPE (1004/1025/1004D/1073)": "1004",
            ADDITIONAL_FORM_FIELD: "None",
        }))
    }

    fn order_form() -> FieldMap {
        map(json!({
            "Borrower (and Co-Borrower)": "John Doe",
            "Property Address": "500 Elm St, Austin, TX 78701",
            "Client/Lender Name": "Visio Lending, LLC",
            "Lender Address": "1905 Kramer Ln Austin TX",
            "Assigned to Vendor(s)": "Jane Appraiser",
            "FHA Case Number": "Not Found",
            "Appraisal Type": "1004",
            "Transaction Type": "Refinance",
        }))
    }

    fn run_checks(
        revised_subject: &FieldMap,
        old_subject: &FieldMap,
        order_form: Option<&FieldMap>,
    ) -> Vec<CheckResult> {
        let certification = certification();
        let base_info = base_info();
        let revised = VersionSections {
            subject: revised_subject,
            certification: &certification,
            base_info: &base_info,
        };
        let old = VersionSections {
            subject: old_subject,
            certification: &certification,
            base_info: &base_info,
        };
        check_sources(&revised, &old, order_form)
            .into_iter()
            .map(CheckSource::into_check)
            .collect()
    }

    #[test]
    fn consistent_sources_pass_every_check() {
        let subject = subject();
        let order = order_form();
        let checks = run_checks(&subject, &subject, Some(&order));
        assert_eq!(checks.len(), 8);
        for check in &checks {
            assert_eq!(
                check.status,
                CheckStatus::Passed,
                "{}: {}",
                check.check,
                check.message
            );
        }
    }

    #[test]
    fn version_disagreement_fails_with_both_values() {
        let revised = subject();
        let mut old = subject();
        old.insert("Borrower".into(), json!("Jane Roe"));
        let checks = run_checks(&revised, &old, None);
        let borrower = &checks[0];
        assert_eq!(borrower.status, CheckStatus::Failed);
        assert_eq!(
            borrower.message,
            "Revised report shows 'John Doe' but the old report shows 'Jane Roe'."
        );
    }

    #[test]
    fn order_form_disagreement_fails_after_versions_agree() {
        let subject = subject();
        let mut order = order_form();
        order.insert("Transaction Type".into(), json!("Purchase"));
        let checks = run_checks(&subject, &subject, Some(&order));
        let transaction = checks
            .iter()
            .find(|c| c.check == "Transaction Type")
            .unwrap();
        assert_eq!(transaction.status, CheckStatus::Failed);
        assert_eq!(
            transaction.message,
            "Both reports show 'Refinance' but the order form shows 'Purchase'."
        );
    }

    #[test]
    fn missing_order_form_degrades_to_a_note() {
        let subject = subject();
        let checks = run_checks(&subject, &subject, None);
        for check in &checks {
            assert_eq!(check.status, CheckStatus::Passed);
            assert!(check.message.contains("no order form provided"));
        }
    }

    #[test]
    fn fha_placeholders_agree_with_absence() {
        assert_eq!(fold_fha("N/A"), "");
        assert_eq!(fold_fha("--"), "");
        assert_eq!(fold_fha("Not Found"), "");
        assert_eq!(fold_fha(" 011-1234567 "), "011-1234567");
    }

    #[test]
    fn appraiser_name_tolerates_middle_initials_on_the_order_leg() {
        let subject = subject();
        let order = order_form();
        let checks = run_checks(&subject, &subject, Some(&order));
        let appraiser = checks.iter().find(|c| c.check == "Appraiser Name").unwrap();
        // Certification says "Jane Q. Appraiser", order form "Jane
        // Appraiser": first and last tokens agree.
        assert_eq!(appraiser.status, CheckStatus::Passed);
    }
}
