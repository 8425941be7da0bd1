//! Escalation review of a delivered report against its order form.
//!
//! The heavy lifting happens in two places. Locally, the report is
//! folded to an order-form profile and compared field by field. For
//! the judgment calls (value reasonableness, repair evidence, zoning
//! language) the workflow hands the model a cross-document context
//! payload and folds its checklist findings back into [`CheckResult`]s,
//! then appends the deterministic language and sale-history checks.

use std::path::Path;

use appraisal_core::catalog::fields_for;
use appraisal_core::extract::DocumentExtractor;
use appraisal_core::section::Section;
use appraisal_core::types::{value_text, CheckResult, ComparisonRow, FieldMap, ReviewState};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::engine::compare_field_maps;
use crate::error::WorkflowError;
use crate::profile::report_profile;
use crate::validate::{is_fha_case, neighborhood_language, sale_history_checks};
use crate::workflows::{check_from_finding, extract_labeled, Progress, FEE_INSTRUCTION};

/// What an escalation review produces: the order-form-vs-report field
/// comparison and the ordered finding list (model checklist findings
/// first, deterministic validations after).
#[derive(Debug, Serialize)]
pub struct EscalationOutcome {
    pub comparison: Vec<ComparisonRow>,
    pub findings: Vec<CheckResult>,
}

/// Runs the escalation checklist for one delivered report.
///
/// The order form arrives pre-parsed so callers can reuse one read for
/// several workflows. The purchase contract and engagement letter are
/// optional; when one is missing or unreadable its slot in the model's
/// context payload is an empty object and the affected checks come
/// back as `N/A` findings.
pub async fn escalation_review(
    extractor: &dyn DocumentExtractor,
    report: &Path,
    order_form: &FieldMap,
    purchase_contract: Option<&Path>,
    engagement_letter: Option<&Path>,
) -> Result<EscalationOutcome, WorkflowError> {
    let mut progress = Progress::start("escalation");
    progress.advance(ReviewState::Extracting);

    let profile = match report_profile(extractor, report).await {
        Ok(profile) => profile,
        Err(err) => {
            progress.fail();
            return Err(err);
        }
    };

    let sections = tokio::try_join!(
        extract_labeled(extractor, "report_subject", report, Section::Subject),
        extract_labeled(extractor, "report_improvements", report, Section::Improvements),
        extract_labeled(
            extractor,
            "report_reconciliation",
            report,
            Section::Reconciliation
        ),
        extract_labeled(
            extractor,
            "report_certification",
            report,
            Section::Certification
        ),
        extract_labeled(extractor, "report_appraisal_id", report, Section::AppraisalId),
        extract_labeled(extractor, "report_site", report, Section::Site),
        extract_labeled(extractor, "report_neighborhood", report, Section::Neighborhood),
        extract_labeled(extractor, "report_contract", report, Section::Contract),
        extract_labeled(extractor, "report_sale_history", report, Section::SaleHistory),
    );
    let (
        subject,
        improvements,
        reconciliation,
        certification,
        appraisal_id,
        site,
        neighborhood,
        contract,
        sale_history,
    ) = match sections {
        Ok(sections) => sections,
        Err(err) => {
            progress.fail();
            return Err(err);
        }
    };

    let purchase_data = match purchase_contract {
        Some(path) => match extractor.extract_one(path, Section::Contract).await {
            Ok(map) => map,
            Err(err) => {
                warn!("Purchase contract could not be read: {err}");
                FieldMap::new()
            }
        },
        None => FieldMap::new(),
    };
    let engagement_data = match engagement_letter {
        Some(path) => {
            let documents = [path.to_path_buf()];
            match extractor
                .extract(&documents, Section::ReportDetails, Some(FEE_INSTRUCTION))
                .await
            {
                Ok(map) => map,
                Err(err) => {
                    warn!("Engagement letter could not be read: {err}");
                    FieldMap::new()
                }
            }
        }
        None => FieldMap::new(),
    };

    let context = json!({
        "order_form_data": order_form,
        "appraisal_report_data": {
            "subject": subject,
            "improvements": improvements,
            "reconciliation": reconciliation,
            "certification": certification,
            "appraisal_id": appraisal_id,
            "site": site,
            "neighborhood": neighborhood,
            "contract": contract,
            "sale_history": sale_history,
        },
        "purchase_contract_data": purchase_data,
        "engagement_letter_data": engagement_data,
    });
    let context_text = serde_json::to_string(&context).unwrap_or_else(|_| "{}".to_string());

    let documents = [report.to_path_buf()];
    let escalation = match extractor
        .extract(&documents, Section::EscalationCheck, Some(&context_text))
        .await
    {
        Ok(map) => map,
        Err(err) => {
            progress.fail();
            return Err(WorkflowError::extraction("escalation_check", err));
        }
    };

    progress.advance(ReviewState::Validating);

    let comparison = compare_field_maps(order_form, &profile, "Order Form", "Appraisal Report");
    let findings = fold_findings(&escalation, &subject, &neighborhood, &sale_history);

    progress.advance(ReviewState::Complete);
    Ok(EscalationOutcome {
        comparison,
        findings,
    })
}

/// Model checklist findings first, then the local validations that do
/// not need a model: forbidden neighborhood language and the four
/// sale-history rules.
///
/// Checklist findings keep the catalog's category order, not the field
/// map's key order; answers to questions the catalog does not list are
/// appended after the known ones.
fn fold_findings(
    escalation: &FieldMap,
    subject: &FieldMap,
    neighborhood: &FieldMap,
    sale_history: &FieldMap,
) -> Vec<CheckResult> {
    let questions = fields_for(Section::EscalationCheck).names();
    let mut findings: Vec<CheckResult> = Vec::with_capacity(escalation.len() + 5);
    for question in &questions {
        if let Some(finding) = escalation.get(*question) {
            findings.push(check_from_finding(
                (*question).to_string(),
                &value_text(finding),
            ));
        }
    }
    for (check, finding) in escalation {
        if !questions.contains(&check.as_str()) {
            findings.push(check_from_finding(check.clone(), &value_text(finding)));
        }
    }
    findings.push(neighborhood_language(
        neighborhood,
        is_fha_case(subject),
    ));
    findings.extend(sale_history_checks(sale_history));
    findings
}
