//! Order-form-aligned profile of an appraisal report.
//!
//! The client's order form is a flat list of intake fields, while the
//! report's data lives across several extracted sections. This module
//! folds the report down to the same thirteen keys so the comparison
//! engine can line the two up directly.

use std::path::Path;

use appraisal_core::extract::DocumentExtractor;
use appraisal_core::normalize::{strip_punctuation, unit_from_address};
use appraisal_core::section::Section;
use appraisal_core::types::{field_text, FieldMap};
use serde_json::Value;
use tracing::warn;

use crate::error::WorkflowError;
use crate::validate::REPORT_TYPE_FIELD;

/// Header field naming the base form the report was written on.
pub const BASE_FORM_FIELD: &str = "APPRAISAL FORM TYPE (1004/1025/1004D/1073)";

/// Header field listing add-on forms attached to the report.
pub const ADDITIONAL_FORM_FIELD: &str = "Additional Form (1007/216/Rental/STR)";

/// The keys a profile carries, aligned with the order form.
pub const PROFILE_FIELDS: [&str; 13] = [
    "Client/Lender Name",
    "Lender Address",
    "FHA Case Number",
    "Transaction Type",
    "AMC Reg. Number",
    "Borrower (and Co-Borrower)",
    "Property Type",
    "Unit Number",
    "Property Address",
    "Property County",
    "Appraisal Type",
    "Assigned to Vendor(s)",
    "UAD XML Report",
];

/// One extracted section with its failure state folded in. The profile
/// degrades field by field instead of dying on a secondary section.
struct SectionSlot {
    map: FieldMap,
    errored: bool,
}

impl SectionSlot {
    fn ok(map: FieldMap) -> Self {
        Self {
            map,
            errored: false,
        }
    }

    fn from_result(section: Section, result: appraisal_core::error::Result<FieldMap>) -> Self {
        match result {
            Ok(map) => Self::ok(map),
            Err(err) => {
                warn!(
                    "Section '{}' failed during profile build: {err}",
                    section.key()
                );
                Self {
                    map: FieldMap::new(),
                    errored: true,
                }
            }
        }
    }

    /// Reviewer-facing text of one field. Missing and empty values
    /// collapse to `"N/A"`, errored sections to `"N/A (API Error)"`.
    fn get(&self, key: &str) -> String {
        if self.errored {
            return "N/A (API Error)".to_string();
        }
        field_or_na(&self.map, key)
    }
}

/// Reviewer-facing text of one field: missing and empty collapse to
/// `"N/A"`.
pub(crate) fn field_or_na(map: &FieldMap, key: &str) -> String {
    let text = field_text(map, key);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "N/A".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Single-line site address in the order form's style.
pub(crate) fn full_address(subject: &FieldMap) -> String {
    format!(
        "{}, {}, {} {}",
        field_or_na(subject, "Property Address"),
        field_or_na(subject, "City"),
        field_or_na(subject, "State"),
        field_or_na(subject, "Zip Code"),
    )
}

/// Base form named in the header section, when extraction produced a
/// real value.
pub(crate) fn base_form_text(map: &FieldMap) -> Option<String> {
    let text = field_text(map, BASE_FORM_FIELD);
    match text.trim() {
        "" | "N/A" | "null" | "--" => None,
        trimmed => Some(trimmed.to_string()),
    }
}

/// Extracts the subject, improvements, certification, appraisal
/// identification, and header sections concurrently and folds them to
/// the order-form keys.
///
/// Nearly every profile field hangs off the subject section, so a
/// subject failure aborts the build. The secondary sections degrade to
/// `"N/A (API Error)"` values instead.
pub async fn report_profile(
    extractor: &dyn DocumentExtractor,
    document: &Path,
) -> Result<FieldMap, WorkflowError> {
    let (subject, improvements, certification, appraisal_id, base_info) = tokio::join!(
        extractor.extract_one(document, Section::Subject),
        extractor.extract_one(document, Section::Improvements),
        extractor.extract_one(document, Section::Certification),
        extractor.extract_one(document, Section::AppraisalId),
        extractor.extract_one(document, Section::BaseInfo),
    );

    let subject =
        SectionSlot::ok(subject.map_err(|err| WorkflowError::extraction("subject", err))?);
    let improvements = SectionSlot::from_result(Section::Improvements, improvements);
    let certification = SectionSlot::from_result(Section::Certification, certification);
    let appraisal_id = SectionSlot::from_result(Section::AppraisalId, appraisal_id);
    let base_info = SectionSlot::from_result(Section::BaseInfo, base_info);

    Ok(build_profile(
        &subject,
        &improvements,
        &certification,
        &appraisal_id,
        &base_info,
    ))
}

fn build_profile(
    subject: &SectionSlot,
    improvements: &SectionSlot,
    certification: &SectionSlot,
    appraisal_id: &SectionSlot,
    base_info: &SectionSlot,
) -> FieldMap {
    let report_type = appraisal_id.get(REPORT_TYPE_FIELD);
    let property_type = improvements.get("Type");
    let street = subject.get("Property Address");

    let report_type_lower = report_type.to_lowercase();
    let is_condo = report_type_lower.contains("condo")
        || report_type_lower.contains("1073")
        || property_type.to_lowercase().contains("condo");
    let unit_number = if is_condo {
        unit_from_address(&street).unwrap_or_else(|| "N/A".to_string())
    } else {
        "N/A".to_string()
    };

    let address = full_address(&subject.map);

    let mut profile = FieldMap::new();
    let mut put = |key: &str, value: String| {
        profile.insert(key.to_string(), Value::String(value));
    };
    put(
        "Client/Lender Name",
        strip_punctuation(&subject.get("Lender/Client")),
    );
    put(
        "Lender Address",
        strip_punctuation(&subject.get("Address (Lender/Client)")),
    );
    put("FHA Case Number", subject.get("FHA"));
    put(
        "Transaction Type",
        simplify_transaction_type(&subject.get("Assignment Type")),
    );
    put("AMC Reg. Number", "N/A (Not in PDF)".to_string());
    put("Borrower (and Co-Borrower)", subject.get("Borrower"));
    put("Property Type", property_type);
    put("Unit Number", unit_number);
    put("Property Address", address);
    put("Property County", subject.get("County"));
    put(
        "Appraisal Type",
        derive_appraisal_type(base_form(base_info).as_deref(), &report_type),
    );
    put("Assigned to Vendor(s)", certification.get("Name"));
    put("UAD XML Report", "N/A (Not in PDF)".to_string());
    profile
}

/// Folds an assignment-type narrative down to the word the order form
/// uses. Unrecognized wording passes through for the reviewer to see.
#[must_use]
pub fn simplify_transaction_type(value: &str) -> String {
    let lowered = value.to_lowercase();
    if lowered.contains("purchase") {
        "Purchase".to_string()
    } else if lowered.contains("refinance") {
        "Refinance".to_string()
    } else {
        value.to_string()
    }
}

/// Combines the base form with any add-on forms found in `form_list`
/// into the order form's `"1004 + 1007"` style. With neither in hand,
/// the raw form list stands in, or `"Not Found"` when even that is
/// blank.
#[must_use]
pub fn derive_appraisal_type(base: Option<&str>, form_list: &str) -> String {
    let lowered = form_list.to_lowercase();
    let mut addons = Vec::new();
    if lowered.contains("1007")
        || lowered.contains("rent schedule")
        || lowered.contains("str")
        || lowered.contains("rental")
    {
        addons.push("1007");
    }
    if lowered.contains("216") || lowered.contains("operating income") {
        addons.push("216");
    }

    match (base, addons.is_empty()) {
        (Some(base), false) => format!("{base} + {}", addons.join(" + ")),
        (Some(base), true) => base.to_string(),
        (None, false) => addons.join(" + "),
        (None, true) => {
            let raw = form_list.trim();
            if raw.is_empty() {
                "Not Found".to_string()
            } else {
                raw.to_string()
            }
        }
    }
}

fn base_form(slot: &SectionSlot) -> Option<String> {
    if slot.errored {
        return None;
    }
    base_form_text(&slot.map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slot(value: serde_json::Value) -> SectionSlot {
        SectionSlot::ok(value.as_object().cloned().unwrap())
    }

    fn errored() -> SectionSlot {
        SectionSlot {
            map: FieldMap::new(),
            errored: true,
        }
    }

    fn sample_subject() -> SectionSlot {
        slot(json!({
            "Lender/Client": "Visio Lending, LLC",
            "Address (Lender/Client)": "1905 Kramer Ln; Austin, TX",
            "FHA": null,
            "Assignment Type": "Refinance Transaction",
            "Borrower": "John Doe",
            "Property Address": "500 Elm St Unit 12B",
            "City": "Austin",
            "State": "TX",
            "Zip Code": "78701",
            "County": "Travis",
        }))
    }

    #[test]
    fn profile_carries_every_order_form_key() {
        let profile = build_profile(
            &sample_subject(),
            &slot(json!({ "Type": "Det." })),
            &slot(json!({ "Name": "Jane Appraiser" })),
            &slot(json!({ REPORT_TYPE_FIELD: "1004" })),
            &slot(json!({ BASE_FORM_FIELD: "1004" })),
        );
        for key in PROFILE_FIELDS {
            assert!(profile.contains_key(key), "missing {key}");
        }
        assert_eq!(profile.len(), PROFILE_FIELDS.len());
    }

    #[test]
    fn profile_cleans_and_simplifies_subject_fields() {
        let profile = build_profile(
            &sample_subject(),
            &slot(json!({ "Type": "Det." })),
            &slot(json!({ "Name": "Jane Appraiser" })),
            &slot(json!({ REPORT_TYPE_FIELD: "1004" })),
            &slot(json!({ BASE_FORM_FIELD: "1004" })),
        );
        assert_eq!(
            field_text(&profile, "Client/Lender Name"),
            "Visio Lending LLC"
        );
        assert_eq!(field_text(&profile, "Transaction Type"), "Refinance");
        assert_eq!(field_text(&profile, "FHA Case Number"), "N/A");
        assert_eq!(
            field_text(&profile, "Property Address"),
            "500 Elm St Unit 12B, Austin, TX 78701"
        );
        assert_eq!(field_text(&profile, "Appraisal Type"), "1004");
        assert_eq!(field_text(&profile, "AMC Reg. Number"), "N/A (Not in PDF)");
        // Detached home on a 1004: no unit expected.
        assert_eq!(field_text(&profile, "Unit Number"), "N/A");
    }

    #[test]
    fn condo_reports_pull_the_unit_from_the_address() {
        let profile = build_profile(
            &sample_subject(),
            &slot(json!({ "Type": "Condo" })),
            &slot(json!({ "Name": "Jane Appraiser" })),
            &slot(json!({ REPORT_TYPE_FIELD: "1073" })),
            &slot(json!({ BASE_FORM_FIELD: "1073" })),
        );
        assert_eq!(field_text(&profile, "Unit Number"), "12B");
    }

    #[test]
    fn errored_secondary_sections_degrade_to_api_error_values() {
        let profile = build_profile(
            &sample_subject(),
            &errored(),
            &errored(),
            &slot(json!({ REPORT_TYPE_FIELD: "1004" })),
            &slot(json!({ BASE_FORM_FIELD: "1004" })),
        );
        assert_eq!(field_text(&profile, "Property Type"), "N/A (API Error)");
        assert_eq!(
            field_text(&profile, "Assigned to Vendor(s)"),
            "N/A (API Error)"
        );
        // Subject-sourced fields are untouched.
        assert_eq!(field_text(&profile, "Borrower (and Co-Borrower)"), "John Doe");
    }

    #[test]
    fn appraisal_type_combines_base_and_addons() {
        assert_eq!(
            derive_appraisal_type(Some("1004"), "1007 Rent Schedule and 216"),
            "1004 + 1007 + 216"
        );
        assert_eq!(derive_appraisal_type(Some("1025"), "None"), "1025");
        assert_eq!(derive_appraisal_type(None, "Operating Income Statement"), "216");
        assert_eq!(derive_appraisal_type(None, "Special Program"), "Special Program");
        assert_eq!(derive_appraisal_type(None, "  "), "Not Found");
    }

    #[test]
    fn simplify_transaction_type_folds_known_wording() {
        assert_eq!(simplify_transaction_type("Purchase Transaction"), "Purchase");
        assert_eq!(simplify_transaction_type("No Cash-Out Refinance"), "Refinance");
        assert_eq!(simplify_transaction_type("Other (describe)"), "Other (describe)");
    }
}
