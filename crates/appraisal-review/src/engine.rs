//! Field-by-field comparison of two extracted documents.

use appraisal_core::types::{value_text, ComparisonRow, FieldMap};

use crate::diff;
use crate::matcher::{effective_value, strategy_for, values_match};

/// Compares every field present on either side and returns one row per
/// field, ordered by field name. Side A is the authoritative document;
/// `label_a` and `label_b` caption the diff columns rendered for
/// mismatched rows.
#[must_use]
pub fn compare_field_maps(
    a: &FieldMap,
    b: &FieldMap,
    label_a: &str,
    label_b: &str,
) -> Vec<ComparisonRow> {
    let mut keys: Vec<&str> = a.keys().chain(b.keys()).map(String::as_str).collect();
    keys.sort_unstable();
    keys.dedup();

    keys.into_iter()
        .map(|field| {
            let value_a = effective_value(field, a);
            let value_b = effective_value(field, b);
            let text_a = value_text(&value_a);
            let text_b = value_text(&value_b);
            let matched = values_match(strategy_for(field), &text_a, &text_b);
            let diff =
                (!matched).then(|| diff::side_by_side(&text_a, &text_b, label_a, label_b));
            ComparisonRow {
                field: field.to_string(),
                value_a,
                value_b,
                matched,
                diff,
            }
        })
        .collect()
}

/// Names of the fields that did not match, in row order.
#[must_use]
pub fn mismatched_fields(rows: &[ComparisonRow]) -> Vec<&str> {
    rows.iter()
        .filter(|row| !row.matched)
        .map(|row| row.field.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn rows_cover_the_union_of_keys_in_sorted_order() {
        let a = map(json!({ "Borrower": "John Doe", "FHA Case Number": "011-1234567" }));
        let b = map(json!({ "Borrower": "John Doe", "Property County": "Travis" }));
        let rows = compare_field_maps(&a, &b, "Order Form", "Report");
        let fields: Vec<&str> = rows.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, ["Borrower", "FHA Case Number", "Property County"]);
    }

    #[test]
    fn matched_rows_carry_no_diff() {
        let a = map(json!({ "Borrower": "John Doe" }));
        let b = map(json!({ "Borrower": "john doe," }));
        let rows = compare_field_maps(&a, &b, "Order Form", "Report");
        assert!(rows[0].matched);
        assert!(rows[0].diff.is_none());
    }

    #[test]
    fn mismatched_rows_render_a_labeled_diff() {
        let a = map(json!({ "Borrower": "John Doe" }));
        let b = map(json!({ "Borrower": "Jane Roe" }));
        let rows = compare_field_maps(&a, &b, "Order Form", "Report");
        assert!(!rows[0].matched);
        let diff = rows[0].diff.as_deref().unwrap();
        assert!(diff.starts_with("Order Form"));
        assert!(diff.contains("John Doe"));
        assert!(diff.contains("Jane Roe"));
        assert_eq!(mismatched_fields(&rows), ["Borrower"]);
    }

    #[test]
    fn transaction_type_accepts_simplified_wording() {
        let a = map(json!({ "Transaction Type": "Refinance Transaction" }));
        let b = map(json!({ "Transaction Type": "Refinance" }));
        let rows = compare_field_maps(&a, &b, "A", "B");
        assert!(rows[0].matched);
    }

    #[test]
    fn unit_number_rows_show_what_was_compared() {
        // Only the profile carries the field; the order form derives
        // its unit from its own address.
        let order_form = map(json!({
            "Property Address": "500 Elm St Unit 12B, Austin, TX 78701",
        }));
        let profile = map(json!({
            "Unit Number": "12B",
            "Property Address": "500 Elm St Unit 12B, Austin, TX 78701",
        }));
        let rows = compare_field_maps(&order_form, &profile, "Order Form", "Report");
        let unit_row = rows.iter().find(|r| r.field == "Unit Number").unwrap();
        assert!(unit_row.matched);
        assert_eq!(unit_row.value_a, json!("12B"));
        assert_eq!(unit_row.value_b, json!("12B"));
    }

    #[test]
    fn unitless_property_matches_profile_na() {
        let order_form = map(json!({ "Property Address": "500 Elm St, Austin, TX" }));
        let profile = map(json!({
            "Unit Number": "N/A",
            "Property Address": "500 Elm St, Austin, TX",
        }));
        let rows = compare_field_maps(&order_form, &profile, "Order Form", "Report");
        let unit_row = rows.iter().find(|r| r.field == "Unit Number").unwrap();
        assert!(unit_row.matched);
    }
}
