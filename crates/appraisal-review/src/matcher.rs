//! Per-field match strategies for cross-document reconciliation.
//!
//! Side A is the authoritative document (the client's order form) and
//! side B is the report-derived profile. Most fields compare on
//! normalized text, but a handful need looser rules: institution names
//! wrap differently, vendor names carry middle initial noise, and the
//! appraisal type is a bag of add-on forms rather than one string.

use appraisal_core::normalize::{
    appraisal_type_keywords, name_tokens, normalize, normalize_space_agnostic, unit_from_address,
};
use appraisal_core::types::{field_text, value_text, FieldMap};
use serde_json::Value;

/// How the two sides of a field are judged equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStrategy {
    /// Normalized exact equality.
    Exact,
    /// Side B's normalized text must appear within side A's.
    Substring,
    /// Normalized equality ignoring all whitespace.
    SpaceAgnostic,
    /// Side B's add-on form keywords must be a subset of side A's.
    KeywordSubset,
    /// Side B's first and last name tokens must both appear among
    /// side A's tokens.
    NameSubset,
    /// Compares unit numbers, deriving each side's value from its own
    /// property address when the field itself is absent.
    UnitFromAddress,
}

/// The strategy registry. Every field not named here compares exactly.
#[must_use]
pub fn strategy_for(field: &str) -> MatchStrategy {
    match field {
        "Unit Number" => MatchStrategy::UnitFromAddress,
        "Assigned to Vendor(s)" => MatchStrategy::NameSubset,
        "Appraisal Type" => MatchStrategy::KeywordSubset,
        "Transaction Type" => MatchStrategy::Substring,
        "Client/Lender Name" | "Lender Address" | "Property Address" => {
            MatchStrategy::SpaceAgnostic
        }
        _ => MatchStrategy::Exact,
    }
}

/// The value a side brings to the comparison. Ordinary fields pass
/// through as-is (missing keys become `null`); unit numbers fall back
/// to the unit parsed out of the same side's `Property Address`, or
/// `"N/A"` when no unit marker is present there either.
#[must_use]
pub fn effective_value(field: &str, side: &FieldMap) -> Value {
    if strategy_for(field) == MatchStrategy::UnitFromAddress {
        if let Some(value) = side.get(field) {
            if !value_text(value).trim().is_empty() {
                return value.clone();
            }
        }
        let address = field_text(side, "Property Address");
        let unit = unit_from_address(&address).unwrap_or_else(|| "N/A".to_string());
        return Value::String(unit);
    }
    side.get(field).cloned().unwrap_or(Value::Null)
}

/// Applies `strategy` to the rendered values of both sides.
#[must_use]
pub fn values_match(strategy: MatchStrategy, a: &str, b: &str) -> bool {
    match strategy {
        MatchStrategy::Exact | MatchStrategy::UnitFromAddress => normalize(a) == normalize(b),
        MatchStrategy::Substring => normalize(a).contains(&normalize(b)),
        MatchStrategy::SpaceAgnostic => {
            normalize_space_agnostic(a) == normalize_space_agnostic(b)
        }
        MatchStrategy::KeywordSubset => {
            appraisal_type_keywords(b).is_subset(&appraisal_type_keywords(a))
        }
        MatchStrategy::NameSubset => {
            let a_tokens = name_tokens(a);
            let b_tokens = name_tokens(b);
            if b_tokens.len() >= 2 {
                // First and last survive even when one side drops the
                // middle name or appends a company suffix.
                a_tokens.contains(&b_tokens[0])
                    && a_tokens.contains(&b_tokens[b_tokens.len() - 1])
            } else {
                normalize(a).contains(&normalize(b))
            }
        }
    }
}
