//! Text normalization used by field comparison.
//!
//! Extracted values arrive with inconsistent punctuation, casing, and
//! spacing between document sources, so every comparison strategy works
//! on one of these canonical forms instead of the raw text. All
//! functions are total; `null` handling happens upstream where values
//! are stringified.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,:;]").expect("Invalid punctuation regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
static PUNCT_OR_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,:;\s]").expect("Invalid separator regex"));
static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("Invalid token regex"));
static UNIT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:unit|#|apt|condo)\s*(\w+)").expect("Invalid unit regex"));

/// Canonical comparison form: commas, colons, and semicolons removed,
/// runs of whitespace collapsed to one space, trimmed, lowercased.
#[must_use]
pub fn normalize(value: &str) -> String {
    let stripped = PUNCTUATION.replace_all(value, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_lowercase()
}

/// Like [`normalize`] but with whitespace removed entirely. Addresses
/// and institution names line-wrap differently per source, so equality
/// for those ignores spacing altogether.
#[must_use]
pub fn normalize_space_agnostic(value: &str) -> String {
    PUNCT_OR_SPACE.replace_all(value, "").to_lowercase()
}

/// Punctuation stripped but case and spacing kept, for display.
#[must_use]
pub fn strip_punctuation(value: &str) -> String {
    PUNCTUATION.replace_all(value, "").trim().to_string()
}

/// Lowercased name tokens with everything non-alphanumeric removed.
/// Order is preserved so callers can reach the first and last token.
#[must_use]
pub fn name_tokens(value: &str) -> Vec<String> {
    let lowered = value.to_lowercase();
    let cleaned = NON_ALNUM.replace_all(&lowered, "");
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Add-on form keywords recognized in an appraisal-type description.
/// `"1004 + 1007"`, `"STR Rental"`, and `"Rent Schedule"` all imply the
/// 1007 addendum; `"216"` and `"Operating Income"` imply the 216.
#[must_use]
pub fn appraisal_type_keywords(value: &str) -> BTreeSet<&'static str> {
    let lowered = value.to_lowercase();
    let mut keywords = BTreeSet::new();
    if lowered.contains("1007") || lowered.contains("str rental") || lowered.contains("rent schedule")
    {
        keywords.insert("1007");
    }
    if lowered.contains("216") || lowered.contains("operating income") {
        keywords.insert("216");
    }
    keywords
}

/// First unit-number-looking token in an address, e.g. `"Unit 104"`,
/// `"#104"`, `"Apt 104"`, or `"Condo 104"` all yield `"104"`.
#[must_use]
pub fn unit_from_address(address: &str) -> Option<String> {
    UNIT_NUMBER
        .captures(address)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_strips_punctuation_and_collapses_spaces() {
        assert_eq!(normalize("Visio Lending,  LLC: "), "visio lending llc");
        assert_eq!(normalize("  "), "");
        assert_eq!(normalize("123   Main\tSt;"), "123 main st");
    }

    #[test]
    fn space_agnostic_ignores_line_wrap_differences() {
        assert_eq!(
            normalize_space_agnostic("123 Main St, Suite 4"),
            normalize_space_agnostic("123MainSt Suite4")
        );
        assert_eq!(normalize_space_agnostic("A; B: C,"), "abc");
    }

    #[test]
    fn strip_punctuation_keeps_case() {
        assert_eq!(strip_punctuation("Lender: ACME, Inc;"), "Lender ACME Inc");
    }

    #[test]
    fn name_tokens_drop_honorific_dots() {
        assert_eq!(
            name_tokens("Mr. John David Smith"),
            vec!["mr", "john", "david", "smith"]
        );
        assert!(name_tokens("  ").is_empty());
    }

    #[test]
    fn appraisal_keywords_cover_all_spellings() {
        assert_eq!(
            appraisal_type_keywords("1004 + 1007 + 216"),
            BTreeSet::from(["1007", "216"])
        );
        assert_eq!(
            appraisal_type_keywords("URAR with Rent Schedule"),
            BTreeSet::from(["1007"])
        );
        assert_eq!(
            appraisal_type_keywords("STR Rental analysis"),
            BTreeSet::from(["1007"])
        );
        assert_eq!(
            appraisal_type_keywords("Operating Income Statement"),
            BTreeSet::from(["216"])
        );
        assert!(appraisal_type_keywords("1004 only").is_empty());
    }

    #[test]
    fn unit_extraction_handles_common_markers() {
        assert_eq!(unit_from_address("123 Main St Unit 104"), Some("104".into()));
        assert_eq!(unit_from_address("123 Main St #B2"), Some("B2".into()));
        assert_eq!(unit_from_address("123 Main St Apt 7"), Some("7".into()));
        assert_eq!(unit_from_address("123 Main St"), None);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in ".{0,64}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn space_agnostic_never_contains_whitespace(s in ".{0,64}") {
            let out = normalize_space_agnostic(&s);
            prop_assert!(!out.chars().any(char::is_whitespace));
        }
    }
}
