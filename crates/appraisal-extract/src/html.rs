//! Deterministic order-form field extraction.
//!
//! Order forms arrive as server-rendered HTML with a known set of
//! labeled fields. [`HtmlFieldReader`] pulls those fields out with
//! label-proximity heuristics instead of an AI call: find the first
//! element containing the label phrase, then search nearby for the
//! value. Values are always strings; absent values become the
//! `"Not Found"` sentinel and read failures fill every field with an
//! error sentinel, so downstream comparisons never see null.

use std::fs;
use std::io;
use std::path::Path;

use scraper::{ElementRef, Html};
use serde_json::Value;
use tracing::warn;

use appraisal_core::FieldMap;

/// Value for a field whose label was found but no value could be
/// located, or whose label never appeared.
pub const NOT_FOUND: &str = "Not Found";
/// Value filled into every field when the order form file is missing.
pub const FILE_ERROR: &str = "N/A (HTML File Error)";
/// Value filled into every field when the order form cannot be decoded.
pub const PROCESSING_ERROR: &str = "N/A (HTML Processing Error)";

/// Class the order form pages put on value spans.
const VALUE_MARKER_CLASS: &str = "view-label-info";
/// Anchor id of the UAD XML download link on the order page.
const UAD_XML_LINK_ID: &str = "ctl00_cphBody_lnkAppraisalXMLFile";
const UAD_XML_FIELD: &str = "UAD XML Report";

/// Output field name paired with the label phrase that locates it.
/// The label text differs from the output name where the page uses
/// the client's wording (e.g. "Client Name" backs "Client/Lender Name").
const FIELD_LABELS: &[(&str, &str)] = &[
    ("Client/Lender Name", "Client Name"),
    ("Lender Address", "Client Address"),
    ("FHA Case Number", "FHA Case Number"),
    ("Transaction Type", "Transaction Type"),
    ("AMC Reg. Number", "AMC Reg. Number"),
    ("Borrower (and Co-Borrower)", "Borrower (and Co-Borrower)"),
    ("Property Type", "Property Type"),
    ("Property Address", "Property Address"),
    ("Property County", "Property County"),
    ("Appraisal Type", "Appraisal Type"),
    ("Assigned to Vendor(s)", "Assigned to Vendor(s)"),
];

/// Reader for the fixed field set of an HTML order form.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFieldReader;

impl HtmlFieldReader {
    /// Every field name the reader emits, in output order.
    pub const FIELD_NAMES: [&'static str; 12] = [
        "Client/Lender Name",
        "Lender Address",
        "FHA Case Number",
        "Transaction Type",
        "AMC Reg. Number",
        "Borrower (and Co-Borrower)",
        "Property Type",
        "Property Address",
        "Property County",
        "Appraisal Type",
        "Assigned to Vendor(s)",
        UAD_XML_FIELD,
    ];

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Reads the order form at `path`. Never fails: a missing file or
    /// undecodable content yields a map with every field set to the
    /// matching error sentinel.
    #[must_use]
    pub fn read_path(&self, path: &Path) -> FieldMap {
        match fs::read_to_string(path) {
            Ok(html) => self.read_str(&html),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("Order form not found: {}", path.display());
                self.sentinel_map(FILE_ERROR)
            }
            Err(err) => {
                warn!("Order form could not be read: {err}");
                self.sentinel_map(PROCESSING_ERROR)
            }
        }
    }

    /// Extracts the fixed field set from already-loaded HTML.
    #[must_use]
    pub fn read_str(&self, html: &str) -> FieldMap {
        let document = Html::parse_document(html);
        let mut map = FieldMap::new();
        for (field, label) in FIELD_LABELS {
            let value =
                find_labeled_value(&document, label).unwrap_or_else(|| NOT_FOUND.to_string());
            map.insert((*field).to_string(), Value::String(value));
        }
        let uad_link = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().attr("id") == Some(UAD_XML_LINK_ID))
            .map(element_text);
        map.insert(
            UAD_XML_FIELD.to_string(),
            Value::String(uad_link.unwrap_or_else(|| NOT_FOUND.to_string())),
        );
        map
    }

    fn sentinel_map(&self, sentinel: &str) -> FieldMap {
        let mut map = FieldMap::new();
        for field in Self::FIELD_NAMES {
            map.insert(field.to_string(), Value::String(sentinel.to_string()));
        }
        map
    }
}

/// Finds the value for one label phrase.
///
/// The label element is the first `<label>`/`<strong>`/`<th>`/`<td>`/
/// `<div>` in document order whose text contains the phrase. The value
/// search then runs three fallbacks in order:
/// 1. walk up to 3 ancestor levels, checking each level's next sibling
///    for a value-marker element or plain text;
/// 2. find the enclosing `col-N` container and look for a marker span
///    in its next `col-N` sibling;
/// 3. take the text of the label's own next sibling.
fn find_labeled_value(document: &Html, label: &str) -> Option<String> {
    let needle = label.to_lowercase();
    let label_element = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            matches!(
                el.value().name(),
                "label" | "strong" | "th" | "td" | "div"
            ) && element_text(*el).to_lowercase().contains(&needle)
        })?;

    let mut current = label_element;
    for _ in 0..3 {
        if let Some(sibling) = next_element_sibling(current) {
            if let Some(value) = find_value_marker(sibling) {
                return Some(value);
            }
            let text = element_text(sibling);
            if !text.is_empty() {
                return Some(text);
            }
        }
        match current.parent().and_then(ElementRef::wrap) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    if let Some(column) = label_element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| is_column(*el))
    {
        if let Some(next_column) = column
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| is_column(*el))
        {
            if let Some(span) = next_column
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|el| {
                    el.value().name() == "span"
                        && el.value().classes().any(|c| c == VALUE_MARKER_CLASS)
                })
            {
                return Some(element_text(span));
            }
        }
    }

    let sibling = next_element_sibling(label_element)?;
    let text = element_text(sibling);
    (!text.is_empty()).then_some(text)
}

fn next_element_sibling(element: ElementRef) -> Option<ElementRef> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Looks below `scope` for the first element carrying the value
/// marker class.
fn find_value_marker(scope: ElementRef) -> Option<String> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|c| c == VALUE_MARKER_CLASS))
        .map(element_text)
}

fn is_column(element: ElementRef) -> bool {
    element.value().classes().any(is_column_class)
}

/// True for grid classes like `col-4`; the digit must directly follow
/// `col-`, so `col-md-4` does not qualify.
fn is_column_class(class: &str) -> bool {
    class
        .match_indices("col-")
        .any(|(i, _)| class[i + 4..].chars().next().is_some_and(|c| c.is_ascii_digit()))
}

/// Concatenates an element's text fragments with each fragment
/// trimmed, matching how the page's whitespace-heavy markup reads.
fn element_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_label_followed_by_sibling_value() {
        let html = "<html><body><label>Client Name</label><span>Acme Lending</span></body></html>";
        let map = HtmlFieldReader::new().read_str(html);
        assert_eq!(
            map.get("Client/Lender Name").unwrap().as_str().unwrap(),
            "Acme Lending"
        );
        assert_eq!(
            map.get("FHA Case Number").unwrap().as_str().unwrap(),
            NOT_FOUND
        );
    }

    #[test]
    fn reads_table_label_value_rows() {
        let html = r#"<html><body><table>
            <tr><td>Property County</td><td>Maricopa</td></tr>
            <tr><td>Transaction Type</td><td>Purchase</td></tr>
        </table></body></html>"#;
        let map = HtmlFieldReader::new().read_str(html);
        assert_eq!(
            map.get("Property County").unwrap().as_str().unwrap(),
            "Maricopa"
        );
        assert_eq!(
            map.get("Transaction Type").unwrap().as_str().unwrap(),
            "Purchase"
        );
    }

    #[test]
    fn reads_value_marker_near_the_label() {
        let html = r#"<html><body>
            <section class="left"><label>Assigned to Vendor(s)</label></section>
            <section class="right"><span class="view-label-info">Jane Q. Appraiser</span></section>
        </body></html>"#;
        let map = HtmlFieldReader::new().read_str(html);
        assert_eq!(
            map.get("Assigned to Vendor(s)").unwrap().as_str().unwrap(),
            "Jane Q. Appraiser"
        );
    }

    #[test]
    fn reads_marker_span_from_sibling_column() {
        // The label sits deep enough that the ancestor walk runs out
        // before reaching the column pair.
        let html = r#"<html><body>
            <section class="col-4"><p><em><label>AMC Reg. Number</label></em></p></section>
            <section class="col-8"><span class="view-label-info">AMC-0042</span></section>
        </body></html>"#;
        let map = HtmlFieldReader::new().read_str(html);
        assert_eq!(
            map.get("AMC Reg. Number").unwrap().as_str().unwrap(),
            "AMC-0042"
        );
    }

    #[test]
    fn label_match_is_case_insensitive() {
        let html = "<html><body><table><tr><th>PROPERTY ADDRESS</th><td>12 Elm St, Unit 4</td></tr></table></body></html>";
        let map = HtmlFieldReader::new().read_str(html);
        assert_eq!(
            map.get("Property Address").unwrap().as_str().unwrap(),
            "12 Elm St, Unit 4"
        );
    }

    #[test]
    fn uad_xml_link_text_is_captured() {
        let html = r#"<html><body>
            <a id="ctl00_cphBody_lnkAppraisalXMLFile" href="/files/report.xml">UAD XML</a>
        </body></html>"#;
        let map = HtmlFieldReader::new().read_str(html);
        assert_eq!(
            map.get("UAD XML Report").unwrap().as_str().unwrap(),
            "UAD XML"
        );
    }

    #[test]
    fn missing_file_fills_every_field_with_the_file_sentinel() {
        let map = HtmlFieldReader::new().read_path(Path::new("/nonexistent/order-form.html"));
        assert_eq!(map.len(), HtmlFieldReader::FIELD_NAMES.len());
        for (_, value) in &map {
            assert_eq!(value.as_str().unwrap(), FILE_ERROR);
        }
    }

    #[test]
    fn reads_order_form_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.html");
        std::fs::write(
            &path,
            "<html><body><table><tr><td>Client Name</td><td>Summit Funding</td></tr></table></body></html>",
        )
        .unwrap();
        let map = HtmlFieldReader::new().read_path(&path);
        assert_eq!(
            map.get("Client/Lender Name").unwrap().as_str().unwrap(),
            "Summit Funding"
        );
    }

}
