//! Workflow failure type.

use appraisal_core::error::ExtractError;
use thiserror::Error;

/// Fatal failure of a review workflow.
///
/// Individual check failures are ordinary results; this type covers
/// the cases where the workflow itself cannot finish, which in
/// practice means a required extraction died. The `doc` label names
/// the document and section that failed, e.g. `old_subject`.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Error extracting '{doc}': {source}")]
    Extraction {
        doc: String,
        #[source]
        source: ExtractError,
    },
}

impl WorkflowError {
    pub(crate) fn extraction(doc: impl Into<String>, source: ExtractError) -> Self {
        Self::Extraction {
            doc: doc.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_display_names_the_document() {
        let error = WorkflowError::extraction(
            "old_subject",
            ExtractError::Message("timeout".to_string()),
        );
        assert_eq!(format!("{error}"), "Error extracting 'old_subject': timeout");
    }
}
