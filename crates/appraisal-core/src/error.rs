//! Error types for extraction operations.
//!
//! Extraction talks to an external document-understanding service, so
//! most failures here are remote: upload rejections, preprocessing
//! failures, and responses that never become valid JSON. Messages are
//! written for reviewers, who see them verbatim in workflow output.

use thiserror::Error;

/// Error conditions raised while extracting fields from a document.
///
/// # Examples
///
/// ```rust,ignore
/// use appraisal_core::{ExtractError, Section};
///
/// let err = "floorplan".parse::<Section>().unwrap_err();
/// assert!(matches!(err, ExtractError::UnknownSection(_)));
/// ```
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A section key that is not registered in the catalog.
    ///
    /// Raised at the string parse boundary; once a [`crate::Section`]
    /// value exists, catalog lookups are total.
    #[error("Invalid section name provided: {0}")]
    UnknownSection(String),

    /// A document path was missing or unreadable before upload.
    #[error("File not found during extraction: {0}")]
    MissingDocument(String),

    /// The state-compliance flow needs the main report to look up the
    /// subject state, and no report document was supplied.
    #[error("PDF file for state extraction not found.")]
    StateDocumentMissing,

    /// Phase one of the state-compliance flow failed, so the
    /// state-specific rules could not be selected.
    #[error("Failed to get state for compliance check: {0}")]
    StateLookup(String),

    /// The service accepted the upload but preprocessing ended in a
    /// terminal non-active state.
    #[error("File processing failed for {name}. State: {state}")]
    Processing { name: String, state: String },

    /// Preprocessing never left its pending state within the
    /// configured polling budget.
    #[error("Timed out waiting for file processing: {0}")]
    PollTimeout(String),

    /// File I/O error while reading a document for upload.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The model's reply never parsed as a JSON object, even after
    /// recovery attempts.
    #[error("An error occurred during extraction: {0}")]
    Response(#[from] serde_json::Error),

    /// Transport or service failure from the extraction client.
    #[error("An error occurred during extraction: {0}")]
    Client(#[from] anyhow::Error),

    /// A failure already rendered as a reviewer-facing message.
    #[error("{0}")]
    Message(String),
}

/// Type alias for [`Result<T, ExtractError>`].
///
/// # Examples
///
/// ```rust,ignore
/// use appraisal_core::{Result, Section};
///
/// fn parse_sections(keys: &[&str]) -> Result<Vec<Section>> {
///     keys.iter().map(|key| key.parse()).collect()
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExtractError>;
