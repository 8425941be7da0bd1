//! The extraction boundary.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::section::Section;
use crate::types::FieldMap;

/// External document-understanding service behind every workflow.
///
/// Implementations upload the named documents, wait for server-side
/// preprocessing, and ask the model for one section's contents. The
/// trait is object safe so workflows run against the production client
/// and test stubs interchangeably.
///
/// Sections are independent of each other, so callers are free to fan
/// extraction calls out concurrently over one implementation.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extracts one section from the given documents.
    ///
    /// For most sections `instruction_override`, when present, replaces
    /// the catalog-built instruction verbatim. The parameterized
    /// sections embed it into their templates instead: the analysis
    /// question for [`Section::CustomAnalysis`], the rejection reason
    /// for [`Section::RevisionCheck`], and the cross-document context
    /// payload for [`Section::EscalationCheck`].
    ///
    /// Asking for [`Section::CustomAnalysis`] with no instruction is a
    /// valid "nothing to do yet" state and yields an empty map, not an
    /// error.
    async fn extract(
        &self,
        documents: &[PathBuf],
        section: Section,
        instruction_override: Option<&str>,
    ) -> Result<FieldMap>;

    /// Single-document convenience over [`DocumentExtractor::extract`].
    async fn extract_one(&self, document: &Path, section: Section) -> Result<FieldMap> {
        let documents = [document.to_path_buf()];
        self.extract(&documents, section, None).await
    }
}
