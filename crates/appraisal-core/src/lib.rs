//! # Appraisal Core - Extraction and Review Primitives
//!
//! Core vocabulary for the appraisal review pipeline: the section
//! catalog that says what to ask an AI document-understanding service
//! for, the loosely-typed field maps it answers with, and the check
//! and comparison types the reconciliation workflows produce.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use appraisal_core::{fields_for, DocumentExtractor, Section};
//!
//! // What the extractor will be asked for:
//! let entry = fields_for(Section::Subject);
//! println!("subject carries {} fields", entry.len());
//!
//! // Run one extraction against any implementation:
//! async fn borrower(extractor: &dyn DocumentExtractor) -> appraisal_core::Result<String> {
//!     let fields = extractor
//!         .extract_one(std::path::Path::new("report.pdf"), Section::Subject)
//!         .await?;
//!     Ok(appraisal_core::types::field_text(&fields, "Borrower"))
//! }
//! ```
//!
//! ## Design
//!
//! - **Closed section registry**: [`Section`] is an enum, so catalog
//!   lookups are total. Unknown strings fail once, at the parse
//!   boundary, with [`ExtractError::UnknownSection`].
//! - **Tolerant payloads**: extracted data stays as JSON maps because
//!   the upstream model is not schema-enforced. Accessors in
//!   [`types`] never panic on missing or oddly-typed values.
//! - **No hidden state**: extraction results are owned by a single
//!   workflow invocation and never cached here.

pub mod catalog;
pub mod error;
pub mod extract;
mod fields;
pub mod normalize;
pub mod section;
pub mod types;

pub use catalog::*;
pub use error::*;
pub use extract::*;
pub use section::*;
pub use types::*;
