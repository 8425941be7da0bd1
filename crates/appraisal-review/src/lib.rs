//! Cross-document reconciliation for appraisal review
//!
//! Where extraction answers "what does this document say", this crate
//! answers "do these documents agree". It carries the deterministic
//! half of the review pipeline: field matching with per-field
//! strategies, a pure comparison engine, rule validations over
//! extracted sections, and the review workflows that fan extraction
//! out over a [`DocumentExtractor`](appraisal_core::DocumentExtractor)
//! and assemble ordered check lists.
//!
//! # Workflows
//!
//! - [`audit_revision`]: full audit of a revised report against the
//!   old version, cross-checked against the order form when present
//! - [`d1004_review`]: 1004D completion/update review against the
//!   original report
//! - [`revision_gap_check`]: follows up the order form's rejection
//!   reason against the resubmitted report
//! - [`escalation_review`]: order-form profile comparison plus the
//!   escalation checklist
//!
//! All four share one shape: concurrent fan-out extraction, local
//! comparison and validation, ordered result assembly. A failed
//! required extraction fails the whole workflow before any check
//! runs; a failed check is an ordinary result.
//!
//! # Comparing two field maps
//!
//! The engine itself needs no extractor and no I/O:
//!
//! ```
//! use appraisal_review::compare_field_maps;
//! use serde_json::json;
//!
//! let order = json!({ "Borrower": "John Doe" }).as_object().cloned().unwrap();
//! let report = json!({ "Borrower": "Jane Doe" }).as_object().cloned().unwrap();
//!
//! let rows = compare_field_maps(&order, &report, "Order Form", "Report");
//! assert_eq!(rows[0].field, "Borrower");
//! assert!(!rows[0].matched);
//! assert!(rows[0].diff.is_some());
//! ```
//!
//! # Running a workflow
//!
//! ```rust,ignore
//! use appraisal_extract::{ExtractorConfig, LlmExtractor};
//! use appraisal_review::audit_revision;
//! use std::path::Path;
//!
//! let extractor = LlmExtractor::new(ExtractorConfig::from_env())?;
//! let outcome = audit_revision(
//!     &extractor,
//!     Path::new("revised.pdf"),
//!     Path::new("old.pdf"),
//!     None,
//!     None,
//! )
//! .await?;
//!
//! for check in &outcome.checks {
//!     println!("{}: {}", check.check, check.message);
//! }
//! ```

pub mod diff;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod profile;
pub mod report;
pub mod validate;
pub mod workflows;

pub use engine::{compare_field_maps, mismatched_fields};
pub use error::WorkflowError;
pub use matcher::{strategy_for, MatchStrategy};
pub use profile::{report_profile, PROFILE_FIELDS};
pub use workflows::{
    audit_revision, d1004_review, escalation_review, rejection_reason, revision_gap_check,
    AuditOutcome, D1004Outcome, EscalationOutcome, RevisionOutcome,
};
