//! AI-backed field extraction for appraisal report review
//!
//! This crate provides the document-understanding side of the review
//! pipeline: section field extraction from PDF reports through the
//! Gemini file and generation APIs, plus a deterministic HTML reader
//! for lender order forms.
//!
//! # Features
//!
//! - **Section Extraction**: one call per catalog section, returning the
//!   exact JSON shape downstream comparisons expect
//! - **Two-Phase State Checks**: resolves the subject state first, then
//!   applies state-specific compliance rules
//! - **Document Lifecycle**: upload, processing polls, and generation
//!   against uploaded file references
//! - **Order Form Reader**: label-proximity extraction from HTML with
//!   sentinel values instead of nulls
//!
//! # Example
//!
//! ```no_run
//! use appraisal_core::{DocumentExtractor, Section};
//! use appraisal_extract::{ExtractorConfig, LlmExtractor};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = LlmExtractor::new(ExtractorConfig::from_env())?;
//!     let documents = [PathBuf::from("appraisal.pdf")];
//!
//!     let fields = extractor
//!         .extract(&documents, Section::Subject, None)
//!         .await?;
//!
//!     for (name, value) in &fields {
//!         println!("{name}: {value}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod html;
pub mod llm;
pub mod prompts;

pub use client::{FileApiClient, FileHandle, FileState};
pub use config::ExtractorConfig;
pub use html::HtmlFieldReader;
pub use llm::{parse_model_json, LlmExtractor};
