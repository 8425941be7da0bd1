//! Gemini-backed implementation of the extraction contract.
//!
//! [`LlmExtractor`] drives the full flow for one section: filter the
//! document list down to files that exist, upload each one, poll until
//! the service marks it `ACTIVE`, send the section instruction with
//! the file references attached, and parse the model's reply into a
//! [`FieldMap`]. State-requirement extraction runs in two phases: a
//! minimal lookup call resolves the subject state first, then the
//! state-specific rules go out as the main instruction.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use appraisal_core::{DocumentExtractor, ExtractError, FieldMap, Result, Section};

use crate::client::{FileApiClient, FileHandle};
use crate::config::ExtractorConfig;
use crate::prompts;

/// Section extractor backed by the Gemini file and generation APIs.
pub struct LlmExtractor {
    client: FileApiClient,
    config: ExtractorConfig,
}

impl LlmExtractor {
    /// Creates an extractor from configuration. Fails when the
    /// `GEMINI_API_KEY` environment variable is not set.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = FileApiClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Uploads `path` and waits until the service finishes processing it.
    async fn upload_and_wait(&self, path: &Path, poll_interval: Duration) -> Result<FileHandle> {
        let mut handle = self.client.upload_file(path).await?;
        let file_label = handle
            .display_name
            .clone()
            .unwrap_or_else(|| handle.name.clone());
        let mut attempts = 0u32;
        while handle.state.is_processing() {
            attempts += 1;
            if attempts > self.config.max_poll_attempts {
                return Err(ExtractError::PollTimeout(file_label));
            }
            info!("Waiting for file {} to be processed...", file_label);
            tokio::time::sleep(poll_interval).await;
            handle = self.client.get_file(&handle.name).await?;
        }
        if !handle.state.is_active() {
            return Err(ExtractError::Processing {
                name: file_label,
                state: handle.state.to_string(),
            });
        }
        Ok(handle)
    }

    /// Phase one of the state-compliance flow: asks the model for the
    /// subject property's state using only the first document.
    async fn lookup_state(&self, document: &Path) -> Result<String> {
        let interval = Duration::from_secs(self.config.state_poll_interval_secs);
        let handle = self
            .upload_and_wait(document, interval)
            .await
            .map_err(|e| ExtractError::StateLookup(e.to_string()))?;
        let text = self
            .client
            .generate(prompts::STATE_LOOKUP_INSTRUCTION, std::slice::from_ref(&handle))
            .await
            .map_err(|e| ExtractError::StateLookup(e.to_string()))?;
        let map =
            parse_model_json(&text).map_err(|e| ExtractError::StateLookup(e.to_string()))?;
        match map.get("State").and_then(|v| v.as_str()) {
            Some(state) if !state.trim().is_empty() => Ok(state.trim().to_string()),
            _ => Err(ExtractError::StateLookup(
                "response carried no 'State' key".to_string(),
            )),
        }
    }
}

#[async_trait]
impl DocumentExtractor for LlmExtractor {
    async fn extract(
        &self,
        documents: &[PathBuf],
        section: Section,
        instruction_override: Option<&str>,
    ) -> Result<FieldMap> {
        // An analysis call with no question has nothing to ask.
        if section == Section::CustomAnalysis && instruction_override.is_none() {
            return Ok(FieldMap::new());
        }

        let mut present: Vec<&Path> = Vec::new();
        for path in documents {
            if path.exists() {
                present.push(path.as_path());
            } else {
                warn!("File not found during extraction: {}", path.display());
            }
        }
        if present.is_empty() {
            if section == Section::StateRequirement {
                return Err(ExtractError::StateDocumentMissing);
            }
            let joined = documents
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ExtractError::MissingDocument(joined));
        }

        let instruction = if section == Section::StateRequirement {
            let state = match instruction_override {
                Some(state) => state.to_string(),
                None => self.lookup_state(present[0]).await?,
            };
            info!("Checking state requirements for {state}");
            prompts::instruction_for(section, Some(&state))
        } else {
            prompts::instruction_for(section, instruction_override)
        };

        let interval = Duration::from_secs(self.config.poll_interval_secs);
        let mut handles = Vec::with_capacity(present.len());
        for path in &present {
            handles.push(self.upload_and_wait(path, interval).await?);
        }

        debug!(
            section = section.key(),
            files = handles.len(),
            "requesting extraction"
        );
        let text = self.client.generate(&instruction, &handles).await?;
        parse_model_json(&text)
    }
}

/// Parses a model reply into a field map.
///
/// Accepts the raw JSON object, the same object inside a ` ```json `
/// fence, or the object embedded in surrounding prose.
pub fn parse_model_json(raw: &str) -> Result<FieldMap> {
    let mut text = raw.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    let text = text.trim();
    match serde_json::from_str::<FieldMap>(text) {
        Ok(map) => Ok(map),
        Err(err) => {
            // Models sometimes wrap the object in prose; retry on the
            // outermost brace window.
            if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
                if start < end {
                    if let Ok(map) = serde_json::from_str::<FieldMap>(&text[start..=end]) {
                        return Ok(map);
                    }
                }
            }
            Err(ExtractError::Response(err))
        }
    }
}
