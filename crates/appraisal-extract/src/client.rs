//! File-API client for the generative document-understanding service
//!
//! Extraction runs in two stages: documents are uploaded to the file
//! API and polled until server-side preprocessing finishes, then one
//! generation request references the uploaded files together with the
//! section instruction. This module owns the HTTP surface only; the
//! polling policy lives with [`crate::LlmExtractor`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::config::ExtractorConfig;

/// Client for the file upload and content generation endpoints
#[derive(Debug, Clone)]
pub struct FileApiClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

/// Preprocessing state of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    #[default]
    StateUnspecified,
    Processing,
    Active,
    Failed,
    /// Forward compatibility with states this client does not know
    #[serde(other)]
    Unknown,
}

impl FileState {
    #[inline]
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StateUnspecified => "STATE_UNSPECIFIED",
            Self::Processing => "PROCESSING",
            Self::Active => "ACTIVE",
            Self::Failed => "FAILED",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{label}")
    }
}

/// Handle to a file the service has accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    /// Server-assigned resource name, e.g. `files/abc123`
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// URI referenced by generation requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub state: FileState,
}

/// Upload endpoint response wrapper
#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: FileHandle,
}

/// Generation request body
#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

/// A part of a turn (text or an uploaded-file reference)
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    File {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

/// Reference to an uploaded file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

/// Generation endpoint response
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl FileApiClient {
    /// Create a new client
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    /// Returns an error if `GEMINI_API_KEY` is not set or HTTP client
    /// creation fails.
    #[must_use = "creating a client that is not used is a waste of resources"]
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let api_key =
            env::var("GEMINI_API_KEY").context("GEMINI_API_KEY environment variable not set")?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Upload one document to the file API
    ///
    /// The returned handle is usually still in the `PROCESSING` state;
    /// callers poll [`FileApiClient::get_file`] until it becomes
    /// `ACTIVE`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the request fails,
    /// or the response cannot be parsed.
    pub async fn upload_file(&self, path: &Path) -> Result<FileHandle> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        let response = self
            .http_client
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "raw")
            .header("Content-Type", mime_for(path))
            .body(bytes)
            .send()
            .await
            .context("Failed to send file upload request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read file upload response")?;

        if !status.is_success() {
            anyhow::bail!("File upload failed with status {status}: {response_text}");
        }

        let uploaded: UploadResponse =
            serde_json::from_str(&response_text).context("Failed to parse file upload response")?;

        let mut handle = uploaded.file;
        if handle.display_name.is_none() {
            handle.display_name = display_name;
        }
        Ok(handle)
    }

    /// Fetch the current state of an uploaded file
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// parsed.
    pub async fn get_file(&self, name: &str) -> Result<FileHandle> {
        let response = self
            .http_client
            .get(format!("{}/v1beta/{name}", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .context("Failed to send file status request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read file status response")?;

        if !status.is_success() {
            anyhow::bail!("File status request failed with status {status}: {response_text}");
        }

        serde_json::from_str(&response_text).context("Failed to parse file status response")
    }

    /// Run one generation request over the uploaded files
    ///
    /// Files come before the instruction in the request, matching the
    /// order the model reads them in.
    ///
    /// # Errors
    /// Returns an error if any file handle lacks a URI, the request
    /// fails, or the response carries no text.
    #[must_use = "this function returns a model response that should be processed"]
    pub async fn generate(&self, instruction: &str, files: &[FileHandle]) -> Result<String> {
        let mut parts = Vec::with_capacity(files.len() + 1);
        for file in files {
            let file_uri = file
                .uri
                .clone()
                .with_context(|| format!("Uploaded file {} has no URI", file.name))?;
            parts.push(Part::File {
                file_data: FileData {
                    mime_type: file
                        .mime_type
                        .clone()
                        .unwrap_or_else(|| "application/pdf".to_string()),
                    file_uri,
                },
            });
        }
        parts.push(Part::Text {
            text: instruction.to_string(),
        });

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send generation request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read generation response")?;

        if !status.is_success() {
            anyhow::bail!("Generation request failed with status {status}: {response_text}");
        }

        let generated: GenerateResponse =
            serde_json::from_str(&response_text).context("Failed to parse generation response")?;

        let text: String = generated
            .candidates
            .first()
            .context("No candidates in generation response")?
            .content
            .as_ref()
            .context("No content in generation response")?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            anyhow::bail!("Generation response contained no text parts");
        }
        Ok(text)
    }
}

/// Content type sent with an upload, from the file extension.
fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("html" | "htm") => "text/html",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
