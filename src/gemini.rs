//! Gemini summarisation client.
//!
//! One POST per abstract against the `generateContent` endpoint, key passed as
//! a URL query parameter. Failures are per-item values rendered straight into
//! the report, never batch aborts, and no retry happens at this layer.

use crate::arxiv::AbstractText;
use crate::error::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default Gemini API host
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default summarisation model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Instruction prepended to every abstract sent for summarisation.
const PROMPT_PREFIX: &str = "summarise the following abstract in 1-2 simple sentences. \
Focus on what the authors did, why, and the results: \n\n";

/// Per-item summarisation failure.
///
/// Display forms are reader-facing: the assembler renders them into the
/// report cell in place of a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Upstream fetch produced no abstract, so no API call was spent on it.
    #[error("Error fetching abstract.")]
    AbstractUnavailable {
        /// Why the abstract was missing; logged, not rendered.
        reason: String,
    },

    #[error("Error: Unable to get response, status code: {0}")]
    Status(u16),

    #[error("Error: response structure missing '{0}'")]
    MissingField(&'static str),

    #[error("Error: request failed: {0}")]
    Transport(String),
}

/// Gemini generateContent response structures
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Client for the Gemini summarisation API.
///
/// Owns its key, model name, and endpoint; nothing is read from ambient
/// state after construction.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client against the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, model, GEMINI_API_URL)
    }

    /// Create a client against a custom endpoint (tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    /// Summarise one abstract in 1-2 sentences.
    ///
    /// An `Unavailable` abstract short-circuits without issuing any request.
    /// All failure modes come back as [`SummaryError`] so a batch caller can
    /// keep going.
    pub async fn summarise(
        &self,
        abstract_text: &AbstractText,
    ) -> std::result::Result<String, SummaryError> {
        let text = match abstract_text {
            AbstractText::Text(text) => text,
            AbstractText::Unavailable(reason) => {
                debug!(reason = %reason, "Skipping summarisation for missing abstract");
                return Err(SummaryError::AbstractUnavailable {
                    reason: reason.clone(),
                });
            }
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let request_body = serde_json::json!({
            "contents": [{
                "parts": [{
                    "text": format!("{}{}", PROMPT_PREFIX, text)
                }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SummaryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(SummaryError::Status(status.as_u16()));
        }

        let api_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::Transport(e.to_string()))?;

        extract_summary(api_response)
    }
}

/// Pull the summary text out of the nested response shape.
fn extract_summary(response: GenerateResponse) -> std::result::Result<String, SummaryError> {
    response
        .candidates
        .into_iter()
        .next()
        .ok_or(SummaryError::MissingField("candidates"))?
        .content
        .ok_or(SummaryError::MissingField("content"))?
        .parts
        .into_iter()
        .next()
        .ok_or(SummaryError::MissingField("parts"))?
        .text
        .ok_or(SummaryError::MissingField("text"))
}
