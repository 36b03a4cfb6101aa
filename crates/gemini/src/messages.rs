//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Request and response bodies use the REST API's camelCase field names.
//! Only the fields this service sends or reads are modeled; everything else
//! in the provider's payloads is ignored on deserialization.

use serde::{Deserialize, Serialize};

use storygen_core::generation::GenerationParams;

/// One text part within a content block.
///
/// Responses may carry non-text parts (which deserialize to an empty
/// `text`); extraction skips those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// A content block: a role plus its parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-part user turn.
    pub fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

/// The model-level system instruction block.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    pub fn from_text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

/// Sampling controls in the provider's wire form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: i32,
    pub max_output_tokens: i32,
    pub response_mime_type: String,
}

impl From<&GenerationParams> for GenerationConfig {
    fn from(params: &GenerationParams) -> Self {
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            max_output_tokens: params.max_output_tokens,
            response_mime_type: params.response_mime_type.to_string(),
        }
    }
}

/// Request body for `POST /models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: SystemInstruction,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// Response body on success (HTTP 2xx).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One generated candidate. `content` is absent when generation was stopped
/// before producing anything.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback on the prompt itself; `block_reason` is set when the provider
/// refused to generate at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error body the provider returns on non-2xx statuses
/// (`{"error": {"code": ..., "message": ..., "status": ...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<i32>,
    pub message: String,
    /// google.rpc status label, e.g. `INVALID_ARGUMENT`, `UNAUTHENTICATED`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Pull the primary text payload out of a response: the first non-empty text
/// part of the first candidate.
pub fn extract_text(response: &GenerateContentResponse) -> Option<&str> {
    response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .map(|part| part.text.as_str())
        .find(|text| !text.is_empty())
}
