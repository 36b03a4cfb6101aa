//! The story-generation contract and its Gemini implementation.
//!
//! [`StoryGenerator`] is the seam the HTTP surface depends on;
//! [`GeminiGenerator`] implements it with one `generateContent` call per
//! invocation -- no retry, no streaming, no caching. Every provider fault is
//! normalized into a [`GenerationError`] kind; raw provider errors never
//! escape this module.

use std::time::Duration;

use async_trait::async_trait;

use storygen_core::generation::GenerationParams;
use storygen_core::prompt::SYSTEM_INSTRUCTION;
use storygen_core::secrets::Credential;

use crate::api::{GeminiApi, GeminiApiError};
use crate::messages::{
    extract_text, Content, GenerateContentRequest, GenerateContentResponse, SystemInstruction,
};

/// Default provider API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Default upper bound on one generation round trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the Gemini client. The credential is passed
/// separately so it never sits in plain config structs.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    /// Cap on the full round trip; expiry maps to [`GenerationError::Network`].
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Failure kinds for one generation call.
///
/// The `Display` form is the user-facing description; the variant stays
/// available for programmatic handling.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Connectivity or timeout failure reaching the provider.
    #[error("Could not reach the generation service: {0}")]
    Network(String),

    /// The provider rejected the API credential.
    #[error("The generation service rejected the API credential: {0}")]
    Auth(String),

    /// Content-policy or malformed-request rejection.
    #[error("The generation service rejected the request: {0}")]
    ProviderRejected(String),

    /// A 2xx response with no extractable text payload.
    #[error("The generation service returned no story text")]
    EmptyResponse,
}

/// Anything that can turn a prompt into story text.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Issue exactly one generation call and await the full round trip.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// [`StoryGenerator`] backed by the Gemini REST API.
///
/// Binds the credential and the fixed system instruction at construction;
/// sampling parameters are the process-wide [`GenerationParams`] constants.
#[derive(Debug)]
pub struct GeminiGenerator {
    api: GeminiApi,
    model: String,
    params: GenerationParams,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig, credential: Credential) -> Self {
        Self {
            api: GeminiApi::new(config.base_url, credential, config.timeout),
            model: config.model,
            params: GenerationParams::default(),
        }
    }

    /// Model identifier used for every call.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl StoryGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            system_instruction: SystemInstruction::from_text(SYSTEM_INSTRUCTION),
            contents: vec![Content::user(prompt)],
            generation_config: (&self.params).into(),
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending generation request"
        );

        let response = self
            .api
            .generate_content(&self.model, &request)
            .await
            .map_err(normalize_api_error)?;

        let story = story_from_response(&response)?;
        tracing::debug!(story_chars = story.len(), "Generation succeeded");
        Ok(story)
    }
}

/// Map a REST-layer error onto the generation taxonomy.
fn normalize_api_error(error: GeminiApiError) -> GenerationError {
    match error {
        GeminiApiError::Request(e) if e.is_timeout() => {
            GenerationError::Network(format!("request timed out: {e}"))
        }
        GeminiApiError::Request(e) if e.is_connect() => {
            GenerationError::Network(format!("connection failed: {e}"))
        }
        GeminiApiError::Request(e) if e.is_decode() => {
            GenerationError::ProviderRejected(format!("unexpected response body: {e}"))
        }
        GeminiApiError::Request(e) => GenerationError::Network(e.to_string()),
        GeminiApiError::Api {
            http_status,
            grpc_status,
            message,
        } => classify_api_error(http_status, grpc_status.as_deref(), message),
    }
}

/// Classify a non-2xx provider response.
///
/// Gemini reports an invalid key as HTTP 400 `INVALID_ARGUMENT` with an
/// "API key not valid" message rather than a 401, so the message is part of
/// the check.
fn classify_api_error(
    http_status: u16,
    grpc_status: Option<&str>,
    message: String,
) -> GenerationError {
    let auth_status = matches!(http_status, 401 | 403)
        || matches!(grpc_status, Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED"));

    if auth_status || message.contains("API key") {
        GenerationError::Auth(message)
    } else {
        GenerationError::ProviderRejected(message)
    }
}

/// Resolve a 2xx response into story text or a failure kind.
fn story_from_response(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(text) = extract_text(response) {
        return Ok(text.to_string());
    }

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(GenerationError::ProviderRejected(format!(
            "prompt was blocked ({reason})"
        )));
    }

    Err(GenerationError::EmptyResponse)
}
