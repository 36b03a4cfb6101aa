//! Low-level REST wrapper for the Gemini HTTP API.
//!
//! [`GeminiApi`] owns the credential and the pooled [`reqwest::Client`] and
//! issues the single `generateContent` call using them.

use std::time::Duration;

use storygen_core::secrets::Credential;

use crate::messages::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the Gemini REST API.
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    credential: Credential,
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP round trip itself failed (connect, timeout, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Gemini API error ({http_status}): {message}")]
    Api {
        /// HTTP status code.
        http_status: u16,
        /// google.rpc status label from the error body, when present.
        grpc_status: Option<String>,
        /// Human-readable message from the error body, or the raw body.
        message: String,
    },
}

impl GeminiApi {
    /// Create an API client bound to a base URL and credential.
    ///
    /// `timeout` caps the full round trip of every call; expiry surfaces as
    /// a timeout [`GeminiApiError::Request`].
    pub fn new(base_url: String, credential: Credential, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url,
            credential,
        }
    }

    /// Base URL of the provider API (e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one `POST /models/{model}:generateContent` call.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.credential.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_from_body(status.as_u16(), body));
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// Build an [`GeminiApiError::Api`] from a non-2xx body, preferring the
    /// structured error detail when the body parses.
    fn error_from_body(http_status: u16, body: String) -> GeminiApiError {
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => GeminiApiError::Api {
                http_status,
                grpc_status: parsed.error.status,
                message: parsed.error.message,
            },
            Err(_) => GeminiApiError::Api {
                http_status,
                grpc_status: None,
                message: body,
            },
        }
    }
}

impl std::fmt::Debug for GeminiApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credential already redacts itself; keep it out entirely anyway.
        f.debug_struct("GeminiApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
