use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use storygen_core::cycle::CycleError;
use storygen_core::secrets::ConfigError;
use storygen_gemini::GenerationError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain error kinds and implements [`IntoResponse`] to produce
/// consistent JSON error responses: the message is the human-readable
/// description shown to the user, the `code` preserves the kind for
/// programmatic handling.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A secret-store failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A failure from the generation client.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// An invalid state-machine transition -- a bug in the handler, not a
    /// user error.
    #[error("Internal error: {0}")]
    Cycle(#[from] CycleError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Config(err) => {
                tracing::error!(error = %err, "Secret store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    err.to_string(),
                )
            }

            AppError::Generation(err) => {
                let code = match err {
                    GenerationError::Network(_) => "UPSTREAM_UNREACHABLE",
                    GenerationError::Auth(_) => "UPSTREAM_AUTH",
                    GenerationError::ProviderRejected(_) => "UPSTREAM_REJECTED",
                    GenerationError::EmptyResponse => "EMPTY_GENERATION",
                };
                tracing::warn!(error = %err, code, "Story generation failed");
                (StatusCode::BAD_GATEWAY, code, err.to_string())
            }

            AppError::Cycle(err) => {
                tracing::error!(error = %err, "Generation cycle misuse");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
