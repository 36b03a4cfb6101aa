//! Handler for the single-shot story generation cycle.
//!
//! Routes:
//! - `POST /stories` -- run one full cycle: prompt assembly, one provider
//!   call, atomic result render.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use storygen_core::cycle::StoryCycle;
use storygen_core::story::StoryRequest;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a generated story.
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    /// The generated story text.
    pub story: String,
    /// Model identifier that produced it.
    pub model: String,
    /// When the provider round trip completed.
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/stories
///
/// Drives one [`StoryCycle`]: `Idle -> Submitted` on entry,
/// `Submitted -> Success | Failed` once the provider answers. The `Json`
/// extractor rejects unknown genres/lengths before the cycle starts, so
/// malformed input never reaches the provider.
pub async fn generate_story(
    State(state): State<AppState>,
    Json(input): Json<StoryRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(
        genre = %input.genre,
        length = %input.length,
        hints_chars = input.hints.len(),
        "Story generation requested"
    );

    let mut cycle = StoryCycle::new();

    // Idle -> Submitted: prompt assembly.
    let prompt = cycle.submit(input)?;

    // Submitted -> Success | Failed: the one outbound call, awaited in full.
    let story = match state.generator.generate(&prompt).await {
        Ok(text) => text,
        Err(err) => {
            cycle.fail(err.to_string())?;
            return Err(err.into());
        }
    };
    cycle.succeed(story.clone())?;

    Ok(Json(DataResponse {
        data: StoryResponse {
            story,
            model: state.config.gemini_model.clone(),
            generated_at: Utc::now(),
        },
    }))
}
