//! Route definitions for story generation.
//!
//! ```text
//! POST /stories    generate_story
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::story;
use crate::state::AppState;

/// Story routes -- mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/stories", post(story::generate_story))
}
