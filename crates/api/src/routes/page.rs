//! The story form page -- the only UI surface.
//!
//! One embedded HTML document; all behavior behind it goes through the JSON
//! API, so the page stays pure presentation.

use axum::response::Html;
use axum::{routing::get, Router};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Mount the form page at `/` (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
