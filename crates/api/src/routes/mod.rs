pub mod health;
pub mod page;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /stories    POST    generate a story from the form inputs
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(story::router())
}
