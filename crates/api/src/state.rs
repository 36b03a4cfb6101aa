use std::sync::Arc;

use storygen_gemini::StoryGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Generation client. Behind the trait so integration tests can
    /// substitute a stub provider.
    pub generator: Arc<dyn StoryGenerator>,
}
